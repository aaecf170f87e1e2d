use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

use super::message::MessageId;
use super::transcript::{Completion, Conversation, Rejection, Update};
use crate::request::ServiceError;
use crate::services::{LanguageService, SummaryService, TargetLanguage};

/// What happened to a `send` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The input was empty or whitespace; nothing was appended.
    Empty,
    /// A previous message is still being detected.
    Busy,
    Sent(MessageId),
}

/// Sole owner of the conversation; drives detect, summarize and translate workflows.
///
/// Workflows run as spawned tasks that never touch the transcript. Each posts
/// a [`Completion`] back over a channel, and the completion is applied only
/// when the owner calls [`Orchestrator::next_update`],
/// [`Orchestrator::poll_updates`] or [`Orchestrator::settle`].
pub struct Orchestrator {
    conversation: Conversation,
    target: TargetLanguage,
    language: Arc<dyn LanguageService>,
    summarizer: Arc<dyn SummaryService>,
    completions_tx: UnboundedSender<Completion>,
    completions_rx: UnboundedReceiver<Completion>,
    in_flight: usize,
}

impl Orchestrator {
    pub fn new(language: Arc<dyn LanguageService>, summarizer: Arc<dyn SummaryService>) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            conversation: Conversation::new(),
            target: TargetLanguage::default(),
            language,
            summarizer,
            completions_tx,
            completions_rx,
            in_flight: 0,
        }
    }

    #[must_use]
    pub fn with_target(mut self, target: TargetLanguage) -> Self {
        self.target = target;
        self
    }

    pub const fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub const fn target_language(&self) -> TargetLanguage {
        self.target
    }

    /// Changes the language used by later translation requests.
    pub fn select_target_language(&mut self, target: TargetLanguage) {
        debug!(%target, "target language selected");
        self.target = target;
    }

    /// Number of workflows whose completion has not been applied yet.
    pub const fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Adds a system notice to the transcript. No workflow is started for it.
    pub fn announce(&mut self, text: &str) -> MessageId {
        self.conversation.append_system(text.to_string())
    }

    /// Appends `text` as a user message and starts detecting its language.
    pub fn send(&mut self, text: &str) -> SendOutcome {
        let text = text.trim();
        if text.is_empty() {
            return SendOutcome::Empty;
        }
        if self.conversation.is_loading() {
            return SendOutcome::Busy;
        }

        let id = self.conversation.append_user(text.to_string());
        info!(%id, chars = text.chars().count(), "message sent");

        let service = Arc::clone(&self.language);
        let text = text.to_string();
        self.spawn(async move { service.detect(&text).await }, move |result| {
            Completion::Detection { id, result }
        });

        SendOutcome::Sent(id)
    }

    /// Starts summarizing a message. Only summarizable messages are accepted.
    pub fn request_summary(&mut self, id: MessageId) -> Result<(), Rejection> {
        let ticket = self.conversation.begin_summary(id)?;
        let text = self.message_text(id);
        info!(%id, ticket, "summary requested");

        let service = Arc::clone(&self.summarizer);
        self.spawn(async move { service.summarize(&text).await }, move |result| {
            Completion::Summary { id, ticket, result }
        });
        Ok(())
    }

    /// Starts translating a message into the target language selected right now.
    pub fn request_translation(&mut self, id: MessageId) -> Result<TargetLanguage, Rejection> {
        let ticket = self.conversation.begin_translation(id)?;
        let text = self.message_text(id);
        let target = self.target;
        info!(%id, ticket, %target, "translation requested");

        let service = Arc::clone(&self.language);
        self.spawn(
            async move { service.translate(&text, target).await },
            move |result| Completion::Translation {
                id,
                ticket,
                target,
                result,
            },
        );
        Ok(target)
    }

    /// Waits for the next workflow to finish and applies it.
    ///
    /// Returns `None` once nothing is in flight.
    pub async fn next_update(&mut self) -> Option<Update> {
        while self.in_flight > 0 {
            let completion = self.completions_rx.recv().await?;
            self.in_flight -= 1;
            if let Some(update) = self.conversation.apply(completion) {
                return Some(update);
            }
        }
        None
    }

    /// Applies every completion that is already available, without waiting.
    pub fn poll_updates(&mut self) -> Vec<Update> {
        let mut updates = Vec::new();
        while let Ok(completion) = self.completions_rx.try_recv() {
            self.in_flight -= 1;
            updates.extend(self.conversation.apply(completion));
        }
        updates
    }

    /// Waits until every workflow has finished.
    pub async fn settle(&mut self) -> Vec<Update> {
        let mut updates = Vec::new();
        while let Some(update) = self.next_update().await {
            updates.push(update);
        }
        updates
    }

    fn message_text(&self, id: MessageId) -> String {
        self.conversation
            .get(id)
            .map(|m| m.text().to_string())
            .unwrap_or_default()
    }

    fn spawn<T, W, F>(&mut self, work: W, complete: F)
    where
        T: Send + 'static,
        W: Future<Output = Result<T, ServiceError>> + Send + 'static,
        F: FnOnce(Result<T, ServiceError>) -> Completion + Send + 'static,
    {
        let tx = self.completions_tx.clone();
        self.in_flight += 1;

        tokio::spawn(async move {
            // A panicking workflow still has to report back, or in_flight never drains.
            let result = match tokio::spawn(work).await {
                Ok(result) => result,
                Err(e) => Err(ServiceError::Unexpected(e.to_string())),
            };
            let _ = tx.send(complete(result));
        });
    }
}

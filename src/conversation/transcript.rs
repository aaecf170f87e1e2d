use thiserror::Error;
use tracing::{debug, info};

use super::message::{
    Detection, Message, MessageId, OperationState, SUMMARY_MIN_CHARS, Sender, Ticket, Translation,
};
use crate::request::ServiceError;
use crate::services::TargetLanguage;

/// Why a per-message request was not started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("No message {0}")]
    UnknownMessage(MessageId),

    #[error(
        "Message {0} is not an English text longer than {min} characters",
        min = SUMMARY_MIN_CHARS
    )]
    NotSummarizable(MessageId),

    /// The message is still being detected, or is a system notice.
    #[error("Message {0} has no detected language yet")]
    NotDetected(MessageId),

    #[error("Message {0} already has a request in progress")]
    AlreadyInFlight(MessageId),
}

/// Result of a finished workflow, posted back to the owner of the conversation.
#[derive(Debug)]
pub enum Completion {
    Detection {
        id: MessageId,
        result: Result<String, ServiceError>,
    },
    Summary {
        id: MessageId,
        ticket: Ticket,
        result: Result<String, ServiceError>,
    },
    Translation {
        id: MessageId,
        ticket: Ticket,
        target: TargetLanguage,
        result: Result<String, ServiceError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateKind {
    Detection,
    Summary,
    Translation,
}

/// A state change applied to the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Update {
    pub id: MessageId,
    pub kind: UpdateKind,
    /// Whether the workflow produced a real result rather than a failure.
    pub succeeded: bool,
}

/// The transcript plus the session-wide flags shown next to it.
///
/// Every mutation bumps [`Conversation::version`].
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<Message>,
    loading: bool,
    error: Option<String>,
    version: u64,
    next_ticket: Ticket,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.messages.get(id.index())
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub const fn len(&self) -> usize {
        self.messages.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// True while a sent message is waiting for detection.
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// The most recent failure, already worded for the user.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub const fn version(&self) -> u64 {
        self.version
    }

    pub(crate) fn append_user(&mut self, text: String) -> MessageId {
        let id = MessageId::from_index(self.messages.len());
        self.messages.push(Message::user(id, text));
        self.loading = true;
        self.error = None;
        self.version += 1;
        id
    }

    pub(crate) fn append_system(&mut self, text: String) -> MessageId {
        let id = MessageId::from_index(self.messages.len());
        self.messages.push(Message::system(id, text));
        self.version += 1;
        id
    }

    pub(crate) fn begin_summary(&mut self, id: MessageId) -> Result<Ticket, Rejection> {
        let ticket = self.next_ticket;
        let message = self
            .messages
            .get_mut(id.index())
            .ok_or(Rejection::UnknownMessage(id))?;

        if !message.is_summarizable() {
            return Err(Rejection::NotSummarizable(id));
        }
        if message.summary_in_flight() {
            return Err(Rejection::AlreadyInFlight(id));
        }

        *message.summary_mut() = OperationState::InFlight { ticket };
        self.next_ticket += 1;
        self.version += 1;
        Ok(ticket)
    }

    pub(crate) fn begin_translation(&mut self, id: MessageId) -> Result<Ticket, Rejection> {
        let ticket = self.next_ticket;
        let message = self
            .messages
            .get_mut(id.index())
            .ok_or(Rejection::UnknownMessage(id))?;

        if message.sender() == Sender::System || message.detection().is_pending() {
            return Err(Rejection::NotDetected(id));
        }
        if message.translation_in_flight() {
            return Err(Rejection::AlreadyInFlight(id));
        }

        *message.translation_mut() = OperationState::InFlight { ticket };
        self.next_ticket += 1;
        self.version += 1;
        Ok(ticket)
    }

    /// Folds a finished workflow into the transcript.
    ///
    /// Returns `None` when the completion no longer matches the message state
    /// (unknown id, detection already recorded, or a ticket that is not the
    /// current in-flight one); such completions change nothing.
    pub fn apply(&mut self, completion: Completion) -> Option<Update> {
        let update = match completion {
            Completion::Detection { id, result } => self.apply_detection(id, result)?,
            Completion::Summary { id, ticket, result } => {
                let message = self.messages.get_mut(id.index())?;
                if message.summary_state().ticket() != Some(ticket) {
                    debug!(%id, ticket, "discarding stale summary");
                    return None;
                }
                let (state, succeeded) = match result {
                    Ok(text) => (OperationState::Done(text), true),
                    Err(e) => (failed(&mut self.error, &e), false),
                };
                *message.summary_mut() = state;
                Update {
                    id,
                    kind: UpdateKind::Summary,
                    succeeded,
                }
            }
            Completion::Translation {
                id,
                ticket,
                target,
                result,
            } => {
                let message = self.messages.get_mut(id.index())?;
                if message.translation_state().ticket() != Some(ticket) {
                    debug!(%id, ticket, "discarding stale translation");
                    return None;
                }
                let (state, succeeded) = match result {
                    Ok(text) => (OperationState::Done(Translation { text, target }), true),
                    Err(e) => (failed(&mut self.error, &e), false),
                };
                *message.translation_mut() = state;
                Update {
                    id,
                    kind: UpdateKind::Translation,
                    succeeded,
                }
            }
        };

        self.version += 1;
        Some(update)
    }

    fn apply_detection(
        &mut self,
        id: MessageId,
        result: Result<String, ServiceError>,
    ) -> Option<Update> {
        let message = self.messages.get_mut(id.index())?;
        if !message.detection().is_pending() {
            return None;
        }

        let detection = match result {
            Ok(tag) => Detection::Detected(tag),
            Err(e) => {
                self.error = Some(e.user_message());
                if e.is_escaped() {
                    Detection::Failed
                } else {
                    Detection::Unknown
                }
            }
        };
        let succeeded = matches!(detection, Detection::Detected(_));
        message.complete_detection(detection);
        info!(
            %id,
            language = message.detection().label(),
            summarizable = message.is_summarizable(),
            "detection finished"
        );

        self.loading = self.messages.iter().any(|m| m.detection().is_pending());
        Some(Update {
            id,
            kind: UpdateKind::Detection,
            succeeded,
        })
    }
}

fn failed<T>(banner: &mut Option<String>, error: &ServiceError) -> OperationState<T> {
    let reason = error.user_message();
    *banner = Some(reason.clone());
    OperationState::Failed { reason }
}

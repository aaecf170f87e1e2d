use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::SummaryService;
use crate::config::{Credentials, ResolvedConfig};
use crate::request::{RequestError, ServiceError, TimedExecutor};

pub const SUMMARY_INSTRUCTION: &str = "Summarize the following text";
pub const SUMMARY_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Extracts the first choice's message content from a chat completion body.
pub fn parse_summary(body: &[u8]) -> Result<String, RequestError> {
    let response: ChatResponse = serde_json::from_slice(body)
        .map_err(|e| RequestError::MalformedResponse(format!("completion: {e}")))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| RequestError::MalformedResponse("completion: no content".to_string()))
}

/// OpenAI-compatible chat completion client used for summaries.
pub struct OpenAiSummaryService {
    executor: TimedExecutor,
    credentials: Credentials,
    endpoint: String,
    model: String,
}

impl OpenAiSummaryService {
    pub const fn new(
        executor: TimedExecutor,
        credentials: Credentials,
        endpoint: String,
        model: String,
    ) -> Self {
        Self {
            executor,
            credentials,
            endpoint,
            model,
        }
    }

    pub fn from_config(config: &ResolvedConfig, executor: TimedExecutor) -> Self {
        Self::new(
            executor,
            config.credentials.clone(),
            config.completion_endpoint.clone(),
            config.model.clone(),
        )
    }

    async fn summarize_inner(&self, text: &str) -> Result<String, ServiceError> {
        self.credentials.validate()?;

        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: SUMMARY_INSTRUCTION,
                },
                Message {
                    role: "user",
                    content: text,
                },
            ],
            temperature: SUMMARY_TEMPERATURE,
        };

        let http_request = self
            .executor
            .client()
            .post(&self.endpoint)
            .bearer_auth(self.credentials.completion.value())
            .json(&request);

        let response = self.executor.execute(http_request).await?;
        let summary = parse_summary(&response.body)
            .inspect_err(|e| warn!(error = %e, "bad completion response"))?;
        Ok(summary)
    }
}

impl SummaryService for OpenAiSummaryService {
    fn summarize<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<String, ServiceError>> {
        self.summarize_inner(text).boxed()
    }
}

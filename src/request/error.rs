//! Failure taxonomy for outbound requests and its user-facing classification.

use std::collections::BTreeSet;

use thiserror::Error;

/// Required credentials are missing; raised before any network I/O.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Missing required credentials: {}", join_keys(.missing_keys))]
pub struct ConfigurationError {
    pub missing_keys: BTreeSet<String>,
}

fn join_keys(keys: &BTreeSet<String>) -> String {
    keys.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

/// A failure observed while executing or parsing a single HTTP request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("no network connectivity")]
    Offline,

    #[error("server responded with status {status}")]
    Http { status: u16 },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("{0}")]
    Unknown(String),
}

/// Maps a request failure to the message shown in the error banner.
///
/// Pure and total: the same error always yields the same text.
pub fn classify(error: &RequestError) -> String {
    match error {
        RequestError::Timeout { timeout_ms } => format!("Request timeout after {timeout_ms}ms"),
        RequestError::Offline => "No internet connection".to_string(),
        RequestError::Http { status: 401 } => "Invalid API key".to_string(),
        RequestError::Http { status: 403 } => "API quota exceeded".to_string(),
        RequestError::Http { status: 429 } => "Too many requests".to_string(),
        RequestError::Http { status } => format!("Server error ({status})"),
        RequestError::MalformedResponse(_) | RequestError::Unknown(_) => {
            "An unexpected error occurred".to_string()
        }
    }
}

/// Error returned by the service adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Request(#[from] RequestError),

    /// The workflow died without producing a result (e.g. a panic in the task).
    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

impl ServiceError {
    /// Text for the error banner.
    pub fn user_message(&self) -> String {
        match self {
            Self::Configuration(e) => e.to_string(),
            Self::Request(e) => classify(e),
            Self::Unexpected(_) => "An unexpected error occurred".to_string(),
        }
    }

    /// Whether the failure escaped the adapter's own containment.
    pub const fn is_escaped(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::Unexpected(_))
    }
}

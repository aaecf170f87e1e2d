use bytes::Bytes;
use reqwest::{Client, RequestBuilder, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

use super::error::RequestError;

/// Default deadline for a single request, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// A fully received response with a success status.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

/// Runs HTTP requests under a fixed deadline.
///
/// The deadline covers both sending the request and reading the whole body,
/// so a timed-out call never hands a partial body to a parser. Dropping the
/// timed future cancels the in-flight request and its timer on every path.
#[derive(Debug, Clone)]
pub struct TimedExecutor {
    client: Client,
    timeout: Duration,
}

impl TimedExecutor {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            timeout,
        }
    }

    pub fn with_timeout_ms(timeout_ms: u64) -> Self {
        Self::new(Duration::from_millis(timeout_ms))
    }

    /// The shared client; request builders passed to [`Self::execute`] should come from here.
    pub const fn client(&self) -> &Client {
        &self.client
    }

    pub fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }

    pub async fn execute(&self, request: RequestBuilder) -> Result<RawResponse, RequestError> {
        let timeout_ms = self.timeout_ms();

        let result = tokio::time::timeout(self.timeout, async {
            let response = request
                .send()
                .await
                .map_err(|e| map_transport_error(e, timeout_ms))?;
            let status = response.status();
            debug!(%status, "response received");

            if !status.is_success() {
                return Err(RequestError::Http {
                    status: status.as_u16(),
                });
            }

            let body = response
                .bytes()
                .await
                .map_err(|e| map_transport_error(e, timeout_ms))?;
            Ok(RawResponse { status, body })
        })
        .await;

        match result {
            Ok(outcome) => {
                if let Err(e) = &outcome {
                    warn!(error = %e, "request failed");
                }
                outcome
            }
            Err(_elapsed) => {
                warn!(timeout_ms, "request cancelled by deadline");
                Err(RequestError::Timeout { timeout_ms })
            }
        }
    }
}

impl Default for TimedExecutor {
    fn default() -> Self {
        Self::with_timeout_ms(DEFAULT_TIMEOUT_MS)
    }
}

fn map_transport_error(err: reqwest::Error, timeout_ms: u64) -> RequestError {
    if err.is_connect() {
        RequestError::Offline
    } else if err.is_timeout() {
        RequestError::Timeout { timeout_ms }
    } else if let Some(status) = err.status() {
        RequestError::Http {
            status: status.as_u16(),
        }
    } else {
        RequestError::Unknown(err.to_string())
    }
}

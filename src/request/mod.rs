//! Timed HTTP execution and failure classification.

mod error;
mod executor;

pub use error::{ConfigurationError, RequestError, ServiceError, classify};
pub use executor::{DEFAULT_TIMEOUT_MS, RawResponse, TimedExecutor};

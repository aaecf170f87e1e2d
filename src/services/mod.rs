//! Adapters for the remote language and completion services.
//!
//! Adapters report failures as [`ServiceError`] values and never panic; the
//! conversation layer decides which placeholder text to render for them.

mod language;
mod languages;
mod summary;

use futures_util::future::BoxFuture;

use crate::request::ServiceError;

pub use language::{GoogleLanguageService, parse_detection, parse_translation};
pub use languages::{TargetLanguage, language_name, print_languages, validate_language};
pub use summary::{OpenAiSummaryService, SUMMARY_INSTRUCTION, SUMMARY_TEMPERATURE, parse_summary};

/// Shown while detection is still running.
pub const DETECTION_PENDING: &str = "Detecting...";
/// Detection ran but the service gave no usable answer.
pub const DETECTION_UNKNOWN: &str = "unknown";
/// Detection could not be attempted or crashed.
pub const DETECTION_FAILED: &str = "Detection failed";
pub const TRANSLATION_FAILED: &str = "Translation failed";
pub const SUMMARIZATION_FAILED: &str = "Summarization failed";

/// Language detection and translation.
pub trait LanguageService: Send + Sync {
    /// Returns the language tag of the first detection candidate.
    fn detect<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<String, ServiceError>>;

    fn translate<'a>(
        &'a self,
        text: &'a str,
        target: TargetLanguage,
    ) -> BoxFuture<'a, Result<String, ServiceError>>;
}

/// Single-shot text summarization.
pub trait SummaryService: Send + Sync {
    fn summarize<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<String, ServiceError>>;
}

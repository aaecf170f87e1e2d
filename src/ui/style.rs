//! Consistent styling for terminal output, built on owo-colors.

use owo_colors::OwoColorize;
use std::fmt::Display;

/// Styles for the semantic elements of the chat and CLI output.
pub struct Style;

impl Style {
    /// Section headers ("Configuration", "Available commands")
    pub fn header<T: Display>(text: T) -> String {
        format!("{}", text.bold())
    }

    /// Labels and keys ("target", "model")
    pub fn label<T: Display>(text: T) -> String {
        format!("{}", text.dimmed())
    }

    /// Primary values (language names, model names)
    pub fn value<T: Display>(text: T) -> String {
        format!("{}", text.cyan())
    }

    /// Supplementary info (endpoints, descriptions)
    pub fn secondary<T: Display>(text: T) -> String {
        format!("{}", text.dimmed())
    }

    pub fn success<T: Display>(text: T) -> String {
        format!("{}", text.green())
    }

    pub fn error<T: Display>(text: T) -> String {
        format!("{}", text.red().bold())
    }

    pub fn warning<T: Display>(text: T) -> String {
        format!("{}", text.yellow())
    }

    /// Slash commands ("/summarize", "/help")
    pub fn command<T: Display>(text: T) -> String {
        format!("{}", text.green())
    }

    /// Language codes
    pub fn code<T: Display>(text: T) -> String {
        format!("{}", text.yellow())
    }

    /// Message numbers in the transcript
    pub fn message_id<T: Display>(text: T) -> String {
        format!("{}", text.bright_blue().bold())
    }

    /// Work that has been started but not finished
    pub fn pending<T: Display>(text: T) -> String {
        format!("{}", text.dimmed().italic())
    }

    pub fn default_marker() -> String {
        format!("{}", "(default)".dimmed())
    }

    pub fn version<T: Display>(text: T) -> String {
        format!("{}", text.dimmed())
    }
}

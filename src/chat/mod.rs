//! Interactive chat mode.
//!
//! Provides a REPL-style interface where each sent message has its language
//! detected, and slash commands request summaries and translations.

/// Slash command parsing and autocomplete.
pub mod command;
mod session;
mod ui;

pub use session::{ChatSession, SessionConfig};

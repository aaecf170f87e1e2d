//! # lingua - Language-aware terminal chat
//!
//! `lingua` is a chat-style terminal tool. Every message you send has its
//! language detected; English messages over 150 characters can be
//! summarized, and any message can be translated into one of six target
//! languages. Requests run in the background while you keep typing.
//!
//! ## Quick Start
//!
//! ```bash
//! # Interactive chat (the default)
//! lingua
//!
//! # Translate into Spanish by default
//! lingua chat --to es
//!
//! # One-shot commands read a file or stdin
//! lingua detect notes.txt
//! cat report.md | lingua summarize
//! lingua translate --to fr notes.txt
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/lingua/config.toml`:
//!
//! ```toml
//! [lingua]
//! to = "es"
//! timeout_ms = 10000
//!
//! [language]
//! api_key_env = "GOOGLE_TRANSLATE_API_KEY"
//!
//! [completion]
//! model = "gpt-4o-mini"
//! api_key_env = "OPENAI_API_KEY"
//! ```
//!
//! API keys are read from the environment (a `.env` file is honoured) and
//! checked before any request is sent.

/// Interactive chat mode.
pub mod chat;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management and credentials.
pub mod config;

/// Conversation state and the orchestrator that drives it.
pub mod conversation;

/// Input reading from files and stdin.
pub mod input;

/// XDG-style path utilities for configuration.
pub mod paths;

/// Timed HTTP execution and the failure taxonomy.
pub mod request;

/// Language and summary service adapters.
pub mod services;

/// Terminal UI components (spinner, colors).
pub mod ui;

use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

use super::load_config;
use crate::chat::{ChatSession, SessionConfig};
use crate::config::{ResolveOptions, ResolvedConfig};
use crate::conversation::Orchestrator;
use crate::request::TimedExecutor;
use crate::services::{GoogleLanguageService, OpenAiSummaryService};

pub struct ChatOptions {
    pub to: Option<String>,
    pub model: Option<String>,
    pub timeout_ms: Option<u64>,
}

pub async fn run_chat(options: ChatOptions) -> Result<()> {
    let config = load_config(&ResolveOptions {
        to: options.to,
        model: options.model,
        timeout_ms: options.timeout_ms,
    })?;
    debug!(language = %config.target, timeout_ms = config.timeout_ms, "starting chat");

    let mut session = ChatSession::new(SessionConfig::from_resolved(&config), orchestrator(&config));
    session.run().await
}

/// Wires the production services into an orchestrator. Both share one HTTP client.
pub fn orchestrator(config: &ResolvedConfig) -> Orchestrator {
    let executor = TimedExecutor::with_timeout_ms(config.timeout_ms);
    let language = GoogleLanguageService::from_config(config, executor.clone());
    let summarizer = OpenAiSummaryService::from_config(config, executor);

    Orchestrator::new(Arc::new(language), Arc::new(summarizer)).with_target(config.target)
}

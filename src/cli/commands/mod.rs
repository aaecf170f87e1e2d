//! Subcommand implementations.

/// Chat mode command handler.
pub mod chat;

/// Configure command handler.
pub mod configure;

/// One-shot detect, translate and summarize handlers.
pub mod oneshot;

use anyhow::Result;

use crate::config::{ConfigManager, ResolveOptions, ResolvedConfig, resolve_config};

/// Loads the config file and merges `options` over it.
pub(crate) fn load_config(options: &ResolveOptions) -> Result<ResolvedConfig> {
    let manager = ConfigManager::new()?;
    let file_config = manager.load_or_default()?;
    resolve_config(options, &file_config)
}

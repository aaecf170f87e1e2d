//! Configuration file management and credential checks.

mod credentials;
mod manager;

pub use credentials::{
    COMPLETION_API_KEY_ENV, Credential, Credentials, LANGUAGE_API_KEY_ENV,
};
pub use manager::{
    CompletionServiceConfig, ConfigFile, ConfigManager, DEFAULT_COMPLETION_ENDPOINT,
    DEFAULT_DETECT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TRANSLATE_ENDPOINT, LanguageServiceConfig,
    LinguaConfig, ResolveOptions, ResolvedConfig, resolve_config,
};

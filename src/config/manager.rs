use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use super::credentials::{COMPLETION_API_KEY_ENV, Credential, Credentials, LANGUAGE_API_KEY_ENV};
use crate::paths;
use crate::request::DEFAULT_TIMEOUT_MS;
use crate::services::TargetLanguage;

pub const DEFAULT_DETECT_ENDPOINT: &str =
    "https://translation.googleapis.com/language/translate/v2/detect";
pub const DEFAULT_TRANSLATE_ENDPOINT: &str =
    "https://translation.googleapis.com/language/translate/v2";
pub const DEFAULT_COMPLETION_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default settings in the `[lingua]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinguaConfig {
    /// Default target language (code or name).
    pub to: Option<String>,
    /// Per-request deadline in milliseconds.
    pub timeout_ms: Option<u64>,
}

/// The `[language]` section: detection and translation service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguageServiceConfig {
    #[serde(default)]
    pub detect_endpoint: Option<String>,
    #[serde(default)]
    pub translate_endpoint: Option<String>,
    /// API key stored directly in config (not recommended).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
}

/// The `[completion]` section: chat-completion service used for summaries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionServiceConfig {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_key_env: Option<String>,
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/lingua/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub lingua: LinguaConfig,
    #[serde(default)]
    pub language: LanguageServiceConfig,
    #[serde(default)]
    pub completion: CompletionServiceConfig,
}

/// Resolved configuration after merging CLI arguments, config file and defaults.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub target: TargetLanguage,
    pub timeout_ms: u64,
    pub detect_endpoint: String,
    pub translate_endpoint: String,
    pub completion_endpoint: String,
    pub model: String,
    pub credentials: Credentials,
}

/// CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub to: Option<String>,
    pub model: Option<String>,
    pub timeout_ms: Option<u64>,
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// Missing credentials are not an error here; they are reported by
/// [`Credentials::validate`] when a request is about to be made.
///
/// # Errors
///
/// Returns an error if the target language is not one of the supported ones
/// or the timeout is zero.
pub fn resolve_config(options: &ResolveOptions, config_file: &ConfigFile) -> Result<ResolvedConfig> {
    let target = options
        .to
        .as_ref()
        .or(config_file.lingua.to.as_ref())
        .map(|s| s.parse::<TargetLanguage>())
        .transpose()?
        .unwrap_or_default();

    let timeout_ms = options
        .timeout_ms
        .or(config_file.lingua.timeout_ms)
        .unwrap_or(DEFAULT_TIMEOUT_MS);
    if timeout_ms == 0 {
        anyhow::bail!("Invalid configuration: 'timeout_ms' must be greater than zero");
    }

    let model = options
        .model
        .as_ref()
        .or(config_file.completion.model.as_ref())
        .cloned()
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    let language = &config_file.language;
    let completion = &config_file.completion;

    let credentials = Credentials::new(
        Credential::from_env_or(
            language.api_key_env.as_deref().unwrap_or(LANGUAGE_API_KEY_ENV),
            language.api_key.clone(),
        ),
        Credential::from_env_or(
            completion
                .api_key_env
                .as_deref()
                .unwrap_or(COMPLETION_API_KEY_ENV),
            completion.api_key.clone(),
        ),
    );

    Ok(ResolvedConfig {
        target,
        timeout_ms,
        detect_endpoint: language
            .detect_endpoint
            .clone()
            .unwrap_or_else(|| DEFAULT_DETECT_ENDPOINT.to_string()),
        translate_endpoint: language
            .translate_endpoint
            .clone()
            .unwrap_or_else(|| DEFAULT_TRANSLATE_ENDPOINT.to_string()),
        completion_endpoint: completion
            .endpoint
            .clone()
            .unwrap_or_else(|| DEFAULT_COMPLETION_ENDPOINT.to_string()),
        model,
        credentials,
    })
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/lingua/config.toml`
    /// or `~/.config/lingua/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    pub const fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file: ConfigFile =
            toml::from_str(&contents).with_context(|| "Failed to parse config file")?;

        Ok(config_file)
    }

    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;

        fs::write(&self.config_path, contents).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;

        Ok(())
    }

    /// Loads the config file, treating a missing file as empty.
    ///
    /// A file that exists but fails to parse is still an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if self.config_path.exists() {
            self.load()
        } else {
            Ok(ConfigFile::default())
        }
    }
}

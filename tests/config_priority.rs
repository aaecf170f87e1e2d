#![allow(clippy::unwrap_used)]
//! Config priority contract tests.
//!
//! These tests verify that CLI options take priority over config file settings.
//! Priority order (highest to lowest):
//! 1. CLI arguments
//! 2. Config file defaults
//! 3. Built-in defaults

use lingua_chat::config::{
    CompletionServiceConfig, ConfigFile, DEFAULT_COMPLETION_ENDPOINT, DEFAULT_DETECT_ENDPOINT,
    DEFAULT_MODEL, LanguageServiceConfig, LinguaConfig, ResolveOptions, resolve_config,
};
use lingua_chat::services::TargetLanguage;

fn make_config_with_defaults() -> ConfigFile {
    ConfigFile {
        lingua: LinguaConfig {
            to: Some("pt".to_string()),
            timeout_ms: Some(4000),
        },
        language: LanguageServiceConfig {
            detect_endpoint: Some("http://language.local/detect".to_string()),
            translate_endpoint: Some("http://language.local/translate".to_string()),
            api_key: Some("config-language-key".to_string()),
            api_key_env: Some("LINGUA_PRIORITY_TEST_UNSET_1".to_string()),
        },
        completion: CompletionServiceConfig {
            endpoint: Some("http://completion.local/v1/chat/completions".to_string()),
            model: Some("config-model".to_string()),
            api_key: None,
            api_key_env: Some("LINGUA_PRIORITY_TEST_UNSET_2".to_string()),
        },
    }
}

#[test]
fn test_cli_options_override_config() {
    let config = make_config_with_defaults();
    let options = ResolveOptions {
        to: Some("ru".to_string()),
        model: Some("cli-model".to_string()),
        timeout_ms: Some(250),
    };

    let resolved = resolve_config(&options, &config).unwrap();

    assert_eq!(resolved.target, TargetLanguage::Russian);
    assert_eq!(resolved.model, "cli-model");
    assert_eq!(resolved.timeout_ms, 250);
}

#[test]
fn test_config_used_when_cli_not_specified() {
    let config = make_config_with_defaults();

    let resolved = resolve_config(&ResolveOptions::default(), &config).unwrap();

    assert_eq!(resolved.target, TargetLanguage::Portuguese);
    assert_eq!(resolved.model, "config-model");
    assert_eq!(resolved.timeout_ms, 4000);
    assert_eq!(resolved.detect_endpoint, "http://language.local/detect");
    assert_eq!(
        resolved.completion_endpoint,
        "http://completion.local/v1/chat/completions"
    );
}

#[test]
fn test_builtin_defaults_with_empty_config() {
    let resolved = resolve_config(&ResolveOptions::default(), &ConfigFile::default()).unwrap();

    assert_eq!(resolved.target, TargetLanguage::English);
    assert_eq!(resolved.model, DEFAULT_MODEL);
    assert_eq!(resolved.timeout_ms, 10_000);
    assert_eq!(resolved.detect_endpoint, DEFAULT_DETECT_ENDPOINT);
    assert_eq!(resolved.completion_endpoint, DEFAULT_COMPLETION_ENDPOINT);
}

#[test]
fn test_inline_key_used_when_env_var_unset() {
    let config = make_config_with_defaults();

    let resolved = resolve_config(&ResolveOptions::default(), &config).unwrap();

    assert_eq!(resolved.credentials.language.value(), "config-language-key");
    assert!(!resolved.credentials.completion.is_set());

    let err = resolved.credentials.validate().unwrap_err();
    assert_eq!(
        err.missing_keys.into_iter().collect::<Vec<_>>(),
        vec!["LINGUA_PRIORITY_TEST_UNSET_2"]
    );
}

#[test]
fn test_missing_credentials_do_not_fail_resolution() {
    let mut config = make_config_with_defaults();
    config.language.api_key = None;

    assert!(resolve_config(&ResolveOptions::default(), &config).is_ok());
}

#[test]
fn test_invalid_target_language_is_rejected() {
    let options = ResolveOptions {
        to: Some("klingon".to_string()),
        ..ResolveOptions::default()
    };

    let err = resolve_config(&options, &ConfigFile::default()).unwrap_err();
    assert!(err.to_string().contains("Invalid language code"));
}

#[test]
fn test_zero_timeout_is_rejected() {
    let options = ResolveOptions {
        timeout_ms: Some(0),
        ..ResolveOptions::default()
    };

    assert!(resolve_config(&options, &ConfigFile::default()).is_err());
}

#[test]
fn test_target_accepts_language_name_from_config() {
    let mut config = ConfigFile::default();
    config.lingua.to = Some("Spanish".to_string());

    let resolved = resolve_config(&ResolveOptions::default(), &config).unwrap();
    assert_eq!(resolved.target, TargetLanguage::Spanish);
}

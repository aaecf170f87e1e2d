//! Configure command handler for editing default settings.

use anyhow::{Result, bail};
use inquire::{Select, Text};

use crate::config::{
    ConfigFile, ConfigManager, Credential, DEFAULT_MODEL, LinguaConfig, ResolveOptions,
    ResolvedConfig, resolve_config,
};
use crate::request::DEFAULT_TIMEOUT_MS;
use crate::services::TargetLanguage;
use crate::ui::{Style, handle_prompt_cancellation};

/// Runs the configure command.
///
/// With `show`, prints the effective configuration; otherwise asks for the
/// default target language, summary model and request timeout.
pub fn run_configure(show: bool) -> Result<()> {
    if show {
        return show_config();
    }
    handle_prompt_cancellation(run_configure_inner)
}

fn show_config() -> Result<()> {
    let manager = ConfigManager::new()?;
    let file_config = manager.load_or_default()?;
    let resolved = resolve_config(&ResolveOptions::default(), &file_config)?;

    println!(
        "{} {}",
        Style::header("Config file"),
        Style::secondary(manager.config_path().display().to_string())
    );
    print_resolved(&resolved);
    Ok(())
}

fn print_resolved(config: &ResolvedConfig) {
    let rows = [
        (
            "to",
            Style::value(format!("{} ({})", config.target.code(), config.target.name())),
        ),
        ("model", Style::value(&config.model)),
        ("timeout_ms", Style::value(config.timeout_ms)),
        ("detect", Style::secondary(&config.detect_endpoint)),
        ("translate", Style::secondary(&config.translate_endpoint)),
        ("completion", Style::secondary(&config.completion_endpoint)),
    ];
    for (label, value) in rows {
        println!("  {}  {value}", Style::label(format!("{label:<12}")));
    }
    for credential in [&config.credentials.language, &config.credentials.completion] {
        println!(
            "  {}  {}",
            Style::label(format!("{:<12}", "key")),
            mask(credential)
        );
    }
    println!();
}

/// Never prints the key itself.
fn mask(credential: &Credential) -> String {
    let status = if credential.is_set() {
        Style::success("(set)")
    } else {
        Style::warning("(not set)")
    };
    format!("{} {status}", Style::code(&credential.name))
}

fn run_configure_inner() -> Result<()> {
    let manager = ConfigManager::new()?;
    let mut config = manager.load_or_default()?;

    print_current_defaults(&config);

    let to = select_target_language(config.lingua.to.as_deref())?;
    let model = prompt_model(config.completion.model.as_deref())?;
    let timeout_ms = prompt_timeout(config.lingua.timeout_ms)?;

    config.lingua = LinguaConfig {
        to: Some(to),
        timeout_ms: Some(timeout_ms),
    };
    config.completion.model = Some(model);

    manager.save(&config)?;

    println!();
    println!(
        "{} Configuration saved to {}",
        Style::success("✓"),
        Style::secondary(manager.config_path().display().to_string())
    );

    Ok(())
}

fn print_current_defaults(config: &ConfigFile) {
    let not_set = || Style::secondary("(not set)");

    println!("{}", Style::header("Current defaults"));
    println!(
        "  {}          {}",
        Style::label("to"),
        config.lingua.to.as_deref().map_or_else(not_set, Style::value)
    );
    println!(
        "  {}       {}",
        Style::label("model"),
        config
            .completion
            .model
            .as_deref()
            .map_or_else(not_set, Style::value)
    );
    println!(
        "  {}  {}",
        Style::label("timeout_ms"),
        config.lingua.timeout_ms.map_or_else(not_set, Style::value)
    );
    println!();
}

fn select_target_language(default: Option<&str>) -> Result<String> {
    let options: Vec<String> = TargetLanguage::ALL
        .iter()
        .map(|lang| format!("{} - {}", lang.code(), lang.name()))
        .collect();

    let default_index = default
        .and_then(|d| d.parse::<TargetLanguage>().ok())
        .and_then(|d| TargetLanguage::ALL.iter().position(|lang| *lang == d))
        .unwrap_or(0);

    let selection = Select::new("Default target language:", options)
        .with_starting_cursor(default_index)
        .prompt()?;

    let code = selection.split(" - ").next().unwrap_or(&selection);
    Ok(code.to_string())
}

fn prompt_model(default: Option<&str>) -> Result<String> {
    let model = Text::new("Summary model:")
        .with_default(default.unwrap_or(DEFAULT_MODEL))
        .prompt()?;

    let model = model.trim();
    if model.is_empty() {
        bail!("Model name cannot be empty");
    }
    Ok(model.to_string())
}

fn prompt_timeout(default: Option<u64>) -> Result<u64> {
    let default = default.unwrap_or(DEFAULT_TIMEOUT_MS).to_string();
    let input = Text::new("Request timeout (ms):")
        .with_default(&default)
        .prompt()?;

    parse_timeout(&input)
}

fn parse_timeout(input: &str) -> Result<u64> {
    match input.trim().parse::<u64>() {
        Ok(0) | Err(_) => bail!("Timeout must be a positive number of milliseconds"),
        Ok(ms) => Ok(ms),
    }
}

//! Non-interactive commands that run a single workflow over a file or stdin.

use anyhow::{Result, bail};

use super::load_config;
use crate::config::{ResolveOptions, ResolvedConfig};
use crate::conversation::{SUMMARY_MIN_CHARS, is_summarizable};
use crate::input::InputReader;
use crate::request::{ServiceError, TimedExecutor};
use crate::services::{
    DETECTION_PENDING, GoogleLanguageService, LanguageService, OpenAiSummaryService,
    SummaryService, language_name,
};
use crate::ui::Spinner;

pub async fn run_detect(file: Option<&str>) -> Result<()> {
    let config = load_config(&ResolveOptions::default())?;
    let text = InputReader::read_text(file)?;

    let tag = detect(&config, &text).await?;
    match language_name(&tag) {
        Some(name) => println!("{tag} ({name})"),
        None => println!("{tag}"),
    }
    Ok(())
}

pub async fn run_translate(file: Option<&str>, to: Option<String>) -> Result<()> {
    let config = load_config(&ResolveOptions {
        to,
        ..ResolveOptions::default()
    })?;
    let text = InputReader::read_text(file)?;

    let service = language_service(&config);
    let spinner = Spinner::new(&format!("Translating to {}...", config.target.name()));
    let result = service.translate(&text, config.target).await;
    spinner.stop();

    println!("{}", result.map_err(fail)?);
    Ok(())
}

pub async fn run_summarize(file: Option<&str>, model: Option<String>) -> Result<()> {
    let config = load_config(&ResolveOptions {
        model,
        ..ResolveOptions::default()
    })?;
    let text = InputReader::read_text(file)?;

    let tag = detect(&config, &text).await?;
    if !is_summarizable(&tag, &text) {
        bail!(
            "Error: Only English text longer than {SUMMARY_MIN_CHARS} characters can be summarized \
             (detected '{tag}', {} characters)",
            text.chars().count()
        );
    }

    let executor = TimedExecutor::with_timeout_ms(config.timeout_ms);
    let service = OpenAiSummaryService::from_config(&config, executor);
    let spinner = Spinner::new("Summarizing...");
    let result = service.summarize(&text).await;
    spinner.stop();

    println!("{}", result.map_err(fail)?);
    Ok(())
}

async fn detect(config: &ResolvedConfig, text: &str) -> Result<String> {
    let service = language_service(config);
    let spinner = Spinner::new(DETECTION_PENDING);
    let result = service.detect(text).await;
    spinner.stop();
    result.map_err(fail)
}

fn language_service(config: &ResolvedConfig) -> GoogleLanguageService {
    GoogleLanguageService::from_config(config, TimedExecutor::with_timeout_ms(config.timeout_ms))
}

fn fail(err: ServiceError) -> anyhow::Error {
    anyhow::anyhow!("Error: {}", err.user_message())
}

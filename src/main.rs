use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use lingua_chat::cli::commands::{chat, configure, oneshot};
use lingua_chat::cli::{Args, Command};
use lingua_chat::services::{print_languages, validate_language};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    init_tracing(args.verbose)?;

    match args.command {
        Some(Command::Languages) => {
            print_languages();
        }
        Some(Command::Configure { show }) => {
            configure::run_configure(show)?;
        }
        Some(Command::Detect { file }) => {
            oneshot::run_detect(file.as_deref()).await?;
        }
        Some(Command::Translate { file, to }) => {
            if let Some(ref lang) = to {
                validate_language(lang)?;
            }
            oneshot::run_translate(file.as_deref(), to).await?;
        }
        Some(Command::Summarize { file, model }) => {
            oneshot::run_summarize(file.as_deref(), model).await?;
        }
        Some(Command::Chat {
            to,
            model,
            timeout_ms,
        }) => {
            if let Some(ref lang) = to {
                validate_language(lang)?;
            }

            let options = chat::ChatOptions {
                to,
                model,
                timeout_ms,
            };
            chat::run_chat(options).await?;
        }
        None => {
            let options = chat::ChatOptions {
                to: None,
                model: None,
                timeout_ms: None,
            };
            chat::run_chat(options).await?;
        }
    }

    Ok(())
}

/// Logs go to stderr so they never mix with command output. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("lingua_chat={default_level}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    Ok(())
}

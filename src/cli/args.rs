use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "lingua")]
#[command(about = "Chat that detects, summarizes and translates what you type")]
#[command(version)]
pub struct Args {
    /// Log requests and workflow progress to stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive chat mode (default)
    Chat {
        /// Target language for translations (en, pt, es, ru, tr, fr)
        #[arg(short = 't', long = "to")]
        to: Option<String>,

        /// Model used for summaries
        #[arg(short = 'm', long)]
        model: Option<String>,

        /// Per-request timeout in milliseconds
        #[arg(long = "timeout-ms")]
        timeout_ms: Option<u64>,
    },
    /// Detect the language of a file or stdin
    Detect {
        /// File to read (reads from stdin if not provided)
        file: Option<String>,
    },
    /// Translate a file or stdin
    Translate {
        /// File to read (reads from stdin if not provided)
        file: Option<String>,

        /// Target language (en, pt, es, ru, tr, fr)
        #[arg(short = 't', long = "to")]
        to: Option<String>,
    },
    /// Summarize a file or stdin (English text over 150 characters)
    Summarize {
        /// File to read (reads from stdin if not provided)
        file: Option<String>,

        /// Model used for summaries
        #[arg(short = 'm', long)]
        model: Option<String>,
    },
    /// List supported target languages
    Languages,
    /// Configure lingua settings
    Configure {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

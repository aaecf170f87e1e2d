//! Chat mode UI components.

use super::session::SessionConfig;
use crate::conversation::{Conversation, Message, Sender, Update, UpdateKind};
use crate::services::{TargetLanguage, language_name};
use crate::ui::Style;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn print_header() {
    println!(
        "{} {} - Interactive Language Chat",
        Style::header("lingua"),
        Style::version(format!("v{VERSION}"))
    );
    println!();
}

pub fn print_goodbye() {
    println!("{}", Style::success("Goodbye!"));
}

pub fn print_config(config: &SessionConfig, target: TargetLanguage) {
    println!("{}", Style::header("Configuration"));
    println!(
        "  {}          {}",
        Style::label("to"),
        Style::value(format!("{} ({})", target.code(), target.name()))
    );
    println!(
        "  {}       {}",
        Style::label("model"),
        Style::value(&config.model)
    );
    println!(
        "  {}     {}",
        Style::label("timeout"),
        Style::value(format!("{} ms", config.timeout_ms))
    );
    println!(
        "  {}    {}",
        Style::label("language"),
        Style::secondary(&config.translate_endpoint)
    );
    println!(
        "  {}  {}",
        Style::label("completion"),
        Style::secondary(&config.completion_endpoint)
    );
    println!(
        "  {}        {}",
        Style::label("keys"),
        key_status(&config.missing_keys)
    );
    println!();
}

fn key_status(missing: &[String]) -> String {
    if missing.is_empty() {
        Style::success("all set")
    } else {
        Style::warning(format!("missing {}", missing.join(", ")))
    }
}

pub fn print_help() {
    println!("{}", Style::header("Available commands"));
    let rows = [
        ("/summarize [n]", "Summarize an English message over 150 characters"),
        ("/translate [n]", "Translate a message into the target language"),
        ("/to <lang>", "Set the target language (en, pt, es, ru, tr, fr)"),
        ("/history", "Show the conversation"),
        ("/wait", "Wait for pending requests"),
        ("/config", "Show current configuration"),
        ("/help", "Show this help"),
        ("/quit", "Exit chat mode"),
    ];
    for (command, description) in rows {
        println!(
            "  {}  {}",
            Style::command(format!("{command:<15}")),
            Style::secondary(description)
        );
    }
    println!(
        "\n  {}",
        Style::secondary("Without a number, the latest message you sent is used.")
    );
    println!();
}

/// Prints one message with everything known about it so far.
pub fn print_message(message: &Message) {
    let id = Style::message_id(message.id());
    match message.sender() {
        Sender::System => {
            println!("{id} {}", Style::secondary(message.text()));
        }
        Sender::User => {
            println!("{id} {}", message.text());
            println!("   {} {}", Style::label("language:"), detection_text(message));
            if let Some(summary) = message.summary() {
                println!("   {} {summary}", Style::label("summary:"));
            } else if message.summary_in_flight() {
                println!("   {} {}", Style::label("summary:"), Style::pending("..."));
            }
            if let Some(translation) = message.translation() {
                println!(
                    "   {} {translation}",
                    Style::label(format!("{}:", translation_label(message)))
                );
            } else if message.translation_in_flight() {
                println!(
                    "   {} {}",
                    Style::label("translation:"),
                    Style::pending("...")
                );
            }
        }
    }
}

fn detection_text(message: &Message) -> String {
    let detection = message.detection();
    if detection.is_pending() {
        return Style::pending(detection.label());
    }

    let mut text = match detection.tag().and_then(language_name) {
        Some(name) => format!("{} ({name})", Style::code(detection.label())),
        None => Style::value(detection.label()),
    };
    if message.is_summarizable() {
        text.push_str(&format!(
            "  {}",
            Style::secondary(format!("/summarize {}", message.id().index() + 1))
        ));
    }
    text
}

fn translation_label(message: &Message) -> String {
    message
        .translation_state()
        .value()
        .map_or_else(|| "translation".to_string(), |t| format!("translation {}", t.target))
}

/// Prints what changed for a message when one of its workflows finished.
pub fn print_update(conversation: &Conversation, update: Update) {
    let Some(message) = conversation.get(update.id) else {
        return;
    };
    let id = Style::message_id(update.id);

    match update.kind {
        UpdateKind::Detection => {
            println!("{id} {} {}", Style::label("language:"), detection_text(message));
        }
        UpdateKind::Summary => {
            if let Some(summary) = message.summary() {
                println!("{id} {} {summary}", Style::label("summary:"));
            }
        }
        UpdateKind::Translation => {
            if let Some(translation) = message.translation() {
                println!(
                    "{id} {} {translation}",
                    Style::label(format!("{}:", translation_label(message)))
                );
            }
        }
    }

    if !update.succeeded
        && let Some(error) = conversation.error()
    {
        print_banner(error);
    }
    println!();
}

pub fn print_history(conversation: &Conversation) {
    if conversation.is_empty() {
        println!("{}", Style::secondary("No messages yet."));
        println!();
        return;
    }
    for message in conversation.messages() {
        print_message(message);
    }
    if let Some(error) = conversation.error() {
        print_banner(error);
    }
    println!();
}

pub fn print_banner(message: &str) {
    eprintln!("{} {message}", Style::warning("!"));
}

pub fn print_error(message: &str) {
    eprintln!("{} {message}", Style::error("Error:"));
    eprintln!();
}

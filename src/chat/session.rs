use anyhow::Result;
use inquire::Text;
use inquire::ui::{Attributes, Color, RenderConfig, StyleSheet, Styled};

use super::command::{Input, SlashCommand, SlashCommandCompleter, parse_input};
use super::ui;
use crate::config::ResolvedConfig;
use crate::conversation::{Message, MessageId, Orchestrator, SendOutcome, Sender, UpdateKind};
use crate::services::{DETECTION_PENDING, TargetLanguage};
use crate::ui::{Spinner, Style, is_prompt_cancelled};

const WELCOME: &str = "Type a message to detect its language. English messages over 150 \
                       characters can be summarized, and any message you send can be translated.";

/// Settings shown by `/config`.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub model: String,
    pub timeout_ms: u64,
    pub translate_endpoint: String,
    pub completion_endpoint: String,
    /// Names of the credentials that are not configured.
    pub missing_keys: Vec<String>,
}

impl SessionConfig {
    pub fn from_resolved(config: &ResolvedConfig) -> Self {
        let missing_keys = config
            .credentials
            .validate()
            .err()
            .map(|e| e.missing_keys.into_iter().collect())
            .unwrap_or_default();

        Self {
            model: config.model.clone(),
            timeout_ms: config.timeout_ms,
            translate_endpoint: config.translate_endpoint.clone(),
            completion_endpoint: config.completion_endpoint.clone(),
            missing_keys,
        }
    }
}

/// An interactive chat session.
///
/// Sent messages wait for language detection before the next prompt;
/// summaries and translations run in the background and are printed as
/// they finish.
pub struct ChatSession {
    config: SessionConfig,
    orchestrator: Orchestrator,
}

impl ChatSession {
    pub fn new(config: SessionConfig, orchestrator: Orchestrator) -> Self {
        Self {
            config,
            orchestrator,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        ui::print_header();
        let welcome = self.orchestrator.announce(WELCOME);
        if let Some(message) = self.orchestrator.conversation().get(welcome) {
            ui::print_message(message);
            println!();
        }
        if !self.config.missing_keys.is_empty() {
            ui::print_banner(&format!(
                "Missing required credentials: {}",
                self.config.missing_keys.join(", ")
            ));
            println!();
        }

        let prompt_style = Styled::new("❯")
            .with_fg(Color::LightBlue)
            .with_attr(Attributes::BOLD);
        let mut render_config = RenderConfig::default()
            .with_prompt_prefix(prompt_style)
            .with_answered_prompt_prefix(prompt_style);

        render_config.option = StyleSheet::new().with_fg(Color::Grey);
        render_config.selected_option = Some(StyleSheet::new().with_fg(Color::DarkMagenta));

        loop {
            self.print_finished();

            let input = Text::new("")
                .with_render_config(render_config)
                .with_autocomplete(SlashCommandCompleter)
                .with_help_message("Type a message, /help for commands, Ctrl+C to quit")
                .prompt();

            match input {
                Ok(line) => match parse_input(&line) {
                    Input::Empty => {}
                    Input::Command(cmd) => {
                        if !self.handle_command(cmd).await {
                            break;
                        }
                    }
                    Input::Text(text) => self.send(&text).await,
                },
                Err(e) if is_prompt_cancelled(&e) => {
                    println!();
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }

        ui::print_goodbye();
        Ok(())
    }

    async fn handle_command(&mut self, cmd: SlashCommand) -> bool {
        match cmd {
            SlashCommand::Summarize(arg) => self.summarize(arg.as_deref()),
            SlashCommand::Translate(arg) => self.translate(arg.as_deref()),
            SlashCommand::To(value) => self.set_to(value.as_deref()),
            SlashCommand::History => ui::print_history(self.orchestrator.conversation()),
            SlashCommand::Wait => self.wait().await,
            SlashCommand::Config => {
                ui::print_config(&self.config, self.orchestrator.target_language());
            }
            SlashCommand::Help => ui::print_help(),
            SlashCommand::Quit => return false,
            SlashCommand::Unknown(cmd) => {
                ui::print_error(&format!("Unknown command: /{cmd}"));
            }
        }
        true
    }

    async fn send(&mut self, text: &str) {
        let id = match self.orchestrator.send(text) {
            SendOutcome::Sent(id) => id,
            SendOutcome::Empty => return,
            SendOutcome::Busy => {
                ui::print_error("Still detecting the previous message");
                return;
            }
        };

        let spinner = Spinner::new(DETECTION_PENDING);
        while let Some(update) = self.orchestrator.next_update().await {
            let detected = update.id == id && update.kind == UpdateKind::Detection;
            if detected {
                spinner.stop();
            }
            ui::print_update(self.orchestrator.conversation(), update);
            if detected {
                return;
            }
        }
        spinner.stop();
    }

    fn summarize(&mut self, arg: Option<&str>) {
        let Some(id) = self.resolve_message(arg) else {
            return;
        };
        match self.orchestrator.request_summary(id) {
            Ok(()) => println!(
                "{} {}\n",
                Style::message_id(id),
                Style::pending("Summarizing...")
            ),
            Err(e) => ui::print_error(&e.to_string()),
        }
    }

    fn translate(&mut self, arg: Option<&str>) {
        let Some(id) = self.resolve_message(arg) else {
            return;
        };
        match self.orchestrator.request_translation(id) {
            Ok(target) => println!(
                "{} {}\n",
                Style::message_id(id),
                Style::pending(format!("Translating to {}...", target.name()))
            ),
            Err(e) => ui::print_error(&e.to_string()),
        }
    }

    fn set_to(&mut self, value: Option<&str>) {
        let Some(value) = value else {
            let current = self.orchestrator.target_language();
            println!(
                "Target language: {} ({})",
                Style::value(current.code()),
                current.name()
            );
            println!("Usage: /to <language>\n");
            return;
        };

        match value.parse::<TargetLanguage>() {
            Ok(target) => {
                self.orchestrator.select_target_language(target);
                println!(
                    "{} Target language set to {}\n",
                    Style::success("✓"),
                    Style::value(target.name())
                );
            }
            Err(e) => ui::print_error(&e.to_string()),
        }
    }

    async fn wait(&mut self) {
        if self.orchestrator.in_flight() == 0 {
            println!("{}\n", Style::secondary("Nothing pending."));
            return;
        }

        let spinner = Spinner::new("Waiting for pending requests...");
        let updates = self.orchestrator.settle().await;
        spinner.stop();
        for update in updates {
            ui::print_update(self.orchestrator.conversation(), update);
        }
    }

    /// Prints workflows that finished while the prompt was open.
    fn print_finished(&mut self) {
        for update in self.orchestrator.poll_updates() {
            ui::print_update(self.orchestrator.conversation(), update);
        }
    }

    /// Maps a typed message number to an id, defaulting to the latest user message.
    fn resolve_message(&self, arg: Option<&str>) -> Option<MessageId> {
        let conversation = self.orchestrator.conversation();
        let id = match arg {
            Some(number) => MessageId::from_display(number),
            None => conversation
                .messages()
                .iter()
                .rev()
                .find(|m| m.sender() == Sender::User)
                .map(Message::id),
        };

        if id.is_none() {
            match arg {
                Some(number) => ui::print_error(&format!("Invalid message number: {number}")),
                None => ui::print_error("No messages yet"),
            }
        }
        id
    }
}

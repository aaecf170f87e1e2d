use inquire::autocompletion::{Autocomplete, Replacement};

// Available slash commands: (command, description)
pub const SLASH_COMMANDS: &[(&str, &str)] = &[
    ("/summarize", "Summarize message <n> (default: latest)"),
    ("/translate", "Translate message <n> (default: latest)"),
    ("/to", "Set the target language"),
    ("/history", "Show the conversation"),
    ("/wait", "Wait for pending requests"),
    ("/config", "Show current configuration"),
    ("/help", "Show available commands"),
    ("/quit", "Exit chat mode"),
];

/// Slash command autocompleter
#[derive(Clone, Default)]
pub struct SlashCommandCompleter;

impl Autocomplete for SlashCommandCompleter {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, inquire::CustomUserError> {
        // Only complete the command word itself, not its argument.
        if !input.starts_with('/') || input.contains(' ') {
            return Ok(vec![]);
        }

        let suggestions: Vec<String> = SLASH_COMMANDS
            .iter()
            .filter(|(cmd, _)| cmd.starts_with(input))
            .map(|(cmd, desc)| format!("{cmd}  {desc}"))
            .collect();

        Ok(suggestions)
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, inquire::CustomUserError> {
        let replacement =
            highlighted_suggestion.map(|s| s.split_whitespace().next().unwrap_or("").to_string());
        Ok(replacement)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    /// Message number as typed, if any.
    Summarize(Option<String>),
    Translate(Option<String>),
    To(Option<String>),
    History,
    Wait,
    Config,
    Help,
    Quit,
    Unknown(String),
}

#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Text(String),
    Command(SlashCommand),
    Empty,
}

pub fn parse_input(input: &str) -> Input {
    let input = input.trim();

    if input.is_empty() {
        return Input::Empty;
    }

    input
        .strip_prefix('/')
        .map_or_else(|| Input::Text(input.to_string()), parse_slash_command)
}

fn parse_slash_command(cmd: &str) -> Input {
    let mut parts = cmd.split_whitespace();
    let name = parts.next();
    let rest: Vec<&str> = parts.collect();
    let arg = (!rest.is_empty()).then(|| rest.join(" "));

    let command = match name {
        Some("summarize" | "sum" | "s") => SlashCommand::Summarize(arg),
        Some("translate" | "tr" | "t") => SlashCommand::Translate(arg),
        Some("to" | "lang") => SlashCommand::To(arg),
        Some("history" | "ls") => SlashCommand::History,
        Some("wait" | "w") => SlashCommand::Wait,
        Some("config") => SlashCommand::Config,
        Some("help" | "?") => SlashCommand::Help,
        Some("quit" | "exit" | "q") => SlashCommand::Quit,
        _ => SlashCommand::Unknown(cmd.trim().to_string()),
    };
    Input::Command(command)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_input() {
        assert_eq!(parse_input(""), Input::Empty);
        assert_eq!(parse_input("   "), Input::Empty);
    }

    #[test]
    fn test_parse_text_input_is_trimmed() {
        assert_eq!(
            parse_input("  Hello, world!  "),
            Input::Text("Hello, world!".to_string())
        );
    }

    #[test]
    fn test_parse_summarize_with_and_without_number() {
        assert_eq!(
            parse_input("/summarize 2"),
            Input::Command(SlashCommand::Summarize(Some("2".to_string())))
        );
        assert_eq!(
            parse_input("/s"),
            Input::Command(SlashCommand::Summarize(None))
        );
    }

    #[test]
    fn test_parse_translate_alias() {
        assert_eq!(
            parse_input("/t 3"),
            Input::Command(SlashCommand::Translate(Some("3".to_string())))
        );
    }

    #[test]
    fn test_parse_target_language() {
        assert_eq!(
            parse_input("/to es"),
            Input::Command(SlashCommand::To(Some("es".to_string())))
        );
        assert_eq!(parse_input("/to"), Input::Command(SlashCommand::To(None)));
    }

    #[test]
    fn test_parse_quit_commands() {
        for input in ["/quit", "/exit", "/q"] {
            assert_eq!(parse_input(input), Input::Command(SlashCommand::Quit));
        }
    }

    #[test]
    fn test_parse_unknown_command() {
        assert_eq!(
            parse_input("/frobnicate now"),
            Input::Command(SlashCommand::Unknown("frobnicate now".to_string()))
        );
    }

    #[test]
    fn test_completer_no_suggestions_for_regular_text() {
        let mut completer = SlashCommandCompleter;
        assert!(completer.get_suggestions("hello").unwrap().is_empty());
    }

    #[test]
    fn test_completer_lists_all_commands_for_slash() {
        let mut completer = SlashCommandCompleter;
        let suggestions = completer.get_suggestions("/").unwrap();
        assert_eq!(suggestions.len(), SLASH_COMMANDS.len());
    }

    #[test]
    fn test_completer_filters_by_prefix() {
        let mut completer = SlashCommandCompleter;

        let suggestions = completer.get_suggestions("/t").unwrap();
        assert_eq!(suggestions.len(), 2); // /translate, /to
        assert!(suggestions.iter().all(|s| s.starts_with("/t")));

        let suggestions = completer.get_suggestions("/su").unwrap();
        assert_eq!(suggestions.len(), 1);
        assert!(suggestions[0].starts_with("/summarize"));
    }

    #[test]
    fn test_completer_stops_after_argument() {
        let mut completer = SlashCommandCompleter;
        assert!(completer.get_suggestions("/to e").unwrap().is_empty());
    }

    #[test]
    fn test_completer_completion() {
        let mut completer = SlashCommandCompleter;
        let suggestion = "/history  Show the conversation".to_string();
        let completion = completer.get_completion("/h", Some(suggestion)).unwrap();
        assert_eq!(completion, Some("/history".to_string()));
    }
}

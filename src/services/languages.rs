//! Target languages offered for translation, and display names for detected tags.

use anyhow::{Result, bail};
use std::fmt;
use std::str::FromStr;

use crate::ui::Style;

/// The fixed set of languages a message can be translated into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TargetLanguage {
    #[default]
    English,
    Portuguese,
    Spanish,
    Russian,
    Turkish,
    French,
}

impl TargetLanguage {
    pub const ALL: [Self; 6] = [
        Self::English,
        Self::Portuguese,
        Self::Spanish,
        Self::Russian,
        Self::Turkish,
        Self::French,
    ];

    /// ISO 639-1 code sent to the translation service.
    pub const fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Portuguese => "pt",
            Self::Spanish => "es",
            Self::Russian => "ru",
            Self::Turkish => "tr",
            Self::French => "fr",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Portuguese => "Portuguese",
            Self::Spanish => "Spanish",
            Self::Russian => "Russian",
            Self::Turkish => "Turkish",
            Self::French => "French",
        }
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for TargetLanguage {
    type Err = anyhow::Error;

    /// Accepts either the code (`es`) or the English name (`spanish`), case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|lang| {
                lang.code().eq_ignore_ascii_case(needle) || lang.name().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Invalid language code: '{needle}'\n\n\
                     Valid target languages: en, pt, es, ru, tr, fr\n\
                     Run 'lingua languages' to see them all."
                )
            })
    }
}

/// Names for tags the detection service commonly returns.
const LANGUAGE_NAMES: &[(&str, &str)] = &[
    ("ar", "Arabic"),
    ("de", "German"),
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("hi", "Hindi"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("nl", "Dutch"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("sv", "Swedish"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("zh", "Chinese (Simplified)"),
    ("zh-TW", "Chinese (Traditional)"),
];

/// Human-readable name for a detected language tag, if known.
pub fn language_name(tag: &str) -> Option<&'static str> {
    LANGUAGE_NAMES
        .iter()
        .find(|(code, _)| *code == tag)
        .map(|(_, name)| *name)
}

/// Prints the selectable target languages to stdout.
pub fn print_languages() {
    println!("{}", Style::header("Target languages"));
    for lang in TargetLanguage::ALL {
        let marker = if lang == TargetLanguage::default() {
            format!(" {}", Style::default_marker())
        } else {
            String::new()
        };
        println!(
            "  {:5} {}{marker}",
            Style::code(lang.code()),
            Style::secondary(lang.name())
        );
    }
}

/// Validates a user-supplied target language.
pub fn validate_language(lang: &str) -> Result<TargetLanguage> {
    if lang.trim().is_empty() {
        bail!("Target language cannot be empty");
    }
    lang.parse()
}

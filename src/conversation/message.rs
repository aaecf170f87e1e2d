use std::fmt;

use crate::services::{
    DETECTION_FAILED, DETECTION_PENDING, DETECTION_UNKNOWN, SUMMARIZATION_FAILED, TRANSLATION_FAILED,
    TargetLanguage,
};

/// Messages longer than this many characters can be summarized.
pub const SUMMARY_MIN_CHARS: usize = 150;

/// The language tag a message must be detected as to be summarizable.
pub const SUMMARY_LANGUAGE: &str = "en";

/// Stable handle for a message, assigned when it is appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(usize);

impl MessageId {
    pub const fn from_index(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }

    /// Parses the 1-based number shown to users.
    pub fn from_display(number: &str) -> Option<Self> {
        let n: usize = number.trim().trim_start_matches('#').parse().ok()?;
        n.checked_sub(1).map(Self)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0 + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    System,
}

/// Outcome of language detection for one message. Leaves `Pending` at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    Pending,
    Detected(String),
    /// The service answered but no tag could be read from it.
    Unknown,
    /// Detection could not run at all.
    Failed,
    /// System messages are never sent for detection.
    NotApplicable,
}

impl Detection {
    pub fn label(&self) -> &str {
        match self {
            Self::Pending => DETECTION_PENDING,
            Self::Detected(tag) => tag,
            Self::Unknown => DETECTION_UNKNOWN,
            Self::Failed => DETECTION_FAILED,
            Self::NotApplicable => "-",
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Detected(tag) => Some(tag),
            _ => None,
        }
    }

    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// Issued per request so late completions can be matched to the request that is current.
pub type Ticket = u64;

/// Lifecycle of a per-message operation (summary or translation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationState<T> {
    Idle,
    InFlight {
        ticket: Ticket,
    },
    Done(T),
    Failed {
        reason: String,
    },
}

impl<T> OperationState<T> {
    pub const fn is_in_flight(&self) -> bool {
        matches!(self, Self::InFlight { .. })
    }

    pub const fn ticket(&self) -> Option<Ticket> {
        match self {
            Self::InFlight { ticket } => Some(*ticket),
            _ => None,
        }
    }

    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Done(value) => Some(value),
            _ => None,
        }
    }
}

/// A finished translation and the language it was requested in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    pub target: TargetLanguage,
}

/// Whether a message with this detected tag and text may be summarized.
///
/// Length is counted in `char`s, so an emoji counts once, not as two UTF-16 units.
pub fn is_summarizable(tag: &str, text: &str) -> bool {
    tag == SUMMARY_LANGUAGE && text.chars().count() > SUMMARY_MIN_CHARS
}

/// One chat entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    id: MessageId,
    text: String,
    sender: Sender,
    detection: Detection,
    summarizable: bool,
    summary: OperationState<String>,
    translation: OperationState<Translation>,
}

impl Message {
    pub(crate) fn user(id: MessageId, text: String) -> Self {
        Self::with_detection(id, text, Sender::User, Detection::Pending)
    }

    pub(crate) fn system(id: MessageId, text: String) -> Self {
        Self::with_detection(id, text, Sender::System, Detection::NotApplicable)
    }

    fn with_detection(id: MessageId, text: String, sender: Sender, detection: Detection) -> Self {
        Self {
            id,
            text,
            sender,
            detection,
            summarizable: false,
            summary: OperationState::Idle,
            translation: OperationState::Idle,
        }
    }

    pub const fn id(&self) -> MessageId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn sender(&self) -> Sender {
        self.sender
    }

    pub const fn detection(&self) -> &Detection {
        &self.detection
    }

    pub const fn is_summarizable(&self) -> bool {
        self.summarizable
    }

    pub const fn summary_state(&self) -> &OperationState<String> {
        &self.summary
    }

    pub const fn translation_state(&self) -> &OperationState<Translation> {
        &self.translation
    }

    /// The summary text, or the failure placeholder if the last attempt failed.
    pub fn summary(&self) -> Option<&str> {
        match &self.summary {
            OperationState::Done(text) => Some(text),
            OperationState::Failed { .. } => Some(SUMMARIZATION_FAILED),
            _ => None,
        }
    }

    pub const fn summary_in_flight(&self) -> bool {
        self.summary.is_in_flight()
    }

    /// The translated text, or the failure placeholder if the last attempt failed.
    pub fn translation(&self) -> Option<&str> {
        match &self.translation {
            OperationState::Done(t) => Some(&t.text),
            OperationState::Failed { .. } => Some(TRANSLATION_FAILED),
            _ => None,
        }
    }

    pub const fn translation_in_flight(&self) -> bool {
        self.translation.is_in_flight()
    }

    /// Records the detection result. Returns `false` if detection already finished.
    pub(crate) fn complete_detection(&mut self, detection: Detection) -> bool {
        if !self.detection.is_pending() {
            return false;
        }
        self.summarizable = detection
            .tag()
            .is_some_and(|tag| is_summarizable(tag, &self.text));
        self.detection = detection;
        true
    }

    pub(crate) fn summary_mut(&mut self) -> &mut OperationState<String> {
        &mut self.summary
    }

    pub(crate) fn translation_mut(&mut self) -> &mut OperationState<Translation> {
        &mut self.translation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn english(len: usize) -> String {
        "a".repeat(len)
    }

    #[test]
    fn test_message_id_display_is_one_based() {
        assert_eq!(MessageId::from_index(0).to_string(), "#1");
        assert_eq!(MessageId::from_display("3"), Some(MessageId::from_index(2)));
        assert_eq!(MessageId::from_display("#1"), Some(MessageId::from_index(0)));
        assert_eq!(MessageId::from_display("0"), None);
        assert_eq!(MessageId::from_display("x"), None);
    }

    #[test]
    fn test_summarizable_threshold() {
        assert!(!is_summarizable("en", "Hello"));
        assert!(!is_summarizable("en", &english(150)));
        assert!(is_summarizable("en", &english(151)));
        assert!(!is_summarizable("es", &english(400)));
    }

    #[test]
    fn test_summarizable_counts_emoji_once() {
        // 151 chars, but 302 UTF-16 units
        let text = "😀".repeat(151);
        assert!(is_summarizable("en", &text));
        assert!(!is_summarizable("en", &"😀".repeat(100)));
    }

    #[test]
    fn test_summarizable_counts_characters_not_bytes() {
        // 100 two-byte characters: 200 bytes but only 100 chars
        let text = "é".repeat(100);
        assert!(!is_summarizable("en", &text));
    }

    #[test]
    fn test_new_user_message_is_pending() {
        let message = Message::user(MessageId::from_index(0), "Hello".into());
        assert_eq!(message.detection().label(), "Detecting...");
        assert!(!message.is_summarizable());
        assert!(message.summary().is_none());
        assert!(message.translation().is_none());
    }

    #[test]
    fn test_detection_completes_once() {
        let mut message = Message::user(MessageId::from_index(0), english(200));

        assert!(message.complete_detection(Detection::Detected("en".into())));
        assert!(message.is_summarizable());

        assert!(!message.complete_detection(Detection::Failed));
        assert_eq!(message.detection(), &Detection::Detected("en".into()));
        assert!(message.is_summarizable());
    }

    #[test]
    fn test_failed_detection_is_not_summarizable() {
        let mut message = Message::user(MessageId::from_index(0), english(200));
        message.complete_detection(Detection::Failed);
        assert!(!message.is_summarizable());
        assert_eq!(message.detection().label(), "Detection failed");
    }

    #[test]
    fn test_failed_operations_render_placeholders() {
        let mut message = Message::user(MessageId::from_index(0), "Hi".into());
        *message.summary_mut() = OperationState::Failed {
            reason: "Invalid API key".into(),
        };
        *message.translation_mut() = OperationState::Failed {
            reason: "Invalid API key".into(),
        };
        assert_eq!(message.summary(), Some("Summarization failed"));
        assert_eq!(message.translation(), Some("Translation failed"));
    }

    #[test]
    fn test_system_message_skips_detection() {
        let message = Message::system(MessageId::from_index(0), "Welcome".into());
        assert_eq!(message.sender(), Sender::System);
        assert!(!message.detection().is_pending());
    }
}

//! Conversation state and the workflows that update it.
//!
//! A [`Conversation`] is only ever mutated by its [`Orchestrator`]; network
//! work runs in background tasks and reports back as completions.

mod message;
mod orchestrator;
mod transcript;

pub use message::{
    Detection, Message, MessageId, OperationState, SUMMARY_LANGUAGE, SUMMARY_MIN_CHARS, Sender,
    Ticket, Translation, is_summarizable,
};
pub use orchestrator::{Orchestrator, SendOutcome};
pub use transcript::{Completion, Conversation, Rejection, Update, UpdateKind};

//! Terminal UI components (spinner, colors, prompt handling).

use anyhow::Result;
use inquire::InquireError;

mod spinner;
mod style;

pub use spinner::Spinner;
pub use style::Style;

/// Whether the prompt ended because the user pressed Ctrl+C or Escape.
pub const fn is_prompt_cancelled(err: &InquireError) -> bool {
    matches!(
        err,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

/// Runs an interactive flow, turning user cancellation into a clean exit.
///
/// On cancellation a newline is printed to tidy the terminal and `Ok(())`
/// is returned; every other error is passed through.
pub fn handle_prompt_cancellation<F>(f: F) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    match f() {
        Err(e)
            if e.downcast_ref::<InquireError>()
                .is_some_and(is_prompt_cancelled) =>
        {
            println!();
            Ok(())
        }
        other => other,
    }
}

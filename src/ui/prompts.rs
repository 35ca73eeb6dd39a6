//! Interactive prompts.

use console::Term;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;

use crate::error::{Result, TrellisError};

use super::Prompt;

/// Convert dialoguer errors to TrellisError.
fn map_dialoguer_err(e: dialoguer::Error) -> TrellisError {
    TrellisError::Io(e.into())
}

/// Ask `prompt` on `term` and return the answer.
pub fn confirm_on(prompt: &Prompt, term: &Term, use_color: bool) -> Result<bool> {
    let theme = ColorfulTheme::default();
    let confirm = if use_color {
        Confirm::with_theme(&theme)
    } else {
        Confirm::new()
    };

    confirm
        .with_prompt(&prompt.question)
        .default(prompt.default)
        .interact_on(term)
        .map_err(map_dialoguer_err)
}

//! User confirmation handling for the calling layer.
//! The pipeline is non-interactive; the answer collected here is resolved
//! into the `ConflictPolicy` before any stage runs.

use crate::error::{Error, Result};
use dialoguer::Confirm;

/// Trait for asking the user yes/no questions.
pub trait Prompter {
    /// Asks a yes/no question.
    ///
    /// Returns `true` without interacting when `skip_confirm` is set.
    fn confirm(&self, skip_confirm: bool, prompt: String) -> Result<bool>;
}

/// Terminal prompter backed by dialoguer.
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        DialoguerPrompter::new()
    }
}

impl Prompter for DialoguerPrompter {
    fn confirm(&self, skip_confirm: bool, prompt: String) -> Result<bool> {
        if skip_confirm {
            return Ok(true);
        }
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| Error::PromptError(e.to_string()))
    }
}

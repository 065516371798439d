//! User-interaction boundary.
//!
//! The suggestion loop and config resolvers talk to the user only through
//! the [`Prompter`] trait, so they can be driven by scripted fakes in tests.
//! [`TerminalPrompter`] is the dialoguer-backed implementation.

use dialoguer::{Input, Password, Select};

use crate::error::PromptError;

/// Interactive prompts. Every method returns `Ok(None)` when the user
/// dismisses the prompt without answering.
pub trait Prompter: Send + Sync {
    /// Free-text input.
    fn prompt_text(&self, prompt: &str) -> Result<Option<String>, PromptError>;

    /// Hidden input for credentials.
    fn prompt_secret(&self, prompt: &str) -> Result<Option<String>, PromptError>;

    /// Single choice from a list; returns the selected index.
    fn prompt_choice(&self, prompt: &str, items: &[String]) -> Result<Option<usize>, PromptError>;
}

/// Terminal prompter backed by dialoguer.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn prompt_text(&self, prompt: &str) -> Result<Option<String>, PromptError> {
        let entered: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| PromptError::Interaction(e.to_string()))?;

        if entered.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(entered))
        }
    }

    fn prompt_secret(&self, prompt: &str) -> Result<Option<String>, PromptError> {
        let entered = Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .map_err(|e| PromptError::Interaction(e.to_string()))?;

        if entered.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(entered))
        }
    }

    fn prompt_choice(&self, prompt: &str, items: &[String]) -> Result<Option<usize>, PromptError> {
        Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact_opt()
            .map_err(|e| PromptError::Interaction(e.to_string()))
    }
}

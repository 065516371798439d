//! Error types for kommit modules using thiserror.

use thiserror::Error;

/// Errors from invoking the git binary.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git not found on PATH. Install git and try again.")]
    NotInstalled,

    #[error("Failed to spawn git process: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("`{command}` exited with code {code}: {stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("No staged changes to commit. Stage some changes first.")]
    NoStagedChanges,
}

/// Errors from the remote suggestion endpoint.
///
/// The caller does not distinguish error subtypes beyond transport vs.
/// non-success status; neither is retried.
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Failed to reach the suggestion endpoint: {0}")]
    RequestFailed(#[source] reqwest::Error),

    #[error("Suggestion endpoint returned status {status}: {body}")]
    BadStatus { status: u16, body: String },
}

/// Errors from interactive prompts.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Prompt failed: {0}")]
    Interaction(String),
}

/// Errors from credential and settings handling.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine the user config directory")]
    NoConfigDir,

    #[error("No API key entered. I can't work without one.")]
    MissingApiKey,

    #[error("Failed to save API key: {0}")]
    SaveFailed(#[source] std::io::Error),

    #[error(transparent)]
    Prompt(#[from] PromptError),
}

/// Errors from the suggestion loop.
#[derive(Error, Debug)]
pub enum SuggestError {
    #[error(transparent)]
    Generation(#[from] GeneratorError),

    #[error(transparent)]
    Prompt(#[from] PromptError),
}

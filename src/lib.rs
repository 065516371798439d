//! kommit - A CLI tool that turns staged git changes into AI-suggested commit messages.
//!
//! # Overview
//!
//! kommit collects the staged diff (plus recent log and branch name) from the
//! git binary, sends it to a remote suggestion endpoint, and lets the user
//! iteratively pick a generated commit message or request more suggestions.
//! The chosen message is committed with git.

pub mod config;
pub mod error;
pub mod generator;
pub mod git;
pub mod prompt;
pub mod suggest;

// Re-export commonly used types
pub use error::{ConfigError, GeneratorError, GitError, PromptError, SuggestError};
pub use generator::{HttpGenerator, MessageGenerator};
pub use git::{GitCli, VersionControl};
pub use prompt::{Prompter, TerminalPrompter};
pub use suggest::{ChangeContext, collect_change_context, run_suggestion_loop};

//! Shared test fakes for integration tests.
//!
//! Not all items are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use kommit::error::{GeneratorError, GitError, PromptError};
use kommit::generator::MessageGenerator;
use kommit::git::VersionControl;
use kommit::prompt::Prompter;
use kommit::suggest::ChangeContext;

/// Build a minimal change context with just a diff.
pub fn context(diff: &str) -> ChangeContext {
    ChangeContext {
        diff: diff.to_string(),
        history: None,
        branch_name: None,
        convention: None,
    }
}

/// Generator fake that replays queued responses and records each call's
/// prior-suggestions payload. An exhausted queue yields zero candidates.
pub struct QueueGenerator {
    responses: Mutex<VecDeque<Result<Vec<String>, GeneratorError>>>,
    pub priors: Mutex<Vec<Option<String>>>,
}

impl QueueGenerator {
    pub fn new(responses: Vec<Result<Vec<&str>, GeneratorError>>) -> Self {
        let owned = responses
            .into_iter()
            .map(|r| r.map(|v| v.into_iter().map(String::from).collect()))
            .collect();
        Self {
            responses: Mutex::new(owned),
            priors: Mutex::new(Vec::new()),
        }
    }

    pub fn recorded_priors(&self) -> Vec<Option<String>> {
        self.priors.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageGenerator for QueueGenerator {
    async fn suggest(
        &self,
        _ctx: &ChangeContext,
        prior_suggestions: Option<&str>,
    ) -> Result<Vec<String>, GeneratorError> {
        self.priors
            .lock()
            .unwrap()
            .push(prior_suggestions.map(String::from));

        match self.responses.lock().unwrap().pop_front() {
            Some(response) => response,
            None => Ok(Vec::new()),
        }
    }
}

/// Prompter fake replaying scripted choices and recording the item lists
/// it was shown.
pub struct ScriptedPrompter {
    choices: Mutex<VecDeque<Option<usize>>>,
    pub presented: Mutex<Vec<Vec<String>>>,
}

impl ScriptedPrompter {
    pub fn new(choices: Vec<Option<usize>>) -> Self {
        Self {
            choices: Mutex::new(choices.into()),
            presented: Mutex::new(Vec::new()),
        }
    }

    pub fn presented_lists(&self) -> Vec<Vec<String>> {
        self.presented.lock().unwrap().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn prompt_text(&self, _prompt: &str) -> Result<Option<String>, PromptError> {
        Ok(None)
    }

    fn prompt_secret(&self, _prompt: &str) -> Result<Option<String>, PromptError> {
        Ok(None)
    }

    fn prompt_choice(&self, _prompt: &str, items: &[String]) -> Result<Option<usize>, PromptError> {
        self.presented.lock().unwrap().push(items.to_vec());
        Ok(self
            .choices
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(None))
    }
}

/// Version-control fake with per-operation failure injection. A `None`
/// field makes that query fail; commits are recorded verbatim.
pub struct FakeGit {
    pub diff: Option<String>,
    pub log: Option<String>,
    pub branch: Option<String>,
    pub commits: Mutex<Vec<String>>,
}

impl FakeGit {
    pub fn new(diff: &str) -> Self {
        Self {
            diff: Some(diff.to_string()),
            log: Some("abc1234 previous commit".to_string()),
            branch: Some("main".to_string()),
            commits: Mutex::new(Vec::new()),
        }
    }

    pub fn recorded_commits(&self) -> Vec<String> {
        self.commits.lock().unwrap().clone()
    }

    fn failure(operation: &str) -> GitError {
        GitError::CommandFailed {
            command: format!("git {operation}"),
            code: 128,
            stderr: "injected failure".to_string(),
        }
    }
}

#[async_trait]
impl VersionControl for FakeGit {
    async fn staged_diff(&self) -> Result<String, GitError> {
        self.diff.clone().ok_or_else(|| Self::failure("diff"))
    }

    async fn recent_log(&self) -> Result<String, GitError> {
        self.log.clone().ok_or_else(|| Self::failure("log"))
    }

    async fn current_branch(&self) -> Result<String, GitError> {
        self.branch.clone().ok_or_else(|| Self::failure("branch"))
    }

    async fn commit(&self, message: &str) -> Result<(), GitError> {
        self.commits.lock().unwrap().push(message.to_string());
        Ok(())
    }
}

//! Git operations via the git binary.
//!
//! All version-control access goes through the [`VersionControl`] trait so
//! the suggestion flow can be tested with failure injection for each
//! operation. The real implementation, [`GitCli`], shells out to git with
//! tokio and captures stdout/stderr.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::GitError;

/// The version-control operations the suggestion flow depends on.
///
/// Three read-only queries plus one mutating commit.
#[async_trait]
pub trait VersionControl: Send + Sync {
    /// Textual patch output of the staged changes.
    async fn staged_diff(&self) -> Result<String, GitError>;

    /// Recent one-line commit history.
    async fn recent_log(&self) -> Result<String, GitError>;

    /// Name of the currently checked-out branch, trimmed.
    ///
    /// May be empty on a detached HEAD.
    async fn current_branch(&self) -> Result<String, GitError>;

    /// Create a commit with the given message.
    async fn commit(&self, message: &str) -> Result<(), GitError>;
}

/// [`VersionControl`] implementation backed by the git binary.
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    async fn run_git(&self, args: &[&str]) -> Result<String, GitError> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(GitError::SpawnFailed)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            let code = output.status.code().unwrap_or(-1);
            return Err(GitError::CommandFailed {
                command: format!("git {}", args.join(" ")),
                code,
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

#[async_trait]
impl VersionControl for GitCli {
    async fn staged_diff(&self) -> Result<String, GitError> {
        self.run_git(&["diff", "--staged"]).await
    }

    async fn recent_log(&self) -> Result<String, GitError> {
        self.run_git(&["log", "-10", "--oneline"]).await
    }

    async fn current_branch(&self) -> Result<String, GitError> {
        let output = self.run_git(&["branch", "--show-current"]).await?;
        Ok(output.trim().to_string())
    }

    async fn commit(&self, message: &str) -> Result<(), GitError> {
        // The commit goes through a shell with the message in double quotes,
        // so embedded double quotes must be escaped.
        let command = format!("git commit -m \"{}\"", escape_double_quotes(message));
        debug!(%command, "running commit");

        let output = Command::new("sh")
            .arg("-c")
            .arg(&command)
            .current_dir(&self.workdir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(GitError::SpawnFailed)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            let code = output.status.code().unwrap_or(-1);
            return Err(GitError::CommandFailed {
                command: "git commit".to_string(),
                code,
                stderr,
            });
        }

        Ok(())
    }
}

/// Check that the git binary is installed and runs.
///
/// Uses the `which` crate for cross-platform executable detection, then
/// verifies the binary actually executes.
pub async fn check_git_installed() -> Result<(), GitError> {
    if which::which("git").is_err() {
        return Err(GitError::NotInstalled);
    }

    let version_check = Command::new("git")
        .arg("--version")
        .output()
        .await
        .map_err(GitError::SpawnFailed)?;

    if !version_check.status.success() {
        return Err(GitError::NotInstalled);
    }

    Ok(())
}

/// Backslash-escape embedded double quotes for inclusion in a
/// double-quoted shell argument.
pub fn escape_double_quotes(message: &str) -> String {
    message.replace('"', "\\\"")
}

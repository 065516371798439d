//! The suggestion loop and its data handling.
//!
//! Drives repeated generation rounds until the user either selects a
//! concrete commit message or dismisses the picker. Candidates accumulate
//! across rounds (arrival order, no dedup) and the text of already-shown
//! candidates is fed back to the generator so it can avoid repeating
//! itself.

use tracing::debug;

use crate::error::{GitError, SuggestError};
use crate::generator::MessageGenerator;
use crate::git::VersionControl;
use crate::prompt::Prompter;

/// Menu entry that triggers another generation round instead of selecting
/// a message. Selection is by index, so a generated candidate with this
/// exact text is still an ordinary candidate.
pub const REQUEST_MORE: &str = "Request more suggestions";

/// Everything the generator needs to know about the pending change.
///
/// Immutable for the duration of one invocation. Only `diff` is required;
/// the rest is best-effort context.
#[derive(Debug, Clone)]
pub struct ChangeContext {
    pub diff: String,
    pub history: Option<String>,
    pub branch_name: Option<String>,
    pub convention: Option<String>,
}

/// Collect the change context from version control.
///
/// An empty or whitespace-only staged diff is fatal and happens before any
/// remote call. Log-history and branch-name failures degrade gracefully:
/// the flow continues with those fields unset.
pub async fn collect_change_context<V>(git: &V) -> Result<ChangeContext, GitError>
where
    V: VersionControl + ?Sized,
{
    let diff = git.staged_diff().await?;
    if diff.trim().is_empty() {
        return Err(GitError::NoStagedChanges);
    }

    let history = match git.recent_log().await {
        Ok(log) => Some(log),
        Err(e) => {
            eprintln!("Warning: could not read git log: {}. Continuing without.", e);
            None
        }
    };

    let branch_name = match git.current_branch().await {
        Ok(branch) => {
            let branch = branch.trim().to_string();
            if branch.is_empty() { None } else { Some(branch) }
        }
        Err(e) => {
            eprintln!(
                "Warning: could not read current branch name: {}. Continuing without.",
                e
            );
            None
        }
    };

    Ok(ChangeContext {
        diff,
        history,
        branch_name,
        convention: None,
    })
}

/// Formatted-string accumulator of candidates already shown to the user.
///
/// Updated once per loop iteration: each not-yet-folded candidate is
/// appended as a `* <candidate>` bullet, bullets joined by `", "`. Folding
/// with no new candidates leaves the text unchanged.
#[derive(Debug, Default)]
pub struct ShownSuggestions {
    text: String,
    folded: usize,
}

impl ShownSuggestions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold candidates beyond the already-folded prefix into the text.
    pub fn fold(&mut self, candidates: &[String]) {
        for candidate in &candidates[self.folded..] {
            if !self.text.is_empty() {
                self.text.push_str(", ");
            }
            self.text.push_str("* ");
            self.text.push_str(candidate);
        }
        self.folded = candidates.len();
    }

    /// The accumulated text, or `None` while nothing has been shown.
    pub fn as_payload(&self) -> Option<&str> {
        if self.text.is_empty() {
            None
        } else {
            Some(&self.text)
        }
    }
}

/// Run the interactive suggestion loop.
///
/// Returns `Ok(Some(message))` when the user picks a candidate and
/// `Ok(None)` when they dismiss the picker. A generation or prompt failure
/// aborts the loop; there is no automatic retry and no iteration cap —
/// "request more" with zero new candidates simply re-shows the stale list.
pub async fn run_suggestion_loop<G, P>(
    ctx: &ChangeContext,
    generator: &G,
    prompter: &P,
) -> Result<Option<String>, SuggestError>
where
    G: MessageGenerator + ?Sized,
    P: Prompter + ?Sized,
{
    let mut candidates: Vec<String> = Vec::new();
    let mut shown = ShownSuggestions::new();

    loop {
        shown.fold(&candidates);

        let new_candidates = generator.suggest(ctx, shown.as_payload()).await?;
        debug!(count = new_candidates.len(), "received new candidates");
        candidates.extend(new_candidates);

        let mut items: Vec<String> = candidates.clone();
        items.push(REQUEST_MORE.to_string());

        let choice =
            prompter.prompt_choice("Select a commit message or request new ones", &items)?;

        match choice {
            None => return Ok(None),
            Some(index) if index >= candidates.len() => continue,
            Some(index) => return Ok(Some(candidates[index].clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msgs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_accumulator_empty_yields_no_payload() {
        let mut shown = ShownSuggestions::new();
        shown.fold(&[]);
        assert_eq!(shown.as_payload(), None);
    }

    #[test]
    fn test_accumulator_formats_bullets() {
        let mut shown = ShownSuggestions::new();
        shown.fold(&msgs(&["feat: add foo", "chore: add file"]));
        assert_eq!(
            shown.as_payload(),
            Some("* feat: add foo, * chore: add file")
        );
    }

    #[test]
    fn test_accumulator_folds_only_new_candidates() {
        let mut shown = ShownSuggestions::new();
        let mut candidates = msgs(&["a", "b"]);
        shown.fold(&candidates);
        candidates.push("c".to_string());
        shown.fold(&candidates);
        assert_eq!(shown.as_payload(), Some("* a, * b, * c"));
    }

    #[test]
    fn test_accumulator_refold_is_idempotent() {
        let mut shown = ShownSuggestions::new();
        let candidates = msgs(&["a", "b"]);
        shown.fold(&candidates);
        let first = shown.as_payload().map(str::to_string);
        shown.fold(&candidates);
        assert_eq!(shown.as_payload().map(str::to_string), first);
    }

    #[test]
    fn test_accumulator_keeps_duplicate_candidates() {
        let mut shown = ShownSuggestions::new();
        shown.fold(&msgs(&["same", "same"]));
        assert_eq!(shown.as_payload(), Some("* same, * same"));
    }
}

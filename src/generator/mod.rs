//! Commit-message generation boundary.
//!
//! The suggestion loop only sees the [`MessageGenerator`] trait; the real
//! implementation is [`HttpGenerator`], which talks to the remote endpoint.

pub mod http;

use async_trait::async_trait;

pub use http::{DEFAULT_ENDPOINT, HttpGenerator};

use crate::error::GeneratorError;
use crate::suggest::ChangeContext;

/// One generation round: context in, zero or more candidate messages out.
///
/// `prior_suggestions` is the formatted text of candidates already shown to
/// the user, so the generator can avoid repeating itself.
#[async_trait]
pub trait MessageGenerator: Send + Sync {
    async fn suggest(
        &self,
        ctx: &ChangeContext,
        prior_suggestions: Option<&str>,
    ) -> Result<Vec<String>, GeneratorError>;
}

/// Split a newline-delimited response into candidate messages.
///
/// Each line is trimmed; empty lines are dropped. An empty input yields
/// zero candidates.
pub fn parse_candidates(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

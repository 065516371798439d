//! HTTP client for the suggestion endpoint.
//!
//! One POST per generation round. The endpoint answers with a single
//! newline-delimited `commit_messages` string; a missing field means zero
//! candidates, not an error.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GeneratorError;
use crate::generator::{MessageGenerator, parse_candidates};
use crate::suggest::ChangeContext;

/// Default suggestion endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/ai";

/// Header carrying the API credential.
const API_KEY_HEADER: &str = "X-Api-Key";

/// Branch name sent when the repository has none (e.g. detached HEAD).
const FALLBACK_BRANCH: &str = "main";

/// Request body for one generation round.
#[derive(Serialize)]
struct SuggestRequest<'a> {
    diff: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_history: Option<&'a str>,
    branch_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    conventions: Option<&'a str>,
    #[serde(rename = "lastSuggests", skip_serializing_if = "Option::is_none")]
    last_suggests: Option<&'a str>,
}

/// Response body; `commit_messages` holds newline-delimited candidates.
#[derive(Deserialize)]
struct SuggestResponse {
    commit_messages: Option<String>,
}

/// [`MessageGenerator`] backed by the remote HTTP endpoint.
///
/// Stateless from the caller's perspective; no timeout is enforced on the
/// request, matching the interactive-tool usage where a hang is visible to
/// the user.
pub struct HttpGenerator {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl HttpGenerator {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl MessageGenerator for HttpGenerator {
    async fn suggest(
        &self,
        ctx: &ChangeContext,
        prior_suggestions: Option<&str>,
    ) -> Result<Vec<String>, GeneratorError> {
        let request = SuggestRequest {
            diff: &ctx.diff,
            last_history: ctx.history.as_deref(),
            branch_name: ctx.branch_name.as_deref().unwrap_or(FALLBACK_BRANCH),
            conventions: ctx.convention.as_deref(),
            last_suggests: prior_suggestions,
        };

        debug!(endpoint = %self.endpoint, "requesting commit message suggestions");

        let response = self
            .client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(GeneratorError::RequestFailed)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeneratorError::BadStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body: SuggestResponse = response
            .json()
            .await
            .map_err(GeneratorError::RequestFailed)?;

        Ok(parse_candidates(body.commit_messages.as_deref().unwrap_or_default()))
    }
}

//! GitHub host service implementation

use crate::config::Config;
use crate::error::{Error, Result};
use crate::platform::HostService;
use crate::types::{PrState, PullRequestSnapshot, ReportableStatus};
use async_trait::async_trait;
use octocrab::Octocrab;
use reqwest::Client;
use tracing::debug;

/// The host truncates status descriptions beyond this many characters.
const MAX_DESCRIPTION_LENGTH: usize = 140;

/// GitHub service using octocrab for typed calls and raw HTTP for the
/// commit-status endpoint.
pub struct GitHubService {
    client: Octocrab,
    config: Config,
    /// Token for raw HTTP requests (status publishing)
    token: String,
    /// HTTP client for raw requests (status publishing)
    http_client: Client,
    /// API base URL for raw requests
    api_base: String,
}

impl GitHubService {
    /// Create a new GitHub service
    pub fn new(token: &str, config: Config) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());

        let api_base = config.api_base();
        if config.host.is_some() {
            builder = builder
                .base_uri(&api_base)
                .map_err(|e| Error::GitHubApi(e.to_string()))?;
        }

        let client = builder
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        let http_client = Client::builder()
            .user_agent("branch-gate")
            .build()
            .map_err(|e| Error::GitHubApi(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            token: token.to_string(),
            http_client,
            api_base,
        })
    }
}

/// Clamp a description to the host's length limit.
fn truncate_description(description: &str) -> String {
    if description.chars().count() <= MAX_DESCRIPTION_LENGTH {
        return description.to_string();
    }
    let mut truncated: String = description
        .chars()
        .take(MAX_DESCRIPTION_LENGTH - 3)
        .collect();
    truncated.push_str("...");
    truncated
}

/// Helper to convert an octocrab PR to our `PullRequestSnapshot` type
fn snapshot_from_octocrab(pr: &octocrab::models::pulls::PullRequest) -> PullRequestSnapshot {
    let state = match pr.state {
        Some(octocrab::models::IssueState::Open) => PrState::Open,
        Some(octocrab::models::IssueState::Closed) if pr.merged_at.is_some() => PrState::Merged,
        // IssueState is non-exhaustive, so use wildcard for Closed and any future variants
        Some(_) | None => PrState::Closed,
    };

    PullRequestSnapshot {
        number: pr.number,
        title: pr.title.clone().unwrap_or_default(),
        state,
        is_draft: pr.draft.unwrap_or(false),
        head_sha: pr.head.sha.clone(),
        head_ref: pr.head.ref_field.clone(),
        base_ref: pr.base.ref_field.clone(),
        labels: pr
            .labels
            .clone()
            .unwrap_or_default()
            .into_iter()
            .map(|l| l.name)
            .collect(),
    }
}

#[async_trait]
impl HostService for GitHubService {
    async fn fetch_pull_request(&self, number: u64) -> Result<PullRequestSnapshot> {
        debug!(number, "fetching pull request");
        let pr = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .get(number)
            .await
            .map_err(|e| match &e {
                octocrab::Error::GitHub { source, .. }
                    if source.status_code.as_u16() == 404 =>
                {
                    Error::PullRequestNotFound(number)
                }
                _ => Error::GitHubApi(e.to_string()),
            })?;

        let snapshot = snapshot_from_octocrab(&pr);
        debug!(number, state = %snapshot.state, head = %snapshot.head_sha, "fetched pull request");
        Ok(snapshot)
    }

    async fn publish_status(&self, head_sha: &str, status: &ReportableStatus) -> Result<()> {
        debug!(head_sha, state = %status.state, "publishing commit status");

        let url = format!(
            "{}/repos/{}/{}/statuses/{head_sha}",
            self.api_base, self.config.owner, self.config.repo
        );

        let body = serde_json::json!({
            "state": status.state,
            "description": truncate_description(&status.description),
            "context": self.config.status_context,
        });

        let response = self
            .http_client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to publish status: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::GitHubApi(format!(
                "status publication returned {}",
                response.status()
            )));
        }

        debug!(head_sha, "published commit status");
        Ok(())
    }
}

//! Host platform services
//!
//! Provides the boundary to the source-control host: fetching the pull
//! request under check and publishing the resolved commit status.

mod github;

pub use github::GitHubService;

use crate::error::Result;
use crate::types::{PullRequestSnapshot, ReportableStatus};
use async_trait::async_trait;

/// Host service trait for the two wire operations the tool needs.
///
/// The decision engine never talks to the host directly; it hands its
/// result to this boundary, which keeps the engine testable against mocks.
#[async_trait]
pub trait HostService: Send + Sync {
    /// Fetch the host's current view of a pull request.
    async fn fetch_pull_request(&self, number: u64) -> Result<PullRequestSnapshot>;

    /// Publish a status against a head revision, filed under the
    /// configured context label.
    async fn publish_status(&self, head_sha: &str, status: &ReportableStatus) -> Result<()>;
}

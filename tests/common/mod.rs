//! Shared fixtures for unit and integration tests

pub mod mocks;

#[allow(unused_imports)]
pub use mocks::{MockHostService, MockMergeStrategy};

use branch_gate::Config;
use branch_gate::types::{ChangeRequest, PrState, PullRequestSnapshot, ValidationFailure};

/// Config pointing at a test repository with default policy.
#[allow(dead_code)]
pub fn test_config() -> Config {
    Config::load("octo".to_string(), "repo".to_string(), None, None).unwrap()
}

/// Change request with the given target branches and failures.
#[allow(dead_code)]
pub fn make_request(branches: &[&str], failures: Vec<ValidationFailure>) -> ChangeRequest {
    ChangeRequest {
        number: 42,
        head_sha: "abc123".to_string(),
        target_branches: branches.iter().map(ToString::to_string).collect(),
        validation_failures: failures,
    }
}

/// Open, non-draft PR snapshot with a conventional title.
#[allow(dead_code)]
pub fn make_snapshot(number: u64, base: &str, labels: &[&str]) -> PullRequestSnapshot {
    PullRequestSnapshot {
        number,
        title: "fix: keep the widget from tipping over".to_string(),
        state: PrState::Open,
        is_draft: false,
        head_sha: format!("head_sha_{number}"),
        head_ref: "fix-widget".to_string(),
        base_ref: base.to_string(),
        labels: labels.iter().map(ToString::to_string).collect(),
    }
}

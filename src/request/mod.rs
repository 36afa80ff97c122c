//! Change-request loading and validation
//!
//! Builds the read-only [`ChangeRequest`] the decision engine consumes:
//! fetches the host's snapshot, derives the declared target branches, and
//! runs the validation pass that yields fatal or advisory failures.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::platform::HostService;
use crate::types::{ChangeRequest, PrState, PullRequestSnapshot, ValidationFailure};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, info};

/// Conventional title form: `type(optional scope): summary`.
static TITLE_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(build|ci|docs|feat|fix|perf|refactor|test|chore)(\([^)]+\))?: \S.*$")
        .expect("title format pattern is valid")
});

/// Load and validate a pull request into a [`ChangeRequest`].
///
/// A pull request that is not open is an invocation-level error: there is
/// nothing to check and no status to publish.
pub async fn load_change_request(
    host: &dyn HostService,
    number: u64,
    config: &Config,
) -> Result<ChangeRequest> {
    let snapshot = host.fetch_pull_request(number).await?;

    if snapshot.state != PrState::Open {
        return Err(Error::PullRequestNotOpen {
            number,
            state: snapshot.state,
        });
    }

    let target_branches = target_branches(&snapshot, config);
    let validation_failures = validate(&snapshot, config);
    debug!(
        pr = number,
        targets = ?target_branches,
        failures = validation_failures.len(),
        "loaded change request"
    );

    Ok(ChangeRequest {
        number,
        head_sha: snapshot.head_sha,
        target_branches,
        validation_failures,
    })
}

/// Derive the declared target branches for a pull request.
///
/// The base branch always comes first; labels carrying the configured
/// prefix (e.g. `target: 20.x`) append extra branches in label order.
/// Duplicates are dropped, preserving first occurrence.
pub fn target_branches(snapshot: &PullRequestSnapshot, config: &Config) -> Vec<String> {
    let mut branches = vec![snapshot.base_ref.clone()];

    for label in &snapshot.labels {
        if let Some(branch) = label.strip_prefix(&config.target_label_prefix) {
            let branch = branch.trim();
            if !branch.is_empty() && !branches.iter().any(|b| b == branch) {
                branches.push(branch.to_string());
            }
        }
    }

    branches
}

/// Run the validation pass over a pull request snapshot.
pub fn validate(snapshot: &PullRequestSnapshot, config: &Config) -> Vec<ValidationFailure> {
    let mut failures = Vec::new();

    if snapshot.title.chars().count() > config.max_title_length {
        failures.push(ValidationFailure::advisory(format!(
            "title too long ({} characters, max {})",
            snapshot.title.chars().count(),
            config.max_title_length
        )));
    }

    if !TITLE_FORMAT.is_match(&snapshot.title) {
        failures.push(ValidationFailure::advisory(
            "title does not follow the `type(scope): summary` format",
        ));
    }

    if snapshot.is_draft {
        failures.push(ValidationFailure::fatal(
            "pull request is still marked as a draft",
        ));
    }

    if config.require_target_label {
        let has_target_label = snapshot
            .labels
            .iter()
            .any(|l| l.starts_with(&config.target_label_prefix));
        if !has_target_label {
            failures.push(ValidationFailure::fatal("missing target label"));
        }
    }

    failures
}

/// Decide whether any failure is fatal (not force-ignorable).
///
/// Logs every failure's message for operator visibility; the log is a
/// pass-through diagnostic and plays no part in the verdict. Total over
/// its input, including the empty slice.
pub fn has_fatal_failures(failures: &[ValidationFailure]) -> bool {
    let mut has_fatal = false;
    for failure in failures {
        info!(fatal = !failure.can_be_force_ignored, "validation failure: {}", failure.message);
        has_fatal = !failure.can_be_force_ignored || has_fatal;
    }
    has_fatal
}

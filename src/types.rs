//! Core types for branch-gate

use serde::{Deserialize, Serialize};

/// A single problem found while validating a pull request.
///
/// Produced by the validation pass before any mergeability work happens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationFailure {
    /// Human-readable description of the problem
    pub message: String,
    /// Whether the failure may be downgraded to advisory
    ///
    /// A failure with `can_be_force_ignored == false` is fatal: it blocks
    /// any mergeability judgment until resolved.
    pub can_be_force_ignored: bool,
}

impl ValidationFailure {
    /// An advisory failure: surfaced, but does not block the merge check.
    pub fn advisory(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            can_be_force_ignored: true,
        }
    }

    /// A fatal failure: blocks the merge check entirely.
    pub fn fatal(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            can_be_force_ignored: false,
        }
    }
}

/// A pull request as the decision engine sees it.
///
/// Loaded once per invocation and read-only thereafter. `target_branches`
/// is never empty: the base branch is always the first entry.
#[derive(Debug, Clone)]
pub struct ChangeRequest {
    /// PR number on the host
    pub number: u64,
    /// SHA of the head commit the status will be attached to
    pub head_sha: String,
    /// Branches the change must merge cleanly into, in declared order
    pub target_branches: Vec<String>,
    /// Problems found by the validation pass
    pub validation_failures: Vec<ValidationFailure>,
}

/// Outcome of the mergeability check, produced exactly once per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Every target branch merges without conflict
    Clean,
    /// A specific subset of branches conflicted
    Conflict {
        /// The conflicting branches, in declared target order; never empty
        failed_branches: Vec<String>,
    },
    /// The check failed for a reason with no specific failed-branch set
    Error {
        /// Internal detail; logged, never published
        detail: String,
    },
}

/// Commit-status states understood by the host.
///
/// The resolver only ever produces `Pending`, `Failure`, or `Success`;
/// `Error` exists because it is part of the host's status vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusState {
    /// Mergeability has not been judged yet
    Pending,
    /// The host's error state (unused by the resolver)
    Error,
    /// The change cannot be merged cleanly
    Failure,
    /// The change merges cleanly into every target branch
    Success,
}

impl std::fmt::Display for StatusState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Error => write!(f, "error"),
            Self::Failure => write!(f, "failure"),
            Self::Success => write!(f, "success"),
        }
    }
}

/// The status record published against the pull request's head revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportableStatus {
    /// Terminal state for this invocation
    pub state: StatusState,
    /// Human-readable explanation shown next to the check
    pub description: String,
}

/// PR state (open, closed, merged)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrState {
    /// PR is open and can be checked
    Open,
    /// PR was closed without merging
    Closed,
    /// PR was merged
    Merged,
}

impl std::fmt::Display for PrState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
            Self::Merged => write!(f, "merged"),
        }
    }
}

/// The host's view of a pull request, fetched once per invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestSnapshot {
    /// PR number
    pub number: u64,
    /// PR title
    pub title: String,
    /// Current state of the PR
    pub state: PrState,
    /// Whether the PR is a draft
    pub is_draft: bool,
    /// SHA of the head commit
    pub head_sha: String,
    /// Head branch name
    pub head_ref: String,
    /// Base branch name
    pub base_ref: String,
    /// Label names attached to the PR, in host order
    pub labels: Vec<String>,
}

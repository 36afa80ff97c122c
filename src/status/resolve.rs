//! Status resolution - pure functions mapping outcomes to statuses
//!
//! No I/O happens here. Every reportable state and description is a pure
//! function of the classifier verdict and the merge outcome, which keeps
//! the transition table total and easy to unit test.

use crate::types::{MergeOutcome, ReportableStatus, StatusState};

/// Description published while fatal validation failures are unresolved.
pub const PENDING_DESCRIPTION: &str = "waiting to check mergeability due to failing status(es)";

/// Description published when the check failed without a failed-branch set.
///
/// Deliberately generic: the internal error detail stays in the logs and
/// never reaches the published status.
pub const UNMERGEABLE_DESCRIPTION: &str =
    "Cannot cleanly merge to all target branches, please update changes or PR target";

/// Status for a request whose fatal validation failures block the check.
pub fn pending_status() -> ReportableStatus {
    ReportableStatus {
        state: StatusState::Pending,
        description: PENDING_DESCRIPTION.to_string(),
    }
}

/// Map a merge outcome to its reportable status.
///
/// `target_branches` is the request's declared list, used for the success
/// description; conflict descriptions name the failed subset the outcome
/// carries, in the same declared order.
pub fn status_for_outcome(target_branches: &[String], outcome: &MergeOutcome) -> ReportableStatus {
    match outcome {
        MergeOutcome::Clean => ReportableStatus {
            state: StatusState::Success,
            description: format!("Merges cleanly to {}", target_branches.join(", ")),
        },
        MergeOutcome::Conflict { failed_branches } => ReportableStatus {
            state: StatusState::Failure,
            description: format!(
                "Unable to merge into {} please update changes or PR target",
                failed_branches.join(", ")
            ),
        },
        MergeOutcome::Error { .. } => ReportableStatus {
            state: StatusState::Failure,
            description: UNMERGEABLE_DESCRIPTION.to_string(),
        },
    }
}

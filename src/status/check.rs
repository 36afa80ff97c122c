//! Mergeability checking - drives the strategy and folds its errors
//!
//! Everything a strategy can raise is caught here and folded into a
//! [`MergeOutcome`]; nothing escapes to the resolver as an error.

use crate::strategy::{MergeStrategy, StrategyError};
use crate::types::{ChangeRequest, MergeOutcome};
use tracing::{debug, warn};

/// Ask the strategy whether the request merges cleanly into every target
/// branch.
///
/// Only called for requests without fatal validation failures. A single
/// attempt is definitive for this invocation; nothing is retried.
pub async fn check_mergeability(
    strategy: &dyn MergeStrategy,
    request: &ChangeRequest,
) -> MergeOutcome {
    debug!(pr = request.number, "preparing merge check");
    if let Err(e) = strategy.prepare(request).await {
        return fold(e);
    }

    debug!(pr = request.number, targets = ?request.target_branches, "checking mergeability");
    match strategy.check(request).await {
        Ok(()) => MergeOutcome::Clean,
        Err(e) => fold(e),
    }
}

/// Fold a raised strategy condition into an outcome.
///
/// A condition carrying a specific failed-branch list is a conflict; every
/// other condition is a branch-unspecific check error. A conflict with an
/// empty branch list is malformed and degrades to an error.
fn fold(error: StrategyError) -> MergeOutcome {
    match error {
        StrategyError::Conflicts { failed_branches } if !failed_branches.is_empty() => {
            debug!(branches = ?failed_branches, "merge check found conflicts");
            MergeOutcome::Conflict { failed_branches }
        }
        other => {
            warn!("merge check failed: {other}");
            MergeOutcome::Error {
                detail: other.to_string(),
            }
        }
    }
}

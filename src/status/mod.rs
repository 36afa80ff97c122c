//! Merge-readiness decision engine
//!
//! Three steps, strictly sequential because each gates the next:
//! 1. Classify - fatal vs. advisory validation failures (pure)
//! 2. Check - trial the merge via the strategy, folded into an outcome
//!    (effectful, skipped entirely when a fatal failure exists)
//! 3. Resolve - map the verdict to a reportable status (pure)

mod check;
mod resolve;

pub use check::check_mergeability;
pub use resolve::{PENDING_DESCRIPTION, UNMERGEABLE_DESCRIPTION, pending_status, status_for_outcome};

use crate::request::has_fatal_failures;
use crate::strategy::MergeStrategy;
use crate::types::{ChangeRequest, ReportableStatus};
use tracing::debug;

/// Resolve the reportable status for one change request.
///
/// Stateless per call: identical inputs and identical strategy behavior
/// produce an identical status. A fatally invalid request is reported
/// `pending` without consulting the strategy at all - its mergeability is
/// moot until the fatal issue clears.
pub async fn resolve_status(
    request: &ChangeRequest,
    strategy: &dyn MergeStrategy,
) -> ReportableStatus {
    if has_fatal_failures(&request.validation_failures) {
        debug!(pr = request.number, "fatal validation failure, skipping merge check");
        return pending_status();
    }

    let outcome = check_mergeability(strategy, request).await;
    status_for_outcome(&request.target_branches, &outcome)
}

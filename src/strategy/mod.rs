//! Merge strategies
//!
//! A strategy is the capability set the decision engine needs and nothing
//! more: stage a change request, then test its clean application to every
//! target branch. The engine depends only on the [`MergeStrategy`] trait,
//! so any concrete strategy is interchangeable.

mod git;

pub use git::GitMergeStrategy;

use crate::types::ChangeRequest;
use async_trait::async_trait;

/// Conditions a strategy can raise.
///
/// [`StrategyError::Conflicts`] is the only condition carrying a specific
/// failed-branch list; the checker treats every other variant as a
/// branch-unspecific check error.
#[derive(Debug, thiserror::Error)]
pub enum StrategyError {
    /// One or more target branches conflicted with the staged changes
    #[error("merge conflicts in {}", failed_branches.join(", "))]
    Conflicts {
        /// Conflicting branches, in declared target order
        failed_branches: Vec<String>,
    },

    /// Staging the change set failed before any branch was judged
    #[error("staging failed: {0}")]
    Staging(String),

    /// A git command failed for a reason other than a conflict
    #[error("git command failed: {0}")]
    Git(String),
}

/// The merge capability the decision engine is polymorphic over.
#[async_trait]
pub trait MergeStrategy: Send + Sync {
    /// Stage the request's change set without judging mergeability.
    async fn prepare(&self, request: &ChangeRequest) -> Result<(), StrategyError>;

    /// Test a merge of the staged change set into every target branch.
    ///
    /// Returns `Ok(())` only when every branch merges without conflict.
    async fn check(&self, request: &ChangeRequest) -> Result<(), StrategyError>;
}

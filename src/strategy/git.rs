//! Git-backed merge strategy
//!
//! Stages the pull request via its PR ref and trial-merges it into every
//! target branch inside the invocation's workspace clone.

use crate::git::{self, TrialMerge, Workspace};
use crate::strategy::{MergeStrategy, StrategyError};
use crate::types::ChangeRequest;
use async_trait::async_trait;
use tracing::debug;

/// Merge strategy that drives the git CLI against a workspace clone.
pub struct GitMergeStrategy {
    workspace: Workspace,
}

impl GitMergeStrategy {
    /// Create a strategy over an already-cloned workspace.
    pub fn new(workspace: Workspace) -> Self {
        Self { workspace }
    }

    /// Local tracking ref the PR head is staged under.
    fn staged_ref(request: &ChangeRequest) -> String {
        format!("origin/pr/{}", request.number)
    }
}

#[async_trait]
impl MergeStrategy for GitMergeStrategy {
    async fn prepare(&self, request: &ChangeRequest) -> Result<(), StrategyError> {
        // GitHub maintains refs/pull/<n>/head even after the PR branch is
        // deleted, and the "+" forces the update past any force-push.
        let pr_refspec = format!(
            "+refs/pull/{}/head:refs/remotes/origin/pr/{}",
            request.number, request.number
        );
        let mut refspecs = vec![pr_refspec];
        refspecs.extend(request.target_branches.iter().cloned());
        let refspec_refs: Vec<&str> = refspecs.iter().map(String::as_str).collect();

        debug!(pr = request.number, "staging change set");
        git::fetch(self.workspace.path(), &refspec_refs)
            .await
            .map_err(|e| StrategyError::Staging(e.to_string()))
    }

    async fn check(&self, request: &ChangeRequest) -> Result<(), StrategyError> {
        let staged = Self::staged_ref(request);
        let mut failed_branches = Vec::new();

        for branch in &request.target_branches {
            let onto = format!("origin/{branch}");
            debug!(pr = request.number, branch = %branch, "trial merge");
            match git::trial_merge(self.workspace.path(), &onto, &staged).await {
                Ok(TrialMerge::Clean) => {}
                Ok(TrialMerge::Conflict) => failed_branches.push(branch.clone()),
                Err(e) => return Err(StrategyError::Git(e.to_string())),
            }
        }

        if failed_branches.is_empty() {
            Ok(())
        } else {
            Err(StrategyError::Conflicts { failed_branches })
        }
    }
}

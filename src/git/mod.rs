//! Workspace staging and git plumbing
//!
//! Each invocation owns a throwaway working directory holding a clone of
//! the repository; it is removed when the [`Workspace`] is dropped. All git
//! commands run through [`tokio::process`], so process spawns are
//! await-points in the single logical thread of control.

use crate::config::Config;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Output;
use tempfile::TempDir;
use tokio::process::Command;
use tracing::debug;

/// Result of a trial merge into one branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrialMerge {
    /// The merge would apply without conflict
    Clean,
    /// The merge hit content conflicts
    Conflict,
}

/// A per-invocation clone of the repository.
///
/// The backing temporary directory is deleted on drop, so nothing leaks
/// between invocations.
pub struct Workspace {
    root: PathBuf,
    _tempdir: TempDir,
}

impl Workspace {
    /// Clone the configured repository into a fresh temporary directory.
    ///
    /// With a token, the clone authenticates as `x-access-token`; without
    /// one it is anonymous, which is enough for public repositories.
    pub async fn clone_repository(config: &Config, token: Option<&str>) -> Result<Self> {
        let tempdir = tempfile::Builder::new()
            .prefix("branch-gate-")
            .tempdir()?;

        let host = config.host.as_deref().unwrap_or("github.com");
        let url = match token {
            Some(token) => format!(
                "https://x-access-token:{token}@{host}/{}/{}.git",
                config.owner, config.repo
            ),
            None => config.clone_url(),
        };

        debug!(owner = %config.owner, repo = %config.repo, "cloning repository");
        let output = Command::new("git")
            .current_dir(tempdir.path())
            .args(["clone", "--quiet", &url, "repo"])
            .output()
            .await?;
        if !output.status.success() {
            // The URL may embed the token, so the error reports stderr only.
            return Err(Error::Git(format!(
                "clone of {}/{} failed: {}",
                config.owner,
                config.repo,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let root = tempdir.path().join("repo");
        Ok(Self {
            root,
            _tempdir: tempdir,
        })
    }

    /// Path to the clone's working tree.
    pub fn path(&self) -> &Path {
        &self.root
    }
}

/// Run a git command, returning raw output without judging success.
async fn run_git_raw(dir: &Path, args: &[&str]) -> Result<Output> {
    debug!(?args, "running git");
    let output = Command::new("git")
        .current_dir(dir)
        .args(args)
        .output()
        .await?;
    Ok(output)
}

/// Run a git command, returning trimmed stdout on success.
pub async fn run_git(dir: &Path, args: &[&str]) -> Result<String> {
    let output = run_git_raw(dir, args).await?;
    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        Err(Error::Git(format!(
            "`git {}` failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr).trim()
        )))
    }
}

/// Fetch refspecs from origin.
///
/// `--` guards against refspecs being parsed as flags.
pub async fn fetch(dir: &Path, refspecs: &[&str]) -> Result<()> {
    let mut args = vec!["fetch", "--quiet", "origin", "--"];
    args.extend_from_slice(refspecs);
    run_git(dir, &args).await?;
    Ok(())
}

/// Check out a ref in detached HEAD mode.
pub async fn checkout_detached(dir: &Path, target: &str) -> Result<()> {
    run_git(dir, &["checkout", "--quiet", "--detach", target]).await?;
    Ok(())
}

/// Attempt a merge of `from_ref` onto `onto_ref` without keeping it.
///
/// The worktree is left clean afterwards either way, so trial merges can
/// run back to back for every target branch.
pub async fn trial_merge(dir: &Path, onto_ref: &str, from_ref: &str) -> Result<TrialMerge> {
    checkout_detached(dir, onto_ref).await?;

    let output = run_git_raw(dir, &["merge", "--no-commit", "--no-ff", from_ref]).await?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    if output.status.success() {
        // An up-to-date merge never started, so there is nothing to abort.
        if stdout.contains("Already up to date") {
            return Ok(TrialMerge::Clean);
        }
        run_git(dir, &["merge", "--abort"]).await?;
        return Ok(TrialMerge::Clean);
    }

    // git reports conflicts on stdout, not stderr
    let combined = format!("{stdout}{stderr}");
    if combined.contains("CONFLICT") || combined.contains("Automatic merge failed") {
        run_git(dir, &["merge", "--abort"]).await?;
        return Ok(TrialMerge::Conflict);
    }

    Err(Error::Git(format!(
        "`git merge --no-commit --no-ff {from_ref}` failed: {}",
        stderr.trim()
    )))
}

//! Error types for branch-gate

use crate::types::PrState;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that mark the invocation itself as failed.
///
/// These never become a published status: they propagate out of the
/// pipeline so the run exits non-zero, with the credential still revoked.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// GitHub API call failed
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Credential acquisition or revocation failed
    #[error("authentication error: {0}")]
    Auth(String),

    /// Configuration file could not be read or parsed
    #[error("configuration error: {0}")]
    Config(String),

    /// A git command failed while staging the working directory
    #[error("git error: {0}")]
    Git(String),

    /// The pull request does not exist on the host
    #[error("pull request #{0} was not found")]
    PullRequestNotFound(u64),

    /// The pull request is not open, so there is nothing to check
    #[error("pull request #{number} is {state}, expected open")]
    PullRequestNotOpen {
        /// PR number
        number: u64,
        /// Observed state
        state: PrState,
    },

    /// Filesystem or process I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        Self::GitHubApi(err.to_string())
    }
}

//! Invocation configuration
//!
//! All knobs are carried in an explicit [`Config`] value threaded into each
//! component by parameter. Nothing here is ambient or mutable after load.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Default context label identifying this check among others on a PR.
const DEFAULT_STATUS_CONTEXT: &str = "branch-gate";

/// Default label prefix selecting extra target branches (e.g. `target: 20.x`).
const DEFAULT_TARGET_LABEL_PREFIX: &str = "target:";

/// Default maximum PR title length before the advisory fires.
const DEFAULT_MAX_TITLE_LENGTH: usize = 120;

/// Immutable configuration for one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Custom host (None for github.com)
    pub host: Option<String>,
    /// Context label the published status is filed under
    pub status_context: String,
    /// Label prefix that declares an extra target branch
    pub target_label_prefix: String,
    /// Whether a missing target label is a fatal validation failure
    pub require_target_label: bool,
    /// Maximum title length before the advisory validation fires
    pub max_title_length: usize,
}

/// Repo-level policy knobs, loadable from a TOML file.
///
/// Every field is optional; absent fields fall back to defaults. Unknown
/// keys are rejected so typos surface instead of silently doing nothing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PolicyFile {
    status_context: Option<String>,
    target_label_prefix: Option<String>,
    require_target_label: Option<bool>,
    max_title_length: Option<usize>,
}

impl Config {
    /// Build a configuration from invocation identity plus an optional
    /// policy file.
    pub fn load(
        owner: String,
        repo: String,
        host: Option<String>,
        policy_path: Option<&Path>,
    ) -> Result<Self> {
        let policy = match policy_path {
            Some(path) => {
                let content = fs::read_to_string(path).map_err(|e| {
                    Error::Config(format!("failed to read {}: {e}", path.display()))
                })?;
                toml::from_str::<PolicyFile>(&content).map_err(|e| {
                    Error::Config(format!("failed to parse {}: {e}", path.display()))
                })?
            }
            None => PolicyFile::default(),
        };

        Ok(Self {
            owner,
            repo,
            host,
            status_context: policy
                .status_context
                .unwrap_or_else(|| DEFAULT_STATUS_CONTEXT.to_string()),
            target_label_prefix: policy
                .target_label_prefix
                .unwrap_or_else(|| DEFAULT_TARGET_LABEL_PREFIX.to_string()),
            require_target_label: policy.require_target_label.unwrap_or(false),
            max_title_length: policy.max_title_length.unwrap_or(DEFAULT_MAX_TITLE_LENGTH),
        })
    }

    /// Base URL for raw REST calls, handling enterprise hosts.
    ///
    /// A host carrying its own scheme is used verbatim, which also lets
    /// tests point at a local HTTP server.
    pub fn api_base(&self) -> String {
        match self.host.as_deref() {
            Some(h) if h.starts_with("http://") || h.starts_with("https://") => {
                h.trim_end_matches('/').to_string()
            }
            Some(h) => format!("https://{h}/api/v3"),
            None => "https://api.github.com".to_string(),
        }
    }

    /// Clone URL for the repository.
    pub fn clone_url(&self) -> String {
        let host = self.host.as_deref().unwrap_or("github.com");
        format!("https://{host}/{}/{}.git", self.owner, self.repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config(policy: Option<&Path>) -> Config {
        Config::load("octo".to_string(), "repo".to_string(), None, policy).unwrap()
    }

    #[test]
    fn defaults_when_no_policy_file() {
        let config = base_config(None);
        assert_eq!(config.status_context, "branch-gate");
        assert_eq!(config.target_label_prefix, "target:");
        assert!(!config.require_target_label);
        assert_eq!(config.max_title_length, 120);
    }

    #[test]
    fn policy_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.toml");
        fs::write(
            &path,
            "status_context = \"mergeability\"\nrequire_target_label = true\n",
        )
        .unwrap();

        let config = base_config(Some(&path));
        assert_eq!(config.status_context, "mergeability");
        assert!(config.require_target_label);
        // Untouched knobs keep their defaults
        assert_eq!(config.max_title_length, 120);
    }

    #[test]
    fn unknown_policy_key_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.toml");
        fs::write(&path, "status_contxt = \"typo\"\n").unwrap();

        let result = Config::load("octo".to_string(), "repo".to_string(), None, Some(&path));
        match result {
            Err(Error::Config(msg)) => assert!(msg.contains("policy.toml")),
            other => panic!("Expected Config error, got: {other:?}"),
        }
    }

    #[test]
    fn api_base_handles_hosts() {
        let mut config = base_config(None);
        assert_eq!(config.api_base(), "https://api.github.com");

        config.host = Some("ghe.example.com".to_string());
        assert_eq!(config.api_base(), "https://ghe.example.com/api/v3");

        config.host = Some("http://127.0.0.1:8080/".to_string());
        assert_eq!(config.api_base(), "http://127.0.0.1:8080");
    }

    #[test]
    fn clone_url_uses_host() {
        let mut config = base_config(None);
        assert_eq!(config.clone_url(), "https://github.com/octo/repo.git");

        config.host = Some("ghe.example.com".to_string());
        assert_eq!(config.clone_url(), "https://ghe.example.com/octo/repo.git");
    }
}

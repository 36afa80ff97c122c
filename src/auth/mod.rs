//! Credential lifecycle
//!
//! The token is a scoped resource: acquired before any network or staging
//! work, revoked on every exit path. Revocation only does wire work for
//! GitHub App installation tokens; environment tokens outlive the run and
//! are left alone.

use crate::config::Config;
use crate::error::{Error, Result};
use reqwest::Client;
use tracing::{debug, warn};

/// Source of the authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token from an environment variable; not ours to revoke
    EnvVar,
    /// Short-lived GitHub App installation token; revoked after the run
    Installation,
}

/// A host credential scoped to one invocation.
pub struct Credential {
    token: String,
    source: AuthSource,
    api_base: String,
    http: Client,
}

impl Credential {
    /// Acquire the credential for this invocation.
    pub fn acquire(token: String, source: AuthSource, config: &Config) -> Result<Self> {
        if token.is_empty() {
            return Err(Error::Auth("token is empty".to_string()));
        }

        let http = Client::builder()
            .user_agent("branch-gate")
            .build()
            .map_err(|e| Error::Auth(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            token,
            source,
            api_base: config.api_base(),
            http,
        })
    }

    /// The raw token value.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Where the token came from.
    pub fn source(&self) -> AuthSource {
        self.source
    }

    /// Revoke the credential, consuming it.
    ///
    /// For installation tokens this invalidates the token on the host; for
    /// environment tokens it is a no-op.
    pub async fn revoke(self) -> Result<()> {
        if self.source == AuthSource::EnvVar {
            debug!("environment token left active");
            return Ok(());
        }

        let url = format!("{}/installation/token", self.api_base);
        let response = self
            .http
            .delete(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .send()
            .await
            .map_err(|e| Error::Auth(format!("failed to revoke installation token: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::Auth(format!(
                "installation token revocation returned {}",
                response.status()
            )));
        }

        debug!("installation token revoked");
        Ok(())
    }
}

/// Revoke a credential without letting a revocation failure mask the run's
/// own result.
pub async fn revoke_quietly(credential: Credential) {
    if let Err(e) = credential.revoke().await {
        warn!("credential revocation failed: {e}");
    }
}

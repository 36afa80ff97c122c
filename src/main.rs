//! branch-gate CLI entry point

use anyhow::Context;
use branch_gate::auth::{AuthSource, Credential, revoke_quietly};
use branch_gate::config::Config;
use branch_gate::git::Workspace;
use branch_gate::platform::{GitHubService, HostService};
use branch_gate::request::load_change_request;
use branch_gate::status::resolve_status;
use branch_gate::strategy::GitMergeStrategy;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Check whether a pull request merges cleanly into all of its target
/// branches and report the verdict as a commit status.
#[derive(Debug, Parser)]
#[command(name = "branch-gate", version)]
struct Cli {
    /// Repository owner (user or organization)
    #[arg(long)]
    owner: String,

    /// Repository name
    #[arg(long)]
    repo: String,

    /// Pull request number to check
    #[arg(long)]
    pr: u64,

    /// Custom host for GitHub Enterprise (e.g. ghe.example.com)
    #[arg(long)]
    host: Option<String>,

    /// Host token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: String,

    /// Treat the token as a GitHub App installation token and revoke it
    /// when the run finishes
    #[arg(long)]
    installation_token: bool,

    /// Path to a TOML file with repo policy knobs
    #[arg(long)]
    config: Option<PathBuf>,

    /// Resolve the status but do not publish it
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load(
        cli.owner.clone(),
        cli.repo.clone(),
        cli.host.clone(),
        cli.config.as_deref(),
    )?;

    let source = if cli.installation_token {
        AuthSource::Installation
    } else {
        AuthSource::EnvVar
    };
    let credential = Credential::acquire(cli.token.clone(), source, &config)?;

    // The credential is revoked on every exit path; a revocation failure
    // never masks the run's own result.
    let result = run(&cli, &config, credential.token()).await;
    revoke_quietly(credential).await;
    result
}

/// The invocation body. Any error propagating out of here marks the run
/// itself as failed; it is never converted into a published status.
async fn run(cli: &Cli, config: &Config, token: &str) -> anyhow::Result<()> {
    let host = GitHubService::new(token, config.clone())?;

    let request = load_change_request(&host, cli.pr, config)
        .await
        .context("failed to load the pull request")?;

    let workspace = Workspace::clone_repository(config, Some(token))
        .await
        .context("failed to stage the repository")?;
    let strategy = GitMergeStrategy::new(workspace);

    let status = resolve_status(&request, &strategy).await;
    info!(
        pr = request.number,
        state = %status.state,
        description = %status.description,
        "resolved status"
    );

    if cli.dry_run {
        println!("{}: {}", status.state, status.description);
        return Ok(());
    }

    host.publish_status(&request.head_sha, &status)
        .await
        .context("failed to publish the commit status")?;
    println!("{}: {}", status.state, status.description);

    Ok(())
}

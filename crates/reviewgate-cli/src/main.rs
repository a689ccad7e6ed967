//! reviewgate - required-reviewer approval gate
//!
//! Runs as a CI step on pull requests. Exits 0 when the reviewer named in
//! the `REVIEWERS` file has approved (or the trigger is not a pull request),
//! otherwise prints an `::error::` workflow command and exits 1.

use anyhow::{Context, Result};
use clap::Parser;
use reviewgate_ci::report::error_command;
use reviewgate_ci::{
    init_tracing, ApprovalGate, GateOutcome, GitHubConfig, GitHubReviewClient, TriggerContext,
    DEFAULT_API_URL, REVIEWERS_FILE,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info, Level};

#[derive(Parser, Debug)]
#[command(name = "reviewgate")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Fail a pull request until the required reviewer approves", long_about = None)]
struct Cli {
    /// File holding the required reviewer's login
    #[arg(long, env = "REVIEWGATE_REVIEWERS_FILE", default_value = REVIEWERS_FILE)]
    reviewers_file: PathBuf,

    /// Webhook payload of the triggering event
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event_path: Option<PathBuf>,

    /// Repository as `owner/repo`
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: Option<String>,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Token used to authorize the review query
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn github_config(&self) -> GitHubConfig {
        let config = GitHubConfig::new(&self.api_url);
        match self.token.as_deref().filter(|t| !t.is_empty()) {
            Some(token) => config.with_token(token),
            None => config,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    init_tracing(cli.json, level);

    match run(&cli).await {
        Ok(outcome) => {
            debug!(?outcome, "Gate finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("{}", error_command(&format!("{:#}", e)));
            ExitCode::FAILURE
        }
    }
}

/// Resolve the context, build the client and run the gate
async fn run(cli: &Cli) -> Result<GateOutcome> {
    let context = TriggerContext::load(cli.event_path.as_deref(), cli.repository.as_deref())?;
    let client =
        GitHubReviewClient::new(cli.github_config()).context("Failed to create GitHub client")?;

    let outcome = ApprovalGate::new(client)
        .run(&context, &cli.reviewers_file)
        .await?;

    if outcome == GateOutcome::Skipped {
        info!("No pull request in trigger context");
    }
    Ok(outcome)
}

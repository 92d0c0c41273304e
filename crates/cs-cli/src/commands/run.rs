//! Run command
//!
//! Authenticate, then sweep the account's comments.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use std::path::Path;
use std::sync::Arc;

use cs_core::config::ScrubConfig;
use cs_core::{CancellationToken, ErrorKind, RetentionPolicy, RunSummary, Sweeper};
use cs_reddit::{build_http_client, Authenticator, Endpoints, RedditClient};
use tracing::{info, warn};

use super::settings::{self, CredentialArgs};

/// Arguments for the run command
#[derive(Debug, Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub credentials: CredentialArgs,

    /// Only remove comments older than this many years
    #[arg(long, env = "REDDIT_YEARS_BACK")]
    pub years_back: Option<u32>,

    /// Report what would be removed without editing or deleting
    #[arg(long, env = "REDDIT_DRY_RUN", value_parser = clap::builder::BoolishValueParser::new())]
    pub dry_run: bool,

    /// Seconds to wait after each removed comment
    #[arg(long)]
    pub pace_seconds: Option<u64>,

    /// Do not ask for confirmation before removing comments
    #[arg(short, long)]
    pub yes: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the run command
pub async fn execute(args: RunArgs, config_path: Option<&Path>) -> Result<()> {
    use colored::Colorize;

    let config = settings::load_config(config_path)?;
    let credentials = args.credentials.resolve(&config)?;
    let policy = build_policy(&args, &config, Utc::now())?;
    let pace = std::time::Duration::from_secs(args.pace_seconds.unwrap_or(config.run.pace_seconds));

    if !policy.dry_run && !args.yes && !confirm(&credentials.username, &policy)? {
        println!("Sweep cancelled.");
        return Ok(());
    }

    let endpoints = Endpoints::from_config(&config.endpoints)?;
    let http = build_http_client(&credentials.user_agent)?;
    let token = Authenticator::new(http.clone(), endpoints.clone())
        .authenticate(&credentials)
        .await
        .context("Failed to obtain access token")?;

    let api = Arc::new(RedditClient::new(
        http,
        endpoints,
        credentials.username.clone(),
        token,
    ));

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, stopping");
            interrupt.cancel();
        }
    });

    info!(username = %api.username(), "Sweeping comments");
    let sweeper = Sweeper::new(api, Arc::new(policy), cancel).with_pace(pace);
    let mut summary = RunSummary::default();
    let result = sweeper.run(&mut summary).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("\n{}", "Summary".bold().underline());
        println!("{}", summary);
    }

    match result {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::Cancelled => {
            bail!("Sweep interrupted after {} comments", summary.seen)
        }
        Err(err) => Err(err).context("Sweep aborted"),
    }
}

/// Policy from the config file with command-line overrides applied
fn build_policy(args: &RunArgs, config: &ScrubConfig, now: DateTime<Utc>) -> Result<RetentionPolicy> {
    let mut policy = config.policy.clone();
    if let Some(years_back) = args.years_back {
        policy.years_back = years_back;
    }
    policy.dry_run |= args.dry_run;

    policy
        .to_policy(now)
        .context("Failed to build retention policy")
}

fn confirm(username: &str, policy: &RetentionPolicy) -> Result<bool> {
    use dialoguer::Confirm;

    Confirm::new()
        .with_prompt(format!(
            "Overwrite and delete comments by u/{} created before {}?",
            username,
            policy.cutoff.format("%Y-%m-%d")
        ))
        .default(false)
        .interact()
        .context("Confirmation prompt failed; pass --yes to run non-interactively")
}

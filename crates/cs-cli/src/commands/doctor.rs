//! Doctor command
//!
//! Diagnose credentials, configuration and connectivity.

use anyhow::Result;
use chrono::Utc;
use clap::Args;
use std::path::Path;

use cs_core::config::{CredentialsConfig, ScrubConfig};
use cs_reddit::{build_http_client, Authenticator, Endpoints};

use super::settings::{self, CredentialArgs};

/// Arguments for the doctor command
#[derive(Debug, Args)]
pub struct DoctorArgs {
    #[command(flatten)]
    pub credentials: CredentialArgs,

    /// Also try to obtain an access token
    #[arg(long)]
    pub auth: bool,
}

/// Check result
struct CheckResult {
    name: String,
    passed: bool,
    message: String,
    suggestion: Option<String>,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            message: message.to_string(),
            suggestion: None,
        }
    }

    fn fail(name: &str, message: &str, suggestion: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            message: message.to_string(),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    fn warn(name: &str, message: &str, suggestion: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            message: format!("⚠ {}", message),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    fn is_warning(&self) -> bool {
        self.passed && self.message.starts_with('⚠')
    }
}

/// Execute the doctor command
pub async fn execute(args: DoctorArgs, config_path: Option<&Path>, verbose: bool) -> Result<()> {
    use colored::Colorize;

    let mut results = Vec::new();

    println!("\n{}", "1. Configuration".bold().underline());
    let mut section = Vec::new();
    let config = match settings::load_config(config_path) {
        Ok(config) => {
            let path = settings::config_path(config_path);
            if path.exists() {
                section.push(CheckResult::ok("Config file", &path.display().to_string()));
            } else {
                section.push(CheckResult::warn(
                    "Config file",
                    "not found, using defaults",
                    Some("Run 'comment-scrubber config init' to create one"),
                ));
            }
            config
        }
        Err(e) => {
            section.push(CheckResult::fail(
                "Config file",
                &format!("{:#}", e),
                Some("Fix the file or run 'comment-scrubber config validate'"),
            ));
            ScrubConfig::default()
        }
    };
    section.extend(check_policy(&config));
    print_section(&section, verbose);
    results.extend(section);

    println!("\n{}", "2. Credentials".bold().underline());
    let section = check_credentials(&args.credentials.merged(&config));
    print_section(&section, verbose);
    results.extend(section);

    println!("\n{}", "3. Connectivity".bold().underline());
    let section = check_connectivity(&args, &config).await;
    print_section(&section, verbose);
    results.extend(section);

    let warnings: Vec<_> = results.iter().filter(|r| r.is_warning()).collect();
    let errors: Vec<_> = results.iter().filter(|r| !r.passed).collect();

    println!(
        "\n{}: {} warnings, {} errors",
        "Summary".bold(),
        warnings.len().to_string().yellow(),
        errors.len().to_string().red()
    );

    if !errors.is_empty() {
        println!("\n{}", "✗ Errors:".red());
        for result in &errors {
            println!("  - {}: {}", result.name, result.message);
            if let Some(suggestion) = &result.suggestion {
                println!("    Fix: {}", suggestion);
            }
        }
    }

    if errors.is_empty() && warnings.is_empty() {
        println!("\n{} All checks passed!", "✓".green());
    }

    Ok(())
}

fn print_section(results: &[CheckResult], verbose: bool) {
    use colored::Colorize;

    for result in results {
        let status = if !result.passed {
            "✗".red()
        } else if result.is_warning() {
            "⚠".yellow()
        } else {
            "✓".green()
        };

        println!("   {} {}: {}", status, result.name, result.message);

        if verbose {
            if let Some(suggestion) = &result.suggestion {
                println!("     {}", suggestion.dimmed());
            }
        }
    }
}

fn check_policy(config: &ScrubConfig) -> Vec<CheckResult> {
    let mut results = Vec::new();

    match config.policy.to_policy(Utc::now()) {
        Ok(policy) => {
            results.push(CheckResult::ok(
                "Cutoff",
                &format!("comments before {}", policy.cutoff.format("%Y-%m-%d")),
            ));
            if policy.dry_run {
                results.push(CheckResult::ok("Mode", "dry run"));
            } else {
                results.push(CheckResult::warn(
                    "Mode",
                    "comments will be edited and deleted",
                    Some("Set dry_run = true or pass --dry-run to preview first"),
                ));
            }
        }
        Err(e) => results.push(CheckResult::fail("Cutoff", &e.to_string(), None)),
    }

    results
}

fn check_credentials(merged: &CredentialsConfig) -> Vec<CheckResult> {
    let fields = [
        ("username", "REDDIT_USERNAME", merged.username.as_deref(), false),
        ("password", "REDDIT_PASSWORD", merged.password.as_deref(), true),
        ("client_id", "REDDIT_CLIENT_ID", merged.client_id.as_deref(), false),
        ("client_secret", "REDDIT_CLIENT_SECRET", merged.client_secret.as_deref(), true),
        ("user_agent", "REDDIT_USER_AGENT", merged.user_agent.as_deref(), false),
    ];

    fields
        .into_iter()
        .map(|(name, env, value, secret)| match value {
            Some(v) if !v.trim().is_empty() => {
                let shown = if secret { "set" } else { v };
                CheckResult::ok(name, shown)
            }
            _ => CheckResult::fail(
                name,
                "missing",
                Some(&format!("Set {} or add it to [credentials]", env)),
            ),
        })
        .collect()
}

async fn check_connectivity(args: &DoctorArgs, config: &ScrubConfig) -> Vec<CheckResult> {
    let mut results = Vec::new();

    let endpoints = match Endpoints::from_config(&config.endpoints) {
        Ok(endpoints) => {
            results.push(CheckResult::ok("Endpoints", &config.endpoints.www));
            endpoints
        }
        Err(e) => {
            results.push(CheckResult::fail("Endpoints", &e.to_string(), None));
            return results;
        }
    };

    if !args.auth {
        results.push(CheckResult::warn(
            "Authentication",
            "not checked",
            Some("Pass --auth to try a token exchange"),
        ));
        return results;
    }

    let credentials = match args.credentials.resolve(config) {
        Ok(credentials) => credentials,
        Err(e) => {
            results.push(CheckResult::fail("Authentication", &format!("{:#}", e), None));
            return results;
        }
    };

    let outcome = match build_http_client(&credentials.user_agent) {
        Ok(http) => Authenticator::new(http, endpoints)
            .authenticate(&credentials)
            .await
            .map(|_| ()),
        Err(e) => Err(e),
    };

    match outcome {
        Ok(()) => results.push(CheckResult::ok("Authentication", "token obtained")),
        Err(e) => results.push(CheckResult::fail(
            "Authentication",
            &e.to_string(),
            Some("Check the password and the app's client id/secret (script app type)"),
        )),
    }

    results
}

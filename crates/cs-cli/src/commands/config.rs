//! Config command
//!
//! Manage comment-scrubber configuration.

use anyhow::{Context, Result};
use clap::Subcommand;
use chrono::Utc;
use std::fs;
use std::path::Path;

use cs_core::config::{ScrubConfig, CONFIG_TEMPLATE};
use cs_reddit::Endpoints;

use super::settings;

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration with secrets masked
    Show {
        /// Show as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a starter configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Validate configuration
    Validate,

    /// Print the configuration file path
    Path,
}

/// Execute the config command
pub fn execute(cmd: ConfigCommand, explicit: Option<&Path>) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => show_config(explicit, json),
        ConfigCommand::Init { force } => init_config(explicit, force),
        ConfigCommand::Validate => validate_config(explicit),
        ConfigCommand::Path => {
            println!("{}", settings::config_path(explicit).display());
            Ok(())
        }
    }
}

fn show_config(explicit: Option<&Path>, as_json: bool) -> Result<()> {
    use colored::Colorize;

    let config_path = settings::config_path(explicit);

    if !config_path.exists() {
        eprintln!(
            "{} Configuration not found. Run '{}' to create.",
            "⚠".yellow(),
            "comment-scrubber config init".cyan()
        );
        return Ok(());
    }

    let config = ScrubConfig::load(&config_path)?;

    if as_json {
        let json = serde_json::to_string_pretty(&config.masked())?;
        println!("{}", json);
    } else {
        println!("{}", "Configuration:".bold().underline());
        println!("{}", config_path.display().to_string().dimmed());
        println!();
        println!("{}", config.to_masked_toml()?);
    }

    Ok(())
}

fn init_config(explicit: Option<&Path>, force: bool) -> Result<()> {
    use colored::Colorize;

    let config_path = settings::config_path(explicit);

    if config_path.exists() && !force {
        eprintln!(
            "{} {} already exists. Use '{}' to overwrite.",
            "⚠".yellow(),
            config_path.display(),
            "--force".cyan()
        );
        return Ok(());
    }

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&config_path, CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    restrict_permissions(&config_path)?;

    println!(
        "{} Wrote {} (dry run is enabled until you turn it off)",
        "✓".green(),
        config_path.display()
    );

    Ok(())
}

/// The file may hold a password; keep it private to the owner
#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
        .with_context(|| format!("Failed to set permissions on {}", path.display()))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

fn validate_config(explicit: Option<&Path>) -> Result<()> {
    use colored::Colorize;

    let config_path = settings::config_path(explicit);

    if !config_path.exists() {
        eprintln!(
            "{} Configuration not found at {}",
            "✗".red(),
            config_path.display()
        );
        return Ok(());
    }

    let config = match ScrubConfig::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} Invalid configuration: {}", "✗".red(), e);
            return Err(e.into());
        }
    };
    println!("{} Configuration is valid TOML", "✓".green());

    let mut problems = Vec::new();
    let mut warnings = Vec::new();

    match config.policy.to_policy(Utc::now()) {
        Ok(policy) => println!(
            "{} Comments created before {} are eligible",
            "✓".green(),
            policy.cutoff.format("%Y-%m-%d")
        ),
        Err(e) => problems.push(e.to_string()),
    }

    if let Err(e) = Endpoints::from_config(&config.endpoints) {
        problems.push(e.to_string());
    }

    if config.policy.years_back == 0 {
        warnings.push("years_back is 0: every comment up to now is eligible");
    }
    if config.run.pace_seconds == 0 {
        warnings.push("pace_seconds is 0: requests are not paced");
    }
    if config.credentials.password.is_some() || config.credentials.client_secret.is_some() {
        warnings.push("secrets are stored in the file; prefer REDDIT_PASSWORD / REDDIT_CLIENT_SECRET");
    }

    for warning in warnings {
        println!("{} {}", "⚠".yellow(), warning);
    }

    if problems.is_empty() {
        println!("{} All settings are usable", "✓".green());
        Ok(())
    } else {
        for problem in &problems {
            eprintln!("{} {}", "✗".red(), problem);
        }
        anyhow::bail!("configuration has {} problem(s)", problems.len())
    }
}

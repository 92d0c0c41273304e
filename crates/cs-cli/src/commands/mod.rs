//! CLI commands module
//!
//! This module contains all CLI command implementations.

pub mod config;
pub mod doctor;
pub mod run;
pub mod settings;

use clap::{Parser, Subcommand};

/// comment-scrubber - overwrite and delete old Reddit comments
#[derive(Debug, Parser)]
#[command(name = "comment-scrubber")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "COMMENT_SCRUBBER_CONFIG")]
    pub config: Option<std::path::PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sweep the account's comments
    Run(run::RunArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(config::ConfigCommand),

    /// Check credentials, configuration and connectivity
    Doctor(doctor::DoctorArgs),
}

/// Run the CLI application
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // A sweep narrates at info level even without -v
    let floor = match cli.command {
        Commands::Run(_) => 1,
        _ => 0,
    };
    setup_logging(cli.verbose.max(floor));

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Run(args) => run::execute(args, config_path).await,
        Commands::Config(cmd) => config::execute(cmd, config_path),
        Commands::Doctor(args) => doctor::execute(args, config_path, cli.verbose > 0).await,
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

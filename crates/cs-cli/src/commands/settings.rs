//! Settings resolution shared by commands
//!
//! Flags and `REDDIT_*` environment variables take precedence over the
//! config file.

use anyhow::{Context, Result};
use clap::Args;
use cs_core::config::{Credentials, CredentialsConfig, ScrubConfig};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Credential flags, each also readable from the environment
#[derive(Debug, Clone, Default, Args)]
pub struct CredentialArgs {
    /// Reddit account username
    #[arg(long, env = "REDDIT_USERNAME")]
    pub username: Option<String>,

    /// Reddit account password
    #[arg(long, env = "REDDIT_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// OAuth application client id
    #[arg(long, env = "REDDIT_CLIENT_ID")]
    pub client_id: Option<String>,

    /// OAuth application client secret
    #[arg(long, env = "REDDIT_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// User agent sent with every request
    #[arg(long, env = "REDDIT_USER_AGENT")]
    pub user_agent: Option<String>,
}

impl CredentialArgs {
    fn overrides(&self) -> CredentialsConfig {
        CredentialsConfig {
            username: self.username.clone(),
            password: self.password.clone(),
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            user_agent: self.user_agent.clone(),
        }
    }

    /// File credentials with flags and environment layered on top
    pub fn merged(&self, config: &ScrubConfig) -> CredentialsConfig {
        config.credentials.clone().merge(self.overrides())
    }

    /// Resolve every credential or fail naming the first missing one
    pub fn resolve(&self, config: &ScrubConfig) -> Result<Credentials> {
        Ok(self.merged(config).resolve()?)
    }
}

/// Default config location, e.g. `~/.config/comment-scrubber/config.toml`
pub fn default_config_path() -> PathBuf {
    directories::ProjectDirs::from("com", "comment-scrubber", "comment-scrubber")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".comment-scrubber")
                .join("config.toml")
        })
}

/// Path used for the config file
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(default_config_path)
}

/// Load the config file
///
/// An explicit path must exist; the default location is optional.
pub fn load_config(explicit: Option<&Path>) -> Result<ScrubConfig> {
    if let Some(path) = explicit {
        return ScrubConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }

    let path = default_config_path();
    if path.exists() {
        ScrubConfig::load(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))
    } else {
        debug!("No config file at {}, using defaults", path.display());
        Ok(ScrubConfig::default())
    }
}

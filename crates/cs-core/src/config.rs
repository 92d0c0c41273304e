//! Configuration management for comment-scrubber
//!
//! The config file is TOML and every section is optional. Credentials found
//! in the file are overridden by flags and environment variables.

use crate::error::{Result, ScrubError};
use crate::policy::{cutoff_years_back, RetentionPolicy};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrubConfig {
    /// Account and OAuth application credentials
    pub credentials: CredentialsConfig,
    /// Retention rules
    pub policy: PolicyConfig,
    /// Run settings
    pub run: RunConfig,
    /// Platform base URLs
    pub endpoints: EndpointsConfig,
}

impl ScrubConfig {
    /// Load a config file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ScrubError::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| e.with_context(format!("Invalid config file {}", path.display())))
    }

    /// Parse config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Copy of the config with secrets masked
    pub fn masked(&self) -> Self {
        Self {
            credentials: self.credentials.clone().masked(),
            ..self.clone()
        }
    }

    /// Render the config as TOML with secrets masked
    pub fn to_masked_toml(&self) -> Result<String> {
        toml::to_string_pretty(&self.masked()).map_err(|e| ScrubError::Toml(e.to_string()))
    }
}

/// Credentials as they appear in a file or on the command line
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub user_agent: Option<String>,
}

impl CredentialsConfig {
    /// Layer `overrides` on top of these values; non-empty overrides win
    pub fn merge(self, overrides: CredentialsConfig) -> Self {
        fn pick(base: Option<String>, over: Option<String>) -> Option<String> {
            over.filter(|v| !v.is_empty()).or(base)
        }

        Self {
            username: pick(self.username, overrides.username),
            password: pick(self.password, overrides.password),
            client_id: pick(self.client_id, overrides.client_id),
            client_secret: pick(self.client_secret, overrides.client_secret),
            user_agent: pick(self.user_agent, overrides.user_agent),
        }
    }

    /// Require every credential to be present
    pub fn resolve(self) -> Result<Credentials> {
        fn require(value: Option<String>, name: &'static str) -> Result<String> {
            value
                .filter(|v| !v.trim().is_empty())
                .ok_or(ScrubError::MissingCredential(name))
        }

        Ok(Credentials {
            username: require(self.username, "username")?,
            password: require(self.password, "password")?,
            client_id: require(self.client_id, "client_id")?,
            client_secret: require(self.client_secret, "client_secret")?,
            user_agent: require(self.user_agent, "user_agent")?,
        })
    }

    fn masked(self) -> Self {
        Self {
            password: self.password.map(|_| MASK.to_string()),
            client_secret: self.client_secret.map(|_| MASK.to_string()),
            ..self
        }
    }
}

const MASK: &str = "********";

/// Fully resolved credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub client_id: String,
    pub client_secret: String,
    pub user_agent: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &MASK)
            .field("client_id", &self.client_id)
            .field("client_secret", &MASK)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Retention rules as written in the config file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Only comments older than this many years are removed
    pub years_back: u32,
    /// Comment ids that are never removed
    pub skip_comment_ids: Vec<String>,
    /// Subreddits whose comments are never removed
    pub skip_subreddits: Vec<String>,
    /// Comments scored above this are kept
    pub max_score: i64,
    /// Text written over a comment before deletion
    pub replacement_text: String,
    /// Report without editing or deleting
    pub dry_run: bool,
}

impl PolicyConfig {
    /// Build the retention policy, fixing the cutoff relative to `now`
    pub fn to_policy(&self, now: DateTime<Utc>) -> Result<RetentionPolicy> {
        let cutoff = cutoff_years_back(now, self.years_back)?;
        Ok(RetentionPolicy::new(cutoff)
            .preserve_ids(self.skip_comment_ids.iter().cloned())
            .preserve_subreddits(self.skip_subreddits.iter().cloned())
            .max_score(self.max_score)
            .replacement_text(self.replacement_text.clone())
            .dry_run(self.dry_run))
    }
}

/// Run settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Seconds to wait after each removed comment
    pub pace_seconds: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            pace_seconds: crate::workflow::DEFAULT_PACE.as_secs(),
        }
    }
}

impl RunConfig {
    pub fn pace(&self) -> Duration {
        Duration::from_secs(self.pace_seconds)
    }
}

/// Platform base URLs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointsConfig {
    /// Listing and token endpoints
    pub www: String,
    /// Authenticated edit and delete endpoints
    pub oauth: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            www: "https://www.reddit.com".to_string(),
            oauth: "https://oauth.reddit.com".to_string(),
        }
    }
}

/// Template written by `config init`
pub const CONFIG_TEMPLATE: &str = r#"# comment-scrubber configuration
#
# Credentials set here are overridden by REDDIT_* environment variables
# and command-line flags.

[credentials]
# username = "your_username"
# password = "your_password"
# client_id = "app_client_id"
# client_secret = "app_client_secret"
# user_agent = "comment-scrubber/0.1 by your_username"

[policy]
# Only comments older than this many years are removed
years_back = 1
# Comment ids that are never removed
skip_comment_ids = []
# Subreddits whose comments are never removed
skip_subreddits = []
# Comments scored above this are kept
max_score = 0
# Text written over each comment before it is deleted
replacement_text = ""
# Report what would be removed without touching anything
dry_run = true

[run]
# Seconds to wait after each removed comment
pace_seconds = 15
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ScrubConfig::default();
        assert_eq!(config.run.pace(), Duration::from_secs(15));
        assert_eq!(config.endpoints.oauth, "https://oauth.reddit.com");
        assert!(!config.policy.dry_run);
        assert_eq!(config.policy.years_back, 0);
    }

    #[test]
    fn test_template_parses() {
        let config = ScrubConfig::from_toml_str(CONFIG_TEMPLATE).unwrap();
        assert!(config.policy.dry_run);
        assert_eq!(config.policy.years_back, 1);
        assert_eq!(config.credentials, CredentialsConfig::default());
        assert_eq!(config.endpoints, EndpointsConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let config = ScrubConfig::from_toml_str(
            r#"
            [policy]
            skip_subreddits = ["mod_only"]
            max_score = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.policy.skip_subreddits, vec!["mod_only"]);
        assert_eq!(config.policy.max_score, 5);
        assert_eq!(config.run, RunConfig::default());
    }

    #[test]
    fn test_invalid_config() {
        let err = ScrubConfig::from_toml_str("[policy]\nmax_score = \"high\"").unwrap_err();
        assert!(matches!(err, ScrubError::Toml(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[credentials]\nusername = \"spez\"").unwrap();

        let config = ScrubConfig::load(file.path()).unwrap();
        assert_eq!(config.credentials.username.as_deref(), Some("spez"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ScrubConfig::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ScrubError::FileNotFound(_)));
    }

    #[test]
    fn test_overrides_win_over_file() {
        let file = CredentialsConfig {
            username: Some("from_file".into()),
            password: Some("file_pw".into()),
            ..Default::default()
        };
        let env = CredentialsConfig {
            username: Some("from_env".into()),
            password: Some(String::new()),
            client_id: Some("id".into()),
            ..Default::default()
        };

        let merged = file.merge(env);
        assert_eq!(merged.username.as_deref(), Some("from_env"));
        assert_eq!(merged.password.as_deref(), Some("file_pw"));
        assert_eq!(merged.client_id.as_deref(), Some("id"));
        assert_eq!(merged.client_secret, None);
    }

    #[test]
    fn test_resolve_reports_first_missing() {
        let partial = CredentialsConfig {
            username: Some("u".into()),
            password: Some("p".into()),
            client_id: Some("id".into()),
            client_secret: Some("  ".into()),
            user_agent: Some("ua".into()),
        };
        let err = partial.resolve().unwrap_err();
        assert!(matches!(err, ScrubError::MissingCredential("client_secret")));
    }

    #[test]
    fn test_credentials_debug_masks_secrets() {
        let creds = CredentialsConfig {
            username: Some("u".into()),
            password: Some("hunter2".into()),
            client_id: Some("id".into()),
            client_secret: Some("s3cret".into()),
            user_agent: Some("ua".into()),
        }
        .resolve()
        .unwrap();

        let debug = format!("{:?}", creds);
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("s3cret"));
    }

    #[test]
    fn test_masked_toml() {
        let mut config = ScrubConfig::default();
        config.credentials.password = Some("hunter2".into());
        let text = config.to_masked_toml().unwrap();
        assert!(!text.contains("hunter2"));
        assert!(text.contains(MASK));
    }

    #[test]
    fn test_policy_from_config() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 0, 0, 0).unwrap();
        let policy = PolicyConfig {
            years_back: 10,
            skip_comment_ids: vec!["abc".into()],
            skip_subreddits: vec!["mod_only".into()],
            max_score: 5,
            replacement_text: "gone".into(),
            dry_run: true,
        }
        .to_policy(now)
        .unwrap();

        assert_eq!(policy.cutoff, Utc.with_ymd_and_hms(2016, 10, 18, 0, 0, 0).unwrap());
        assert_eq!(policy.max_score, 5);
        assert_eq!(policy.replacement_text, "gone");
        assert!(policy.dry_run);
        assert!(policy.preserved_subreddits.contains("mod_only"));
    }
}

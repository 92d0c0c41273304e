//! Error types for comment-scrubber

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Where an error sits in the failure taxonomy
///
/// Setup and stream errors abort a run. Item errors are contained by the
/// remediation workflow and never reach the top level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Configuration, credentials or authentication; fatal before any processing
    Setup,
    /// Listing failure while paginating; fatal during iteration
    Stream,
    /// Edit or delete failure for a single comment; recoverable
    Item,
    /// Operator interrupt
    Cancelled,
}

/// Main error type for comment-scrubber
#[derive(Debug, Error)]
pub enum ScrubError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required credential was not supplied by flag, env or file
    #[error("Missing credential: {0} (set it with --{flag} or {env})", flag = .0.replace('_', "-"), env = env_var_for(.0))]
    MissingCredential(&'static str),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Token exchange failed
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Transport-level failure talking to an endpoint
    #[error("Request to {endpoint} failed: {message}")]
    Http { endpoint: String, message: String },

    /// Endpoint answered with a non-success status
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },

    /// Endpoint answered with HTTP 429
    #[error("Rate limited by {endpoint}{}", retry_hint(.retry_after))]
    RateLimited {
        endpoint: String,
        retry_after: Option<Duration>,
    },

    /// Response body could not be decoded
    #[error("Failed to decode response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    /// Listing failure that terminated the comment stream
    #[error("Comment stream aborted: {0}")]
    Stream(#[source] Box<ScrubError>),

    /// Run interrupted by the operator
    #[error("Run cancelled")]
    Cancelled,

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ScrubError>,
    },
}

fn env_var_for(credential: &str) -> String {
    format!("REDDIT_{}", credential.to_uppercase())
}

fn retry_hint(retry_after: &Option<Duration>) -> String {
    match retry_after {
        Some(wait) => format!(" (retry after {}s)", wait.as_secs()),
        None => String::new(),
    }
}

impl ScrubError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ScrubError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Mark a listing failure as fatal for the stream
    pub fn into_stream(self) -> Self {
        match self {
            ScrubError::Stream(_) | ScrubError::Cancelled => self,
            other => ScrubError::Stream(Box::new(other)),
        }
    }

    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScrubError::Io(_)
            | ScrubError::Serde(_)
            | ScrubError::Toml(_)
            | ScrubError::Config(_)
            | ScrubError::MissingCredential(_)
            | ScrubError::FileNotFound(_)
            | ScrubError::Auth(_) => ErrorKind::Setup,
            ScrubError::Http { .. }
            | ScrubError::Status { .. }
            | ScrubError::RateLimited { .. }
            | ScrubError::Decode { .. } => ErrorKind::Item,
            ScrubError::Stream(_) => ErrorKind::Stream,
            ScrubError::Cancelled => ErrorKind::Cancelled,
            ScrubError::WithContext { source, .. } => source.kind(),
        }
    }

    /// Whether this error ends the run
    pub fn is_fatal(&self) -> bool {
        self.kind() != ErrorKind::Item
    }
}

impl From<toml::de::Error> for ScrubError {
    fn from(err: toml::de::Error) -> Self {
        ScrubError::Toml(err.to_string())
    }
}

/// Result type alias for comment-scrubber
pub type Result<T> = std::result::Result<T, ScrubError>;

//! cs-core - Core library for comment-scrubber
//!
//! This crate holds everything that decides what happens to a comment:
//! the comment model, the retention policy and filter, the paginated
//! comment stream, and the edit-then-delete remediation workflow.
//! Talking to the platform goes through the [`CommentApi`] trait, which
//! `cs-reddit` implements over HTTP.

pub mod api;
pub mod comment;
pub mod config;
pub mod error;
pub mod filter;
pub mod policy;
pub mod stream;
pub mod summary;
pub mod sweep;
pub mod types;
pub mod workflow;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{CommentApi, EditOutcome, Page};
pub use comment::{Comment, CommentBuilder, Source};
pub use error::{ErrorKind, Result, ScrubError};
pub use filter::{decide, Disposition};
pub use policy::RetentionPolicy;
pub use stream::CommentStream;
pub use summary::RunSummary;
pub use sweep::Sweeper;
pub use types::*;
pub use workflow::{Outcome, Remediator};

pub use tokio_util::sync::CancellationToken;

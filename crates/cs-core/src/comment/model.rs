//! Comment data models

use crate::types::{CommentId, ContentKind, Fullname};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comment posted by the swept account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Platform id, immutable once fetched
    pub id: CommentId,
    /// Current body text
    pub body: String,
    /// Path of the comment on the platform
    pub permalink: String,
    /// Subreddit the comment was posted in
    pub subreddit: String,
    /// Score and timing as reported by the platform
    pub source: Source,
}

/// Scoring and timing attributes of a comment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    /// Net score
    pub score: i64,
    /// Creation time in epoch seconds
    pub created_utc: f64,
    /// Whether the comment can be gilded
    pub can_gild: bool,
}

impl Comment {
    /// Start building a comment with the given id
    pub fn builder(id: impl Into<String>) -> super::CommentBuilder {
        super::CommentBuilder::new(id)
    }

    /// Creation instant, truncated to whole seconds
    ///
    /// Timestamps that cannot be represented map to the far future so the
    /// comment is never treated as old enough to remove.
    pub fn created(&self) -> DateTime<Utc> {
        let secs = self.source.created_utc;
        if !secs.is_finite() {
            return DateTime::<Utc>::MAX_UTC;
        }
        DateTime::from_timestamp(secs.trunc() as i64, 0).unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Fullname accepted by the edit and delete endpoints
    pub fn fullname(&self) -> Fullname {
        Fullname::new(ContentKind::Comment, &self.id)
    }

    /// Net score
    pub fn score(&self) -> i64 {
        self.source.score
    }
}

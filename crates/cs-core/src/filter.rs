//! Retention filter
//!
//! Maps a comment and a policy to a single disposition. Checks run in a
//! fixed order and the first match wins, so each skipped comment carries
//! exactly one reason.

use crate::comment::Comment;
use crate::policy::RetentionPolicy;
use chrono::{DateTime, Utc};
use std::fmt;

/// What should happen to a comment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Eligible for removal
    Keep,
    /// Listed in the preserved ids
    SkipById,
    /// Posted in a preserved subreddit
    SkipBySubreddit,
    /// Newer than the cutoff
    SkipByDate { cutoff: DateTime<Utc> },
    /// Scored above the threshold
    SkipByScore { max_score: i64 },
}

impl Disposition {
    /// Whether the comment goes on to the remediation workflow
    pub fn is_keep(&self) -> bool {
        matches!(self, Disposition::Keep)
    }

    /// Human-readable skip reason, `None` for [`Disposition::Keep`]
    pub fn reason(&self) -> Option<String> {
        match self {
            Disposition::Keep => None,
            Disposition::SkipById => Some("listed in `skip_comment_ids`".to_string()),
            Disposition::SkipBySubreddit => Some("subreddit listed in `skip_subreddits`".to_string()),
            Disposition::SkipByDate { cutoff } => {
                Some(format!("created after the `before` cutoff ({})", cutoff.to_rfc3339()))
            }
            Disposition::SkipByScore { max_score } => {
                Some(format!("score above `max_score` ({})", max_score))
            }
        }
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Disposition::Keep => write!(f, "keep"),
            Disposition::SkipById => write!(f, "skip-by-id"),
            Disposition::SkipBySubreddit => write!(f, "skip-by-subreddit"),
            Disposition::SkipByDate { .. } => write!(f, "skip-by-date"),
            Disposition::SkipByScore { .. } => write!(f, "skip-by-score"),
        }
    }
}

/// Decide the disposition of a comment. Pure, no I/O.
pub fn decide(comment: &Comment, policy: &RetentionPolicy) -> Disposition {
    if policy.preserved_ids.contains(&comment.id) {
        return Disposition::SkipById;
    }

    if policy.preserved_subreddits.contains(&comment.subreddit) {
        return Disposition::SkipBySubreddit;
    }

    if comment.created() > policy.cutoff {
        return Disposition::SkipByDate {
            cutoff: policy.cutoff,
        };
    }

    if comment.score() > policy.max_score {
        return Disposition::SkipByScore {
            max_score: policy.max_score,
        };
    }

    Disposition::Keep
}

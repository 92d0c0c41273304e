//! Retention policy
//!
//! The rules a comment must pass before it is removed. A policy is built
//! once at startup and shared read-only for the rest of the run.

use crate::error::{Result, ScrubError};
use crate::types::CommentId;
use chrono::{DateTime, Months, Utc};
use std::collections::HashSet;

/// Rules deciding which comments are preserved
#[derive(Debug, Clone, PartialEq)]
pub struct RetentionPolicy {
    /// Comments that are never removed
    pub preserved_ids: HashSet<CommentId>,
    /// Subreddits whose comments are never removed
    pub preserved_subreddits: HashSet<String>,
    /// Only comments created at or before this instant are eligible
    pub cutoff: DateTime<Utc>,
    /// Comments scored above this are preserved
    pub max_score: i64,
    /// Text written over a comment before it is deleted
    pub replacement_text: String,
    /// Report what would be removed without touching anything
    pub dry_run: bool,
}

impl RetentionPolicy {
    /// Policy with the given cutoff and no other preservation rules
    pub fn new(cutoff: DateTime<Utc>) -> Self {
        Self {
            preserved_ids: HashSet::new(),
            preserved_subreddits: HashSet::new(),
            cutoff,
            max_score: 0,
            replacement_text: String::new(),
            dry_run: false,
        }
    }

    /// Preserve the given comment ids
    pub fn preserve_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preserved_ids.extend(ids.into_iter().map(CommentId::new));
        self
    }

    /// Preserve every comment in the given subreddits
    pub fn preserve_subreddits<I, S>(mut self, subreddits: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preserved_subreddits
            .extend(subreddits.into_iter().map(Into::into));
        self
    }

    /// Set the score threshold
    pub fn max_score(mut self, max_score: i64) -> Self {
        self.max_score = max_score;
        self
    }

    /// Set the replacement text
    pub fn replacement_text(mut self, text: impl Into<String>) -> Self {
        self.replacement_text = text.into();
        self
    }

    /// Enable or disable dry-run mode
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Convert a years-back setting into an absolute cutoff
///
/// Subtracts calendar years; a Feb 29 start clamps to Feb 28.
pub fn cutoff_years_back(now: DateTime<Utc>, years: u32) -> Result<DateTime<Utc>> {
    years
        .checked_mul(12)
        .and_then(|months| now.checked_sub_months(Months::new(months)))
        .ok_or_else(|| ScrubError::Config(format!("years_back {} is out of range", years)))
}

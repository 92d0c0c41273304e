//! Run summary

use crate::filter::Disposition;
use crate::workflow::Outcome;
use serde::Serialize;
use std::fmt;

/// Per-run counters, reported once the sweep ends
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub seen: usize,
    pub kept: usize,
    pub skipped_by_id: usize,
    pub skipped_by_subreddit: usize,
    pub skipped_by_date: usize,
    pub skipped_by_score: usize,
    pub would_remove: usize,
    pub edited: usize,
    pub edit_failures: usize,
    pub deleted: usize,
    pub delete_failures: usize,
}

impl RunSummary {
    /// Count a processed comment
    pub fn record(&mut self, outcome: &Outcome) {
        self.seen += 1;
        match outcome {
            Outcome::Skipped(disposition) => match disposition {
                Disposition::Keep => self.kept += 1,
                Disposition::SkipById => self.skipped_by_id += 1,
                Disposition::SkipBySubreddit => self.skipped_by_subreddit += 1,
                Disposition::SkipByDate { .. } => self.skipped_by_date += 1,
                Disposition::SkipByScore { .. } => self.skipped_by_score += 1,
            },
            Outcome::WouldRemove => {
                self.kept += 1;
                self.would_remove += 1;
            }
            Outcome::Remediated { edited, deleted } => {
                self.kept += 1;
                if *edited {
                    self.edited += 1;
                } else {
                    self.edit_failures += 1;
                }
                if *deleted {
                    self.deleted += 1;
                } else {
                    self.delete_failures += 1;
                }
            }
        }
    }

    /// Total comments preserved by the policy
    pub fn skipped(&self) -> usize {
        self.skipped_by_id + self.skipped_by_subreddit + self.skipped_by_date + self.skipped_by_score
    }

    /// Edit or delete calls that did not succeed
    pub fn failed(&self) -> usize {
        self.edit_failures + self.delete_failures
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Comments seen:    {}", self.seen)?;
        writeln!(f, "Eligible:         {}", self.kept)?;
        writeln!(
            f,
            "Skipped:          {} (id {}, subreddit {}, date {}, score {})",
            self.skipped(),
            self.skipped_by_id,
            self.skipped_by_subreddit,
            self.skipped_by_date,
            self.skipped_by_score
        )?;
        if self.would_remove > 0 {
            writeln!(f, "Would remove:     {}", self.would_remove)?;
        }
        writeln!(f, "Edited:           {} ({} failed)", self.edited, self.edit_failures)?;
        write!(f, "Deleted:          {} ({} failed)", self.deleted, self.delete_failures)
    }
}

//! Comment builder for fluent API

use super::model::{Comment, Source};
use crate::types::CommentId;
use chrono::{DateTime, Utc};

/// Builder for creating comments with fluent API
pub struct CommentBuilder {
    id: CommentId,
    body: String,
    permalink: Option<String>,
    subreddit: String,
    score: i64,
    created_utc: f64,
    can_gild: bool,
}

impl CommentBuilder {
    /// Create a new builder for the given comment id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: CommentId::new(id),
            body: String::new(),
            permalink: None,
            subreddit: String::new(),
            score: 1,
            created_utc: 0.0,
            can_gild: false,
        }
    }

    /// Set the body text
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Set the permalink
    pub fn permalink(mut self, permalink: impl Into<String>) -> Self {
        self.permalink = Some(permalink.into());
        self
    }

    /// Set the subreddit
    pub fn subreddit(mut self, subreddit: impl Into<String>) -> Self {
        self.subreddit = subreddit.into();
        self
    }

    /// Set the score
    pub fn score(mut self, score: i64) -> Self {
        self.score = score;
        self
    }

    /// Set the creation time in epoch seconds
    pub fn created_utc(mut self, created_utc: f64) -> Self {
        self.created_utc = created_utc;
        self
    }

    /// Set the creation time from an instant
    pub fn created_at(self, created: DateTime<Utc>) -> Self {
        self.created_utc(created.timestamp() as f64)
    }

    /// Set the gildable flag
    pub fn can_gild(mut self, can_gild: bool) -> Self {
        self.can_gild = can_gild;
        self
    }

    /// Build the comment
    pub fn build(self) -> Comment {
        let permalink = self.permalink.unwrap_or_else(|| {
            format!("/r/{}/comments/_/_/{}/", self.subreddit, self.id)
        });

        Comment {
            id: self.id,
            body: self.body,
            permalink,
            subreddit: self.subreddit,
            source: Source {
                score: self.score,
                created_utc: self.created_utc,
                can_gild: self.can_gild,
            },
        }
    }
}

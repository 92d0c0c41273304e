//! Platform API seam
//!
//! The stream source and remediation workflow only see this trait. The
//! HTTP implementation lives in `cs-reddit`.

use crate::comment::Comment;
use crate::error::Result;
use crate::types::Fullname;
use async_trait::async_trait;

/// One page of the comment listing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Comments in platform order, most recent first
    pub comments: Vec<Comment>,
    /// Cursor for the next page
    pub after: Option<String>,
    /// Cursor for the previous page, unused
    pub before: Option<String>,
}

impl Page {
    /// Build a page from comments and a next cursor
    pub fn new(comments: Vec<Comment>, after: Option<impl Into<String>>) -> Self {
        Self {
            comments,
            after: after.map(Into::into),
            before: None,
        }
    }

    /// Cursor for the next page, if the listing continues
    pub fn next_cursor(&self) -> Option<&str> {
        self.after.as_deref().filter(|after| !after.is_empty())
    }

    /// Whether pagination stops after this page
    pub fn is_last(&self) -> bool {
        self.comments.is_empty() || self.next_cursor().is_none()
    }
}

/// Result of a content replacement call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The response carried the success marker
    Edited,
    /// The platform answered without the success marker
    Rejected(String),
}

/// Operations the core needs from the platform
#[async_trait]
pub trait CommentApi: Send + Sync {
    /// Fetch one page of the account's comments
    async fn fetch_page(&self, after: Option<&str>) -> Result<Page>;

    /// Replace a comment's body
    async fn edit(&self, fullname: &Fullname, text: &str) -> Result<EditOutcome>;

    /// Delete a comment
    async fn delete(&self, fullname: &Fullname) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_termination() {
        let comment = Comment::builder("a").build();

        assert!(Page::new(vec![], Some("t1_x")).is_last());
        assert!(Page::new(vec![comment.clone()], None::<String>).is_last());
        assert!(Page::new(vec![comment.clone()], Some("")).is_last());
        assert!(!Page::new(vec![comment], Some("t1_x")).is_last());
    }

    #[test]
    fn test_next_cursor_filters_empty() {
        assert_eq!(Page::new(vec![], Some("")).next_cursor(), None);
        assert_eq!(Page::new(vec![], Some("t1_x")).next_cursor(), Some("t1_x"));
    }
}

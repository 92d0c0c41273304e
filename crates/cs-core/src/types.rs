//! Core type definitions for comment-scrubber

use serde::{Deserialize, Serialize};
use std::fmt;

/// Platform identifier of a comment, as returned by the listing endpoint
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(String);

impl CommentId {
    /// Create a CommentId from a raw platform id
    pub fn new(id: impl Into<String>) -> Self {
        CommentId(id.into())
    }

    /// Raw id without a type prefix
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CommentId {
    fn from(id: &str) -> Self {
        CommentId::new(id)
    }
}

/// Content types sharing the platform's id namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// A comment (`t1`)
    Comment,
}

impl ContentKind {
    /// Type tag used as the fullname prefix
    pub fn tag(&self) -> &'static str {
        match self {
            ContentKind::Comment => "t1",
        }
    }

    /// Parse a listing `kind` field
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "t1" => Some(ContentKind::Comment),
            _ => None,
        }
    }
}

/// Globally namespaced identifier used by the mutating endpoints
///
/// Always `<kind tag>_<id>`, e.g. `t1_abc123`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fullname(String);

impl Fullname {
    /// Build the fullname of a piece of content
    pub fn new(kind: ContentKind, id: &CommentId) -> Self {
        Fullname(format!("{}_{}", kind.tag(), id.as_str()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fullname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//! Listing response decoding

use cs_core::comment::{Comment, Source};
use cs_core::error::{Result, ScrubError};
use cs_core::types::{CommentId, ContentKind};
use cs_core::Page;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Child>,
    #[serde(default)]
    after: Option<String>,
    #[serde(default)]
    before: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Child {
    #[serde(default)]
    kind: Option<String>,
    data: CommentData,
}

#[derive(Debug, Deserialize)]
struct CommentData {
    id: String,
    #[serde(default)]
    body: String,
    #[serde(default)]
    permalink: String,
    subreddit: String,
    #[serde(default)]
    score: i64,
    created_utc: f64,
    #[serde(default)]
    can_gild: bool,
}

impl From<CommentData> for Comment {
    fn from(data: CommentData) -> Self {
        Comment {
            id: CommentId::new(data.id),
            body: data.body,
            permalink: data.permalink,
            subreddit: data.subreddit,
            source: Source {
                score: data.score,
                created_utc: data.created_utc,
                can_gild: data.can_gild,
            },
        }
    }
}

/// Decode one listing page; any malformed entry rejects the whole page
pub(crate) fn decode_page(endpoint: &str, body: &[u8]) -> Result<Page> {
    let listing: Listing = serde_json::from_slice(body).map_err(|e| ScrubError::Decode {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })?;

    let mut comments = Vec::with_capacity(listing.data.children.len());
    for child in listing.data.children {
        if let Some(kind) = child.kind.as_deref() {
            if ContentKind::from_tag(kind) != Some(ContentKind::Comment) {
                return Err(ScrubError::Decode {
                    endpoint: endpoint.to_string(),
                    message: format!("unexpected content kind '{}' in comment listing", kind),
                });
            }
        }
        comments.push(Comment::from(child.data));
    }

    Ok(Page {
        comments,
        after: listing.data.after,
        before: listing.data.before,
    })
}

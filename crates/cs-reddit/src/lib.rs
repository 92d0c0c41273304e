//! cs-reddit - Reddit API client for comment-scrubber
//!
//! Implements [`cs_core::CommentApi`] over Reddit's REST endpoints and
//! performs the OAuth password grant that produces the bearer token.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cs_reddit::{build_http_client, Authenticator, Endpoints, RedditClient};
//!
//! let endpoints = Endpoints::from_config(&config.endpoints)?;
//! let http = build_http_client(&credentials.user_agent)?;
//! let token = Authenticator::new(http.clone(), endpoints.clone())
//!     .authenticate(&credentials)
//!     .await?;
//! let client = RedditClient::new(http, endpoints, &credentials.username, token);
//! ```

mod auth;
mod client;
mod endpoints;
mod listing;

pub use auth::{AccessToken, Authenticator};
pub use client::{build_http_client, RedditClient};
pub use endpoints::Endpoints;

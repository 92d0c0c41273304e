//! Comment module
//!
//! The comment record as retrieved from the listing endpoint.

pub mod builder;
pub mod model;

pub use builder::CommentBuilder;
pub use model::*;

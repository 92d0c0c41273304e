//! comment-scrubber - remove old Reddit comments
//!
//! Walks an account's comment history, keeps whatever the retention policy
//! protects, and overwrites then deletes the rest.
//!
//! ## Quick Start
//!
//! ```bash
//! # Write a starter config (dry run enabled)
//! comment-scrubber config init
//!
//! # Check credentials and try a token exchange
//! comment-scrubber doctor --auth
//!
//! # See what would be removed
//! comment-scrubber run --dry-run
//!
//! # Remove comments older than 5 years
//! comment-scrubber run --years-back 5
//! ```

mod commands;

#[tokio::main]
async fn main() {
    if let Err(err) = commands::run().await {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

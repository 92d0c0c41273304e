//! Sweep driver
//!
//! Single consumer loop: pull one comment from the stream, run the
//! remediation workflow to completion, record the outcome, repeat.

use crate::api::CommentApi;
use crate::error::Result;
use crate::policy::RetentionPolicy;
use crate::stream::CommentStream;
use crate::summary::RunSummary;
use crate::workflow::{until_cancelled, Remediator};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Drives one full pass over the account's comments
pub struct Sweeper<A: ?Sized> {
    api: Arc<A>,
    remediator: Remediator<A>,
    cancel: CancellationToken,
}

impl<A> Sweeper<A>
where
    A: CommentApi + ?Sized + 'static,
{
    pub fn new(api: Arc<A>, policy: Arc<RetentionPolicy>, cancel: CancellationToken) -> Self {
        Self {
            remediator: Remediator::new(api.clone(), policy),
            api,
            cancel,
        }
    }

    /// Override the pacing delay between remediated comments
    pub fn with_pace(mut self, pace: Duration) -> Self {
        self.remediator = self.remediator.with_pace(pace);
        self
    }

    /// Run until the stream is exhausted, a fatal error occurs, or the
    /// token is cancelled
    ///
    /// Counters are written into `summary` as comments are processed, so
    /// it is accurate even when this returns an error.
    pub async fn run(&self, summary: &mut RunSummary) -> Result<()> {
        let policy = self.remediator.policy();
        info!(
            cutoff = %policy.cutoff.to_rfc3339(),
            max_score = policy.max_score,
            preserved_ids = policy.preserved_ids.len(),
            preserved_subreddits = policy.preserved_subreddits.len(),
            dry_run = policy.dry_run,
            "Starting sweep"
        );

        let mut stream = CommentStream::spawn(self.api.clone(), self.cancel.clone());

        while let Some(item) = until_cancelled(&self.cancel, stream.next()).await? {
            let comment = item?;
            let outcome = self.remediator.process(&comment, &self.cancel).await?;
            summary.record(&outcome);
        }

        info!(seen = summary.seen, "Comment stream exhausted");
        Ok(())
    }
}

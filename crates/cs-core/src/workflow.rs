//! Remediation workflow
//!
//! For every comment the filter keeps: overwrite the body, delete the
//! comment, then wait out the pacing delay. Edit and delete failures are
//! logged and contained here; the only error `process` returns is
//! cancellation.

use crate::api::{CommentApi, EditOutcome};
use crate::comment::Comment;
use crate::error::{Result, ScrubError};
use crate::filter::{decide, Disposition};
use crate::policy::RetentionPolicy;
use crate::types::Fullname;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Default wait between comments that issued mutating calls
pub const DEFAULT_PACE: Duration = Duration::from_secs(15);

/// What happened to a single comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Preserved by the retention policy
    Skipped(Disposition),
    /// Eligible, but the policy is in dry-run mode
    WouldRemove,
    /// Edit and delete were attempted
    Remediated { edited: bool, deleted: bool },
}

/// Runs the edit-then-delete sequence for one comment at a time
pub struct Remediator<A: ?Sized> {
    api: Arc<A>,
    policy: Arc<RetentionPolicy>,
    pace: Duration,
}

impl<A> Remediator<A>
where
    A: CommentApi + ?Sized,
{
    /// Create a remediator with the default pacing delay
    pub fn new(api: Arc<A>, policy: Arc<RetentionPolicy>) -> Self {
        Self {
            api,
            policy,
            pace: DEFAULT_PACE,
        }
    }

    /// Override the pacing delay
    pub fn with_pace(mut self, pace: Duration) -> Self {
        self.pace = pace;
        self
    }

    pub fn policy(&self) -> &RetentionPolicy {
        &self.policy
    }

    /// Process one comment to completion
    pub async fn process(&self, comment: &Comment, cancel: &CancellationToken) -> Result<Outcome> {
        let disposition = decide(comment, &self.policy);
        if let Some(reason) = disposition.reason() {
            info!(
                id = %comment.id,
                subreddit = %comment.subreddit,
                disposition = %disposition,
                "Skipping: {}",
                reason
            );
            return Ok(Outcome::Skipped(disposition));
        }

        if self.policy.dry_run {
            info!(
                id = %comment.id,
                subreddit = %comment.subreddit,
                score = comment.score(),
                permalink = %comment.permalink,
                "Would remove (dry run)"
            );
            return Ok(Outcome::WouldRemove);
        }

        let fullname = comment.fullname();
        let edited = self.edit(&fullname, cancel).await?;
        let deleted = self.delete(&fullname, cancel).await?;

        info!(pace_secs = self.pace.as_secs(), "Sleeping before next comment");
        until_cancelled(cancel, tokio::time::sleep(self.pace)).await?;

        Ok(Outcome::Remediated { edited, deleted })
    }

    async fn edit(&self, fullname: &Fullname, cancel: &CancellationToken) -> Result<bool> {
        info!(fullname = %fullname, "Editing...");
        let result = until_cancelled(
            cancel,
            self.api.edit(fullname, &self.policy.replacement_text),
        )
        .await?;

        match result {
            Ok(EditOutcome::Edited) => {
                info!(fullname = %fullname, "Edited successfully");
                Ok(true)
            }
            Ok(EditOutcome::Rejected(response)) => {
                warn!(fullname = %fullname, response = %response, "Edit rejected, deleting anyway");
                Ok(false)
            }
            Err(err) => {
                warn!(fullname = %fullname, error = %err, "Edit failed, deleting anyway");
                Ok(false)
            }
        }
    }

    async fn delete(&self, fullname: &Fullname, cancel: &CancellationToken) -> Result<bool> {
        info!(fullname = %fullname, "Deleting...");
        match until_cancelled(cancel, self.api.delete(fullname)).await? {
            Ok(()) => {
                info!(fullname = %fullname, "Delete requested");
                Ok(true)
            }
            Err(err) => {
                warn!(fullname = %fullname, error = %err, "Delete failed");
                Ok(false)
            }
        }
    }
}

/// Run a future unless the token fires first
pub(crate) async fn until_cancelled<F>(cancel: &CancellationToken, fut: F) -> Result<F::Output>
where
    F: Future,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ScrubError::Cancelled),
        output = fut => Ok(output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, ScriptedApi};
    use chrono::{DateTime, Duration as Age, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn cutoff() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2016, 1, 1, 0, 0, 0).unwrap()
    }

    fn eligible(id: &str) -> Comment {
        Comment::builder(id)
            .subreddit("x")
            .score(0)
            .created_at(cutoff() - Age::days(30))
            .build()
    }

    fn remediator(api: Arc<ScriptedApi>, policy: RetentionPolicy) -> Remediator<ScriptedApi> {
        Remediator::new(api, Arc::new(policy)).with_pace(Duration::from_secs(15))
    }

    #[tokio::test(start_paused = true)]
    async fn test_edit_then_delete_then_pace() {
        let api = Arc::new(ScriptedApi::new());
        let policy = RetentionPolicy::new(cutoff()).replacement_text("[removed]");
        let remediator = remediator(api.clone(), policy);

        let started = tokio::time::Instant::now();
        let outcome = remediator
            .process(&eligible("abc"), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(
            outcome,
            Outcome::Remediated {
                edited: true,
                deleted: true
            }
        );
        assert_eq!(
            api.calls(),
            vec![
                Call::Edit {
                    fullname: "t1_abc".into(),
                    text: "[removed]".into()
                },
                Call::Delete("t1_abc".into()),
            ]
        );
        assert!(started.elapsed() >= Duration::from_secs(15));
    }

    #[tokio::test]
    async fn test_empty_replacement_is_sent() {
        let api = Arc::new(ScriptedApi::new());
        let remediator = remediator(api.clone(), RetentionPolicy::new(cutoff())).with_pace(Duration::ZERO);

        remediator
            .process(&eligible("abc"), &CancellationToken::new())
            .await
            .unwrap();

        assert!(matches!(
            &api.calls()[0],
            Call::Edit { text, .. } if text.is_empty()
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_skipped_comment_makes_no_calls_and_does_not_pace() {
        let api = Arc::new(ScriptedApi::new());
        let remediator = remediator(api.clone(), RetentionPolicy::new(cutoff()).preserve_ids(["abc"]));

        let started = tokio::time::Instant::now();
        let outcome = remediator
            .process(&eligible("abc"), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Skipped(Disposition::SkipById));
        assert!(api.calls().is_empty());
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_dry_run_makes_no_calls() {
        let api = Arc::new(ScriptedApi::new());
        let remediator = remediator(api.clone(), RetentionPolicy::new(cutoff()).dry_run(true));

        for id in ["a", "b", "c"] {
            let outcome = remediator
                .process(&eligible(id), &CancellationToken::new())
                .await
                .unwrap();
            assert_eq!(outcome, Outcome::WouldRemove);
        }
        assert!(api.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_edit_still_deletes() {
        let api = Arc::new(ScriptedApi::new().reject_edit("t1_abc"));
        let remediator = remediator(api.clone(), RetentionPolicy::new(cutoff()));

        let outcome = remediator
            .process(&eligible("abc"), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(
            outcome,
            Outcome::Remediated {
                edited: false,
                deleted: true
            }
        );
        assert_eq!(api.mutations().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_failures_are_contained() {
        let api = Arc::new(ScriptedApi::new().fail_edit("t1_abc").fail_delete("t1_abc"));
        let remediator = remediator(api.clone(), RetentionPolicy::new(cutoff()));

        let outcome = remediator
            .process(&eligible("abc"), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(
            outcome,
            Outcome::Remediated {
                edited: false,
                deleted: false
            }
        );
        assert_eq!(api.mutations().len(), 2);
    }

    #[tokio::test]
    async fn test_cancelled_before_edit() {
        let api = Arc::new(ScriptedApi::new());
        let remediator = remediator(api.clone(), RetentionPolicy::new(cutoff()));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = remediator.process(&eligible("abc"), &cancel).await.unwrap_err();
        assert!(matches!(err, ScrubError::Cancelled));
        assert!(api.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_interrupts_pacing() {
        let api = Arc::new(ScriptedApi::new());
        let remediator = remediator(api.clone(), RetentionPolicy::new(cutoff()))
            .with_pace(Duration::from_secs(3600));
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            trigger.cancel();
        });

        let err = remediator.process(&eligible("abc"), &cancel).await.unwrap_err();
        assert!(matches!(err, ScrubError::Cancelled));
        assert_eq!(api.mutations().len(), 2);
    }
}

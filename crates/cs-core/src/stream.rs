//! Comment stream source
//!
//! Turns the cursor-based listing endpoint into a lazy sequence of
//! comments. A producer task owns the cursor and pushes comments through a
//! bounded channel, so it only runs ahead of the consumer by a single
//! comment. A listing failure is delivered as the last item and closes the
//! stream.

use crate::api::CommentApi;
use crate::comment::Comment;
use crate::error::{Result, ScrubError};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Capacity of the hand-off channel between producer and consumer
pub const HANDOFF_CAPACITY: usize = 1;

/// Lazy, ordered sequence of the account's comments
///
/// Not restartable: spawn a new stream to start again from the first page.
pub struct CommentStream {
    rx: mpsc::Receiver<Result<Comment>>,
    producer: JoinHandle<()>,
}

impl CommentStream {
    /// Start paginating in a background task
    pub fn spawn<A>(api: Arc<A>, cancel: CancellationToken) -> Self
    where
        A: CommentApi + ?Sized + 'static,
    {
        let (tx, rx) = mpsc::channel(HANDOFF_CAPACITY);
        let producer = tokio::spawn(async move {
            match paginate(api.as_ref(), &tx, &cancel).await {
                Ok(pages) => debug!(pages, "Comment listing exhausted"),
                Err(ScrubError::Cancelled) => debug!("Comment listing cancelled"),
                Err(err) => {
                    warn!(error = %err, "Comment listing failed");
                    let _ = tx.send(Err(err)).await;
                }
            }
        });

        Self { rx, producer }
    }

    /// Next comment, `None` once the listing is exhausted
    ///
    /// An `Err` item is always the last one.
    pub async fn next(&mut self) -> Option<Result<Comment>> {
        self.rx.recv().await
    }
}

impl Drop for CommentStream {
    fn drop(&mut self) {
        self.producer.abort();
    }
}

/// Fetch pages until exhaustion, returning the number of pages fetched
async fn paginate<A>(
    api: &A,
    tx: &mpsc::Sender<Result<Comment>>,
    cancel: &CancellationToken,
) -> Result<usize>
where
    A: CommentApi + ?Sized,
{
    info!("Fetching comments...");
    let mut cursor: Option<String> = None;
    let mut pages = 0;

    loop {
        let page = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ScrubError::Cancelled),
            page = api.fetch_page(cursor.as_deref()) => page.map_err(ScrubError::into_stream)?,
        };
        pages += 1;

        let last = page.is_last();
        let next = page.next_cursor().map(str::to_string);
        debug!(
            page = pages,
            comments = page.comments.len(),
            after = next.as_deref().unwrap_or(""),
            "Fetched listing page"
        );

        for comment in page.comments {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(ScrubError::Cancelled),
                sent = tx.send(Ok(comment)) => {
                    if sent.is_err() {
                        debug!("Comment stream consumer went away");
                        return Ok(pages);
                    }
                }
            }
        }

        if last {
            return Ok(pages);
        }
        cursor = next;
    }
}

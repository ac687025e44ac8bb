//! State snapshot collection for store observation tests

use std::time::Duration;
use tokio::sync::broadcast;

/// Collects state snapshots from a store subscription
///
/// # Example
///
/// ```ignore
/// let mut probe = StateProbe::new(store.subscribe());
/// store.send(Action::Fetch).await?;
/// let loading = probe.next().await.unwrap();
/// assert!(loading.is_loading);
/// ```
pub struct StateProbe<S> {
    receiver: broadcast::Receiver<S>,
    seen: Vec<S>,
}

impl<S: Clone> StateProbe<S> {
    /// Wrap a snapshot receiver
    #[must_use]
    pub const fn new(receiver: broadcast::Receiver<S>) -> Self {
        Self {
            receiver,
            seen: Vec::new(),
        }
    }

    /// Await the next snapshot
    ///
    /// Returns `None` once the channel closes (store teardown). Lagged
    /// snapshots are skipped, never fabricated.
    pub async fn next(&mut self) -> Option<S> {
        loop {
            match self.receiver.recv().await {
                Ok(snapshot) => {
                    self.seen.push(snapshot.clone());
                    return Some(snapshot);
                },
                Err(broadcast::error::RecvError::Lagged(_)) => {},
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Await the next snapshot, giving up after `timeout`
    pub async fn next_within(&mut self, timeout: Duration) -> Option<S> {
        tokio::time::timeout(timeout, self.next()).await.ok()?
    }

    /// Collect snapshots until none arrive for `quiet`
    pub async fn drain(&mut self, quiet: Duration) -> Vec<S> {
        while self.next_within(quiet).await.is_some() {}
        self.seen.clone()
    }

    /// Every snapshot observed so far
    #[must_use]
    pub fn seen(&self) -> &[S] {
        &self.seen
    }
}

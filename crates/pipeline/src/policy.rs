//! Batched fan-out used to stay under the upstream rate limit.

use std::future::Future;
use std::time::Duration;

use futures::future::join_all;

/// Requests in flight at once.
pub const DEFAULT_BATCH_SIZE: usize = 5;

/// Pause between two consecutive batches.
pub const DEFAULT_INTER_BATCH_DELAY: Duration = Duration::from_millis(500);

/// How work items are split into batches and paced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPolicy {
    pub batch_size: usize,
    pub inter_batch_delay: Duration,
}

impl Default for BatchPolicy {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            inter_batch_delay: DEFAULT_INTER_BATCH_DELAY,
        }
    }
}

impl BatchPolicy {
    pub fn with_delay(inter_batch_delay: Duration) -> Self {
        Self {
            inter_batch_delay,
            ..Self::default()
        }
    }

    /// Number of batches `items` work items are split into.
    pub fn batch_count(&self, items: usize) -> usize {
        items.div_ceil(self.batch_size.max(1))
    }
}

/// Run `task` over `items`, `batch_size` at a time.
///
/// Each batch runs concurrently and is awaited as a whole before the next
/// one starts. The delay is only applied between batches, never after the
/// last one. Results come back in input order.
pub async fn run_batched<T, R, F, Fut>(policy: BatchPolicy, items: Vec<T>, mut task: F) -> Vec<R>
where
    F: FnMut(T) -> Fut,
    Fut: Future<Output = R>,
{
    let batch_size = policy.batch_size.max(1);
    let batch_count = policy.batch_count(items.len());
    let mut results = Vec::with_capacity(items.len());
    let mut pending = items.into_iter();

    for batch in 0..batch_count {
        let in_flight: Vec<Fut> = pending.by_ref().take(batch_size).map(&mut task).collect();
        tracing::debug!(
            batch = batch + 1,
            of = batch_count,
            size = in_flight.len(),
            "Running batch"
        );
        results.extend(join_all(in_flight).await);

        if batch + 1 < batch_count && !policy.inter_batch_delay.is_zero() {
            tokio::time::sleep(policy.inter_batch_delay).await;
        }
    }

    results
}

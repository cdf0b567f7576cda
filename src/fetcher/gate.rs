//! Concurrency cap for outbound requests

use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Limits how many requests may be in flight at once
///
/// Each fetcher owns its own gate, so independently configured fetchers never
/// share a budget. Clones share the same underlying semaphore. Callers that
/// exceed the limit wait until a permit is released.
#[derive(Debug, Clone)]
pub struct ConcurrencyGate {
    semaphore: Arc<Semaphore>,
    limit: usize,
}

impl ConcurrencyGate {
    /// Creates a gate admitting at most `limit` holders (minimum one)
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(limit)),
            limit,
        }
    }

    /// The configured limit
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of permits currently held
    pub fn in_flight(&self) -> usize {
        self.limit - self.semaphore.available_permits()
    }

    /// Waits for a free slot
    ///
    /// The slot is released when the returned permit is dropped.
    pub async fn acquire(&self) -> OwnedSemaphorePermit {
        match Arc::clone(&self.semaphore).acquire_owned().await {
            Ok(permit) => permit,
            // The semaphore is private to the gate and never closed
            Err(_) => unreachable!("concurrency gate semaphore closed"),
        }
    }
}

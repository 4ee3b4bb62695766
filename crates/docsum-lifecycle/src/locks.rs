//! Per-document async locks.
//!
//! Update and delete hold a document's lock across
//! verify → invalidate → write. Summary creation takes it only around the
//! final existence re-check and insert, never across the summarizer call.

use std::collections::HashMap;
use std::sync::Arc;

use docsum_core::DocumentId;
use parking_lot::Mutex;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Number of idle entries tolerated before the registry prunes itself.
const PRUNE_THRESHOLD: usize = 1024;

/// Registry of one `tokio::sync::Mutex` per document id.
///
/// Cloning shares the registry.
#[derive(Debug, Clone, Default)]
pub struct DocumentLocks {
    inner: Arc<Mutex<HashMap<DocumentId, Arc<AsyncMutex<()>>>>>,
}

impl DocumentLocks {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `id`. The lock is released when the
    /// returned guard is dropped.
    pub async fn acquire(&self, id: DocumentId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.inner.lock();
            if map.len() >= PRUNE_THRESHOLD {
                // Only the registry holds a reference: nobody is waiting.
                map.retain(|_, lock| Arc::strong_count(lock) > 1);
            }
            Arc::clone(map.entry(id).or_default())
        };
        lock.lock_owned().await
    }

    /// Drop the registry entry for a deleted document.
    pub fn forget(&self, id: DocumentId) {
        self.inner.lock().remove(&id);
    }

    /// Number of tracked documents.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether no document is tracked.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

//! Per-table append locks.
//!
//! Row identifiers are derived from the current row count, so reading the
//! grid and appending the new row must happen as one step per table. Each
//! `(collection, table)` pair gets its own async mutex; appends to different
//! tables proceed in parallel.
//!
//! Only writers inside this process are coordinated.

use std::sync::Arc;

use dashmap::DashMap;
use sheetbase_core::CollectionId;
use tokio::sync::{Mutex, OwnedMutexGuard};

type TableKey = (CollectionId, String);

/// Registry of per-table mutexes, created on first use.
#[derive(Debug, Default)]
pub struct AppendLocks {
    locks: DashMap<TableKey, Arc<Mutex<()>>>,
}

impl AppendLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive append access to one table.
    ///
    /// The returned guard releases the table when dropped.
    pub async fn acquire(&self, collection_id: &CollectionId, table: &str) -> OwnedMutexGuard<()> {
        // Clone the Arc out so the DashMap shard is not held across the await.
        let lock = self
            .locks
            .entry((collection_id.clone(), table.to_string()))
            .or_default()
            .clone();
        lock.lock_owned().await
    }

    /// Number of tables that have been locked at least once.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

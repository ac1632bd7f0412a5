//! In-memory grid store.
//!
//! Behaves like the remote spreadsheet service for the operations the API
//! uses: new collections start with a single empty `Sheet1` table, table names
//! are unique per collection, and appended cells read back as their formatted
//! value.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use async_trait::async_trait;
use sheetbase_core::{
    CellValue, Collection, CollectionId, CollectionRef, GridRow, StoreError, Table, TableId,
    TableRef,
};

use crate::store::GridStore;

/// Name of the table every new collection starts with.
pub const DEFAULT_TABLE_NAME: &str = "Sheet1";

/// In-memory [`GridStore`] for tests and local development.
#[derive(Debug, Clone)]
pub struct MockGridStore {
    collections: Arc<RwLock<HashMap<CollectionId, Collection>>>,
    next_collection: Arc<AtomicU64>,
    next_table: Arc<AtomicI64>,
    append_calls: Arc<AtomicU64>,
    fail_create: Arc<Mutex<Option<StoreError>>>,
    fail_append: Arc<Mutex<Option<StoreError>>>,
}

impl MockGridStore {
    pub fn new() -> Self {
        Self {
            collections: Arc::new(RwLock::new(HashMap::new())),
            next_collection: Arc::new(AtomicU64::new(1)),
            next_table: Arc::new(AtomicI64::new(1)),
            append_calls: Arc::new(AtomicU64::new(0)),
            fail_create: Arc::new(Mutex::new(None)),
            fail_append: Arc::new(Mutex::new(None)),
        }
    }

    /// Seed a collection directly, bypassing `create_collection`.
    pub fn insert_collection(&self, collection: Collection) {
        let mut collections = self.collections.write().unwrap_or_else(|e| e.into_inner());
        collections.insert(collection.collection_id.clone(), collection);
    }

    /// The next `create_collection` or `create_table` call fails with `error`.
    pub fn fail_next_create(&self, error: StoreError) {
        *self.fail_create.lock().unwrap_or_else(|e| e.into_inner()) = Some(error);
    }

    /// The next `append_row` call fails with `error`.
    pub fn fail_next_append(&self, error: StoreError) {
        *self.fail_append.lock().unwrap_or_else(|e| e.into_inner()) = Some(error);
    }

    /// Drop a table, simulating a deletion made outside this service.
    pub fn remove_table(&self, collection_id: &CollectionId, name: &str) -> bool {
        let mut collections = self.collections.write().unwrap_or_else(|e| e.into_inner());
        match collections.get_mut(collection_id) {
            Some(collection) => {
                let before = collection.tables.len();
                collection.tables.retain(|table| table.name != name);
                collection.tables.len() != before
            }
            None => false,
        }
    }

    /// Current grid of a table, if it exists.
    pub fn table_rows(&self, collection_id: &CollectionId, name: &str) -> Option<Vec<GridRow>> {
        let collections = self.collections.read().unwrap_or_else(|e| e.into_inner());
        collections
            .get(collection_id)?
            .tables
            .iter()
            .find(|table| table.name == name)
            .map(|table| table.rows.clone())
    }

    pub fn collection_count(&self) -> usize {
        self.collections.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Total number of `append_row` calls that reached the store.
    pub fn append_calls(&self) -> u64 {
        self.append_calls.load(Ordering::SeqCst)
    }

    fn take_failure(slot: &Mutex<Option<StoreError>>) -> Option<StoreError> {
        slot.lock().unwrap_or_else(|e| e.into_inner()).take()
    }
}

impl Default for MockGridStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GridStore for MockGridStore {
    async fn create_collection(&self, title: &str) -> Result<CollectionRef, StoreError> {
        tokio::task::yield_now().await;
        if let Some(error) = Self::take_failure(&self.fail_create) {
            return Err(error);
        }

        let n = self.next_collection.fetch_add(1, Ordering::SeqCst);
        let collection_id = CollectionId::new(format!("mock-collection-{:04}", n));
        let collection = Collection {
            collection_id: collection_id.clone(),
            title: title.to_string(),
            tables: vec![Table::new(0, DEFAULT_TABLE_NAME)],
        };
        self.insert_collection(collection);

        Ok(CollectionRef {
            collection_id,
            title: title.to_string(),
        })
    }

    async fn get_collection(
        &self,
        collection_id: &CollectionId,
        include_grid_data: bool,
    ) -> Result<Collection, StoreError> {
        tokio::task::yield_now().await;
        let collections = self.collections.read().unwrap_or_else(|e| e.into_inner());
        let mut collection = collections
            .get(collection_id)
            .cloned()
            .ok_or_else(|| StoreError::CollectionNotFound {
                collection_id: collection_id.to_string(),
            })?;
        if !include_grid_data {
            for table in &mut collection.tables {
                table.rows.clear();
            }
        }
        Ok(collection)
    }

    async fn create_table(
        &self,
        collection_id: &CollectionId,
        name: &str,
    ) -> Result<TableRef, StoreError> {
        tokio::task::yield_now().await;
        if let Some(error) = Self::take_failure(&self.fail_create) {
            return Err(error);
        }

        let mut collections = self.collections.write().unwrap_or_else(|e| e.into_inner());
        let collection =
            collections
                .get_mut(collection_id)
                .ok_or_else(|| StoreError::CollectionNotFound {
                    collection_id: collection_id.to_string(),
                })?;

        if collection.tables.iter().any(|table| table.name == name) {
            return Err(StoreError::Conflict {
                reason: format!("A sheet with the name \"{}\" already exists", name),
            });
        }

        let table = Table::new(self.next_table.fetch_add(1, Ordering::SeqCst), name);
        let table_ref = table.table_ref();
        collection.tables.push(table);
        Ok(table_ref)
    }

    async fn append_row(
        &self,
        collection_id: &CollectionId,
        table_id: TableId,
        values: &[CellValue],
    ) -> Result<(), StoreError> {
        tokio::task::yield_now().await;
        self.append_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = Self::take_failure(&self.fail_append) {
            return Err(error);
        }

        let mut collections = self.collections.write().unwrap_or_else(|e| e.into_inner());
        let collection =
            collections
                .get_mut(collection_id)
                .ok_or_else(|| StoreError::CollectionNotFound {
                    collection_id: collection_id.to_string(),
                })?;
        let table = collection
            .tables
            .iter_mut()
            .find(|table| table.table_id == table_id)
            .ok_or_else(|| StoreError::AppendFailed {
                reason: format!("no sheet with id {}", table_id),
            })?;

        table.rows.push(values.iter().map(CellValue::to_cell).collect());
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

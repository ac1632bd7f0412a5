//! Remote grid store capability.
//!
//! The API layer never talks to a spreadsheet service directly; it goes
//! through this trait so the HTTP client and the in-memory store are
//! interchangeable.

use async_trait::async_trait;
use sheetbase_core::{CellValue, Collection, CollectionId, CollectionRef, StoreError, TableId, TableRef};

/// Async grid store operations.
///
/// Implementations must be safe to share across request tasks.
#[async_trait]
pub trait GridStore: Send + Sync {
    // ========================================================================
    // COLLECTION OPERATIONS
    // ========================================================================

    /// Create an empty collection with the given title.
    async fn create_collection(&self, title: &str) -> Result<CollectionRef, StoreError>;

    /// Fetch a collection's table metadata and, when `include_grid_data` is
    /// set, every table's cell grid.
    async fn get_collection(
        &self,
        collection_id: &CollectionId,
        include_grid_data: bool,
    ) -> Result<Collection, StoreError>;

    /// Fetch a collection with only the first row of every table populated.
    ///
    /// The default implementation fetches full grid data and truncates it.
    /// Stores that can request a header range directly should override this.
    async fn get_header_rows(&self, collection_id: &CollectionId) -> Result<Collection, StoreError> {
        let mut collection = self.get_collection(collection_id, true).await?;
        for table in &mut collection.tables {
            table.rows.truncate(1);
        }
        Ok(collection)
    }

    // ========================================================================
    // TABLE OPERATIONS
    // ========================================================================

    /// Add an empty table to a collection. Fails with `Conflict` when a table
    /// with the same name exists.
    async fn create_table(
        &self,
        collection_id: &CollectionId,
        name: &str,
    ) -> Result<TableRef, StoreError>;

    /// Append one row after the last populated row of a table.
    async fn append_row(
        &self,
        collection_id: &CollectionId,
        table_id: TableId,
        values: &[CellValue],
    ) -> Result<(), StoreError>;

    /// Short backend name used in logs and metrics labels.
    fn backend(&self) -> &'static str;
}

//! Object Service
//!
//! Appends one object as a row, assigning the next positional identifier.

use sheetbase_core::{
    encode_row, find_table, header_row, next_identifier, CollectionId, RowId, SheetbaseResult,
    TableError, TableId, ValidationError,
};
use sheetbase_storage::{AppendLocks, GridStore};

/// Outcome of an append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppendedRow {
    pub row_id: RowId,
    pub table_id: TableId,
}

/// Append `values` to a table as a new row with a fresh identifier.
///
/// Reading the grid, computing the identifier and appending all happen under
/// the table's append lock. A table without a header row is refused: its first
/// row would be taken for the header and identifiers would repeat.
pub async fn append_object(
    store: &dyn GridStore,
    locks: &AppendLocks,
    collection_id: &CollectionId,
    table_name: &str,
    values: &[String],
) -> SheetbaseResult<AppendedRow> {
    let _guard = locks.acquire(collection_id, table_name).await;

    let collection = store.get_collection(collection_id, true).await?;
    let table = find_table(&collection, table_name)?;

    let header = header_row(table);
    if header.is_empty() {
        return Err(TableError::MissingHeader {
            collection: collection.title.clone(),
            table: table_name.to_string(),
        }
        .into());
    }
    if values.len() > header.len() - 1 {
        return Err(ValidationError::malformed(
            "values",
            format!(
                "table '{}' has {} data columns but {} values were given",
                table_name,
                header.len() - 1,
                values.len()
            ),
        )
        .into());
    }

    let row_id = next_identifier(&table.rows);
    let cells = encode_row(row_id, values);
    store
        .append_row(collection_id, table.table_id, &cells)
        .await?;

    tracing::debug!(collection_id = %collection_id, table = table_name, row_id, "Object appended");
    Ok(AppendedRow {
        row_id,
        table_id: table.table_id,
    })
}

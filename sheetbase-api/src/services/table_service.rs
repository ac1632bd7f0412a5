//! Table Service
//!
//! Table introspection, table creation with a header row, and bounded row
//! reads.

use std::collections::BTreeMap;

use sheetbase_core::{
    decode_table, encode_header, find_table, header_row, table_url, CollectionId, DecodedTable,
    SheetbaseResult, StoreError, TableError, ID_COLUMN,
};
use sheetbase_storage::GridStore;

use super::validation::{require_name, validate_headers};
use crate::types::TableCreatedResponse;

/// Header row of every table in a collection.
///
/// A table with no rows maps to an empty header list.
pub async fn list_tables(
    store: &dyn GridStore,
    collection_id: &CollectionId,
) -> SheetbaseResult<BTreeMap<String, Vec<String>>> {
    let collection = store.get_header_rows(collection_id).await?;
    Ok(collection
        .tables
        .iter()
        .map(|table| (table.name.clone(), header_row(table)))
        .collect())
}

/// Create a table and write its header row (`id` followed by `headers`).
///
/// If the header append fails the table is left in place without a header
/// and the returned error names it.
pub async fn create_table(
    store: &dyn GridStore,
    collection_id: &CollectionId,
    name: &str,
    headers: &[String],
) -> SheetbaseResult<TableCreatedResponse> {
    require_name("name", name)?;
    validate_headers(headers)?;

    let existing = store.get_collection(collection_id, false).await?;
    if existing.tables.iter().any(|table| table.name == name) {
        return Err(TableError::TableConflict {
            collection: existing.title,
            table: name.to_string(),
        }
        .into());
    }

    let table = store.create_table(collection_id, name).await?;
    let header_cells = encode_header(headers);

    if let Err(err) = store
        .append_row(collection_id, table.table_id, &header_cells)
        .await
    {
        tracing::warn!(
            collection_id = %collection_id,
            table = name,
            table_id = table.table_id,
            error = %err,
            "Table created without a header row"
        );
        return Err(StoreError::AppendFailed {
            reason: format!(
                "table '{}' was created but its header row could not be written: {}",
                name, err
            ),
        }
        .into());
    }

    tracing::info!(collection_id = %collection_id, table = name, table_id = table.table_id, "Table created");

    let column_headers = std::iter::once(ID_COLUMN.to_string())
        .chain(headers.iter().cloned())
        .collect();

    Ok(TableCreatedResponse {
        collection_id: collection_id.to_string(),
        table_name: table.name,
        table_id: table.table_id,
        url: table_url(collection_id, table.table_id),
        column_headers,
    })
}

/// Header row plus the first `limit` data rows of a table.
pub async fn read_rows(
    store: &dyn GridStore,
    collection_id: &CollectionId,
    table_name: &str,
    limit: usize,
) -> SheetbaseResult<DecodedTable> {
    let collection = store.get_collection(collection_id, true).await?;
    let table = find_table(&collection, table_name)?;
    Ok(decode_table(&table.rows, limit))
}

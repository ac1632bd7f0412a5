//! SHEETBASE Core - Grid Types and Codec
//!
//! Pure data structures and translation logic between a remote grid of
//! formatted cell values and the relational view served by the API
//! (named columns, row identifiers, keyed row records).
//!
//! This crate performs no I/O. Storage and transport live in
//! `sheetbase-storage` and `sheetbase-api`.

pub mod codec;
pub mod error;
pub mod grid;
pub mod ident;

pub use codec::{decode_table, encode_header, encode_row, find_table, header_row, DecodedTable, RowRecord};
pub use error::{
    RegistryError, SheetbaseError, SheetbaseResult, StoreError, TableError, ValidationError,
};
pub use grid::{Cell, CellValue, Collection, CollectionId, CollectionRef, GridRow, Table, TableId, TableRef};
pub use ident::{data_row_count, next_identifier, RowId};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Name of the synthetic identifier column prepended to every table.
pub const ID_COLUMN: &str = "id";

/// Default number of data rows returned by a table read.
pub const DEFAULT_ROW_LIMIT: usize = 10;

/// Upper bound accepted for a table read.
pub const MAX_ROW_LIMIT: usize = 1000;

/// Base URL of the spreadsheet web UI.
pub const SPREADSHEET_WEB_BASE: &str = "https://docs.google.com/spreadsheets/d";

// ============================================================================
// LINKS
// ============================================================================

/// Browser URL of a collection.
pub fn collection_url(collection_id: &CollectionId) -> String {
    format!("{}/{}", SPREADSHEET_WEB_BASE, collection_id)
}

/// Browser URL of a single table inside a collection.
pub fn table_url(collection_id: &CollectionId, table_id: TableId) -> String {
    format!("{}/{}?gid={}", SPREADSHEET_WEB_BASE, collection_id, table_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_url_format() {
        let id = CollectionId::new("abc123");
        assert_eq!(
            table_url(&id, 42),
            "https://docs.google.com/spreadsheets/d/abc123?gid=42"
        );
    }

    #[test]
    fn test_collection_url_format() {
        let id = CollectionId::new("abc123");
        assert_eq!(
            collection_url(&id),
            "https://docs.google.com/spreadsheets/d/abc123"
        );
    }
}

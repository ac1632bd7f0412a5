//! Grid Codec
//!
//! Translates between the remote grid representation and the relational view:
//! - inbound: header row + keyed row records ([`decode_table`])
//! - outbound: header and data rows as store cells ([`encode_header`], [`encode_row`])
//!
//! Row 0 of a table is always the header row. Data rows are keyed by their
//! 1-based grid position (`Row1`, `Row2`, ...).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::TableError;
use crate::grid::{CellValue, Collection, GridRow, Table};
use crate::ident::RowId;
use crate::ID_COLUMN;

// ============================================================================
// DECODED TYPES
// ============================================================================

/// A data row decoded against the header row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RowRecord {
    /// Wire key of the row (`Row{position}`).
    pub key: String,
    /// 1-based position of the row below the header.
    pub position: usize,
    /// Column name -> formatted value. Columns the row has no cell for are absent.
    pub values: BTreeMap<String, String>,
}

/// Header row plus decoded data rows of one table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedTable {
    pub headers: Vec<String>,
    pub rows: Vec<RowRecord>,
}

impl DecodedTable {
    /// True when the table has no grid data at all.
    pub fn is_unpopulated(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }
}

// ============================================================================
// DECODE
// ============================================================================

/// Select a table from a collection by name.
pub fn find_table<'a>(collection: &'a Collection, name: &str) -> Result<&'a Table, TableError> {
    collection
        .tables
        .iter()
        .find(|table| table.name == name)
        .ok_or_else(|| TableError::TableNotFound {
            collection: collection.title.clone(),
            table: name.to_string(),
        })
}

/// Header row of a table; empty when the table has no rows.
pub fn header_row(table: &Table) -> Vec<String> {
    table
        .rows
        .first()
        .map(|row| row.iter().map(|cell| cell.formatted().to_string()).collect())
        .unwrap_or_default()
}

/// Decode a grid into its header row and the first `max_rows` data rows.
///
/// An empty grid decodes to empty headers and empty rows. A row with fewer
/// cells than headers yields a partial record; cells past the last header are
/// dropped.
pub fn decode_table(rows: &[GridRow], max_rows: usize) -> DecodedTable {
    let Some((header, data)) = rows.split_first() else {
        return DecodedTable::default();
    };

    let headers: Vec<String> = header
        .iter()
        .map(|cell| cell.formatted().to_string())
        .collect();

    let records = data
        .iter()
        .take(max_rows)
        .enumerate()
        .map(|(offset, row)| {
            let position = offset + 1;
            let values = headers
                .iter()
                .zip(row.iter())
                .map(|(column, cell)| (column.clone(), cell.formatted().to_string()))
                .collect();
            RowRecord {
                key: format!("Row{}", position),
                position,
                values,
            }
        })
        .collect();

    DecodedTable {
        headers,
        rows: records,
    }
}

// ============================================================================
// ENCODE
// ============================================================================

/// Header cells for a new table: the `id` column followed by `names`.
pub fn encode_header(names: &[String]) -> Vec<CellValue> {
    std::iter::once(CellValue::Text(ID_COLUMN.to_string()))
        .chain(names.iter().cloned().map(CellValue::Text))
        .collect()
}

/// Data cells for a new row: the numeric identifier followed by `values`.
pub fn encode_row(id: RowId, values: &[String]) -> Vec<CellValue> {
    std::iter::once(CellValue::Number(id as f64))
        .chain(values.iter().cloned().map(CellValue::Text))
        .collect()
}

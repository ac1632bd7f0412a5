//! Row identifier arithmetic.
//!
//! Identifiers are positional: the next row's id is the number of data rows
//! already in the table plus one. Callers must hold the table's append lock
//! between reading the grid and appending, otherwise two writers can observe
//! the same count.

use crate::grid::GridRow;

/// Synthetic row identifier stored in the `id` column.
pub type RowId = u64;

/// Number of data rows in a grid (the header row is not counted).
pub fn data_row_count(rows: &[GridRow]) -> usize {
    rows.len().saturating_sub(1)
}

/// Identifier for the next appended row.
pub fn next_identifier(rows: &[GridRow]) -> RowId {
    data_row_count(rows) as RowId + 1
}

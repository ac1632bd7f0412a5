//! SHEETBASE Test Utilities
//!
//! Centralized test infrastructure for the SHEETBASE workspace:
//! - Proptest generators for titles, headers and grids
//! - Grid fixtures for common scenarios
//! - Re-export of the in-memory grid store

// Re-export mock store from its source crate
pub use sheetbase_storage::MockGridStore;

pub use sheetbase_core::{Cell, CellValue, Collection, CollectionId, GridRow, Table, TableId};

use proptest::prelude::*;
use std::collections::BTreeSet;

// ============================================================================
// FIXTURES
// ============================================================================

/// Build a grid from string literals, one inner slice per row.
pub fn grid_from(rows: &[&[&str]]) -> Vec<GridRow> {
    rows.iter()
        .map(|row| row.iter().map(|value| Cell::text(*value)).collect())
        .collect()
}

/// Owned strings from literals.
pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

/// A collection holding the given tables.
pub fn collection_fixture(id: &str, title: &str, tables: Vec<Table>) -> Collection {
    Collection {
        collection_id: CollectionId::new(id),
        title: title.to_string(),
        tables,
    }
}

/// The canonical contacts table: header plus `n` rows.
pub fn contacts_table(table_id: TableId, n: usize) -> Table {
    let mut rows = grid_from(&[&["id", "name", "email"]]);
    for i in 1..=n {
        rows.push(vec![
            Cell::text(i.to_string()),
            Cell::text(format!("person-{}", i)),
            Cell::text(format!("person-{}@example.com", i)),
        ]);
    }
    Table::new(table_id, "People").with_rows(rows)
}

// ============================================================================
// GENERATORS
// ============================================================================

/// Collection titles as a user would type them.
pub fn arb_title() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 _-]{0,23}".prop_map(|s| s.trim_end().to_string())
}

/// Opaque remote collection identifiers.
pub fn arb_collection_id() -> impl Strategy<Value = CollectionId> {
    "[A-Za-z0-9_-]{20,44}".prop_map(CollectionId::new)
}

/// Distinct column names, never colliding with the `id` column.
pub fn arb_column_names(max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set("[a-z][a-z0-9_]{0,11}", 1..=max.max(1)).prop_map(
        |names: BTreeSet<String>| names.into_iter().filter(|name| name != "id").collect(),
    )
}

/// A grid with a header row and ragged data rows.
///
/// Data rows may be shorter or up to one cell longer than the header.
pub fn arb_grid(max_cols: usize, max_rows: usize) -> impl Strategy<Value = Vec<GridRow>> {
    arb_column_names(max_cols).prop_flat_map(move |names| {
        let width = names.len() + 1;
        let row = prop::collection::vec("[A-Za-z0-9 ]{0,8}", 0..=width + 1)
            .prop_map(|cells| cells.into_iter().map(Cell::text).collect::<GridRow>());
        prop::collection::vec(row, 0..=max_rows).prop_map(move |data| {
            let mut header: GridRow = vec![Cell::text("id")];
            header.extend(names.iter().map(|name| Cell::text(name.clone())));
            let mut grid = vec![header];
            grid.extend(data);
            grid
        })
    })
}

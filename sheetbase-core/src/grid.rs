//! Grid model shared by the codec, the storage layer and the remote client.
//!
//! Inbound data (what the remote store returns) is a grid of [`Cell`]s that
//! carry only their formatted value. Outbound data (what gets appended) is a
//! row of [`CellValue`]s using the store's native number and string types.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// IDENTITY TYPES
// ============================================================================

/// Opaque identifier the remote store assigns to a collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionId(String);

impl CollectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for CollectionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for CollectionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Numeric identifier the remote store assigns to a table (`sheetId`).
pub type TableId = i64;

// ============================================================================
// INBOUND GRID
// ============================================================================

/// A single cell as read back from the remote store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Display string computed by the store. `None` for empty cells.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_value: Option<String>,
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            formatted_value: Some(value.into()),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Formatted value, with empty cells reading as `""`.
    pub fn formatted(&self) -> &str {
        self.formatted_value.as_deref().unwrap_or("")
    }
}

/// One row of the grid. May be shorter than the header row.
pub type GridRow = Vec<Cell>;

/// A named grid within a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub table_id: TableId,
    pub name: String,
    /// Row 0 is the header row when present.
    #[serde(default)]
    pub rows: Vec<GridRow>,
}

impl Table {
    pub fn new(table_id: TableId, name: impl Into<String>) -> Self {
        Self {
            table_id,
            name: name.into(),
            rows: Vec::new(),
        }
    }

    pub fn with_rows(mut self, rows: Vec<GridRow>) -> Self {
        self.rows = rows;
        self
    }

    pub fn table_ref(&self) -> TableRef {
        TableRef {
            table_id: self.table_id,
            name: self.name.clone(),
        }
    }
}

/// A titled container of tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub collection_id: CollectionId,
    pub title: String,
    #[serde(default)]
    pub tables: Vec<Table>,
}

/// Result of creating a collection remotely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionRef {
    pub collection_id: CollectionId,
    pub title: String,
}

/// Result of creating a table remotely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRef {
    pub table_id: TableId,
    pub name: String,
}

// ============================================================================
// OUTBOUND CELLS
// ============================================================================

/// A value written to the remote store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellValue {
    /// Native numeric cell. Used only for row identifiers.
    Number(f64),
    /// String cell. No type inference is applied.
    Text(String),
}

impl CellValue {
    /// The display string the store computes for this value.
    ///
    /// Whole numbers render without a fractional part (`1.0` -> `"1"`).
    pub fn formatted(&self) -> String {
        match self {
            CellValue::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                format!("{}", *n as i64)
            }
            CellValue::Number(n) => n.to_string(),
            CellValue::Text(s) => s.clone(),
        }
    }

    /// Convert to the inbound representation, as the store would echo it back.
    pub fn to_cell(&self) -> Cell {
        Cell::text(self.formatted())
    }
}

//! Request and Response Types for SHEETBASE API
//!
//! JSON bodies use snake_case field names.

use serde::{Deserialize, Serialize};
use sheetbase_core::{RowId, RowRecord, TableId};
use std::collections::BTreeMap;

// ============================================================================
// COLLECTIONS
// ============================================================================

/// Request to create a collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateCollectionRequest {
    /// Title the collection is registered under. Must be unique.
    pub title: String,
}

/// Collection created and registered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CollectionCreatedResponse {
    pub title: String,
    pub collection_id: String,
    /// Browser URL of the collection
    pub url: String,
}

/// One registry entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CollectionSummary {
    pub title: String,
    pub collection_id: String,
}

/// Every registered collection, ordered by title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ListCollectionsResponse {
    pub collections: Vec<CollectionSummary>,
}

/// Collection metadata: table names and their header rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CollectionResponse {
    pub title: String,
    pub collection_id: String,
    /// Table name -> header row. Tables with no rows map to an empty list.
    pub tables: BTreeMap<String, Vec<String>>,
}

// ============================================================================
// TABLES
// ============================================================================

/// Request to create a table with a header row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateTableRequest {
    pub name: String,
    /// Column names. The `id` column is added automatically.
    #[serde(default)]
    pub column_headers: Vec<String>,
}

/// Table created with its header row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TableCreatedResponse {
    pub collection_id: String,
    pub table_name: String,
    pub table_id: TableId,
    /// Browser URL of the table
    pub url: String,
    /// Full header row, starting with `id`
    pub column_headers: Vec<String>,
}

// ============================================================================
// ROWS
// ============================================================================

/// Query parameters for a row read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct RowsQuery {
    /// Number of data rows to return (1..=1000)
    pub limit: Option<usize>,
}

/// Header row plus the first N data rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TableRowsResponse {
    pub column_headers: Vec<String>,
    pub rows: Vec<RowRecord>,
}

/// Request to append one object as a row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AppendRowRequest {
    /// Values in column order, excluding `id`
    pub values: Vec<String>,
}

/// Row appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RowCreatedResponse {
    /// Identifier written into the `id` column
    pub row_id: RowId,
    /// Browser URL of the table
    pub url: String,
}

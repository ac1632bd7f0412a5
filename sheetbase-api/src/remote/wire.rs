//! Google Sheets v4 JSON shapes.
//!
//! Only the fields this service reads or writes are modelled; everything else
//! in the upstream payloads is ignored on deserialization.

use serde::{Deserialize, Serialize};
use sheetbase_core::{Cell, CellValue, Collection, CollectionId, GridRow, Table};

// ============================================================================
// SPREADSHEET RESOURCE
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spreadsheet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spreadsheet_id: Option<String>,
    #[serde(default)]
    pub properties: SpreadsheetProperties,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sheets: Vec<Sheet>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadsheetProperties {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sheet {
    #[serde(default)]
    pub properties: SheetProperties,
    #[serde(default)]
    pub data: Vec<GridData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    #[serde(default)]
    pub sheet_id: i64,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridData {
    #[serde(default)]
    pub row_data: Vec<RowData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowData {
    #[serde(default)]
    pub values: Vec<CellData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_value: Option<String>,
    /// Outbound only. Reads go by `formattedValue`, and the entered value of a
    /// stored cell may be a bool, formula or error this enum does not model.
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub user_entered_value: Option<ExtendedValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExtendedValue {
    NumberValue(f64),
    StringValue(String),
}

impl From<&CellValue> for CellData {
    fn from(value: &CellValue) -> Self {
        let entered = match value {
            CellValue::Number(n) => ExtendedValue::NumberValue(*n),
            CellValue::Text(s) => ExtendedValue::StringValue(s.clone()),
        };
        CellData {
            formatted_value: None,
            user_entered_value: Some(entered),
        }
    }
}

impl Spreadsheet {
    /// Convert to the grid model. Grid data blocks of a sheet are concatenated.
    pub fn into_collection(self, fallback_id: &CollectionId) -> Collection {
        let collection_id = self
            .spreadsheet_id
            .map(CollectionId::new)
            .unwrap_or_else(|| fallback_id.clone());
        let tables = self
            .sheets
            .into_iter()
            .map(|sheet| {
                let rows: Vec<GridRow> = sheet
                    .data
                    .into_iter()
                    .flat_map(|grid| grid.row_data)
                    .map(|row| {
                        row.values
                            .into_iter()
                            .map(|cell| Cell {
                                formatted_value: cell.formatted_value,
                            })
                            .collect()
                    })
                    .collect();
                Table::new(sheet.properties.sheet_id, sheet.properties.title).with_rows(rows)
            })
            .collect();

        Collection {
            collection_id,
            title: self.properties.title,
            tables,
        }
    }
}

// ============================================================================
// BATCH UPDATE
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchUpdateRequest {
    pub requests: Vec<UpdateRequest>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum UpdateRequest {
    AddSheet(AddSheetRequest),
    AppendCells(AppendCellsRequest),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSheetRequest {
    pub properties: NewSheetProperties,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSheetProperties {
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendCellsRequest {
    pub sheet_id: i64,
    pub rows: Vec<RowData>,
    pub fields: String,
}

impl AppendCellsRequest {
    /// A single-row append that writes every field of each cell.
    pub fn single_row(sheet_id: i64, values: &[CellValue]) -> Self {
        Self {
            sheet_id,
            rows: vec![RowData {
                values: values.iter().map(CellData::from).collect(),
            }],
            fields: "*".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchUpdateResponse {
    #[serde(default)]
    pub replies: Vec<Reply>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    #[serde(default)]
    pub add_sheet: Option<AddSheetReply>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSheetReply {
    pub properties: SheetProperties,
}

// ============================================================================
// ERROR ENVELOPE
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error: GoogleError,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleError {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}

//! Google Sheets REST client.
//!
//! Implements [`GridStore`] against the Sheets v4 API with a bearer token.
//! Every call runs under the client-wide timeout; upstream error envelopes are
//! mapped onto [`StoreError`] so callers never see raw HTTP failures.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use sheetbase_core::{
    CellValue, Collection, CollectionId, CollectionRef, StoreError, TableId, TableRef,
};
use sheetbase_storage::GridStore;

use super::wire::{
    AddSheetRequest, AppendCellsRequest, BatchUpdateRequest, BatchUpdateResponse, ErrorEnvelope,
    NewSheetProperties, Spreadsheet, SpreadsheetProperties, UpdateRequest,
};
use crate::config::AccessToken;

/// Failure kind used when the upstream error is not more specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    CreateCollection,
    GetCollection,
    CreateTable,
    AppendRow,
}

impl Operation {
    fn name(self) -> &'static str {
        match self {
            Operation::CreateCollection => "create_collection",
            Operation::GetCollection => "get_collection",
            Operation::CreateTable => "create_table",
            Operation::AppendRow => "append_row",
        }
    }

    fn failure(self, reason: String) -> StoreError {
        match self {
            Operation::CreateCollection | Operation::CreateTable => {
                StoreError::CreateFailed { reason }
            }
            Operation::AppendRow => StoreError::AppendFailed { reason },
            Operation::GetCollection => StoreError::InvalidResponse { reason },
        }
    }
}

/// Sheets v4 client.
#[derive(Clone)]
pub struct SheetsClient {
    client: reqwest::Client,
    base_url: String,
}

impl SheetsClient {
    pub fn new(
        base_url: &str,
        token: &AccessToken,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", token.expose())).map_err(|e| {
            StoreError::Unauthorized {
                reason: format!("access token is not a valid header value: {}", e),
            }
        })?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| StoreError::Transport {
                reason: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn spreadsheet_url(&self, collection_id: &CollectionId) -> String {
        format!("{}/spreadsheets/{}", self.base_url, collection_id)
    }

    async fn batch_update(
        &self,
        collection_id: &CollectionId,
        request: UpdateRequest,
        op: Operation,
    ) -> Result<BatchUpdateResponse, StoreError> {
        let url = format!("{}:batchUpdate", self.spreadsheet_url(collection_id));
        let body = BatchUpdateRequest {
            requests: vec![request],
        };
        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(e, op))?;
        parse_response(response, op, Some(collection_id)).await
    }

    async fn get_spreadsheet(
        &self,
        collection_id: &CollectionId,
        query: &[(&str, String)],
    ) -> Result<Collection, StoreError> {
        let op = Operation::GetCollection;
        let response = self
            .client
            .get(self.spreadsheet_url(collection_id))
            .query(query)
            .send()
            .await
            .map_err(|e| transport_error(e, op))?;
        let spreadsheet: Spreadsheet = parse_response(response, op, Some(collection_id)).await?;
        Ok(spreadsheet.into_collection(collection_id))
    }
}

#[async_trait]
impl GridStore for SheetsClient {
    async fn create_collection(&self, title: &str) -> Result<CollectionRef, StoreError> {
        let op = Operation::CreateCollection;
        let body = Spreadsheet {
            properties: SpreadsheetProperties {
                title: title.to_string(),
            },
            ..Default::default()
        };
        let response = self
            .client
            .post(format!("{}/spreadsheets", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(e, op))?;
        let created: Spreadsheet = parse_response(response, op, None).await?;

        let collection_id = created.spreadsheet_id.ok_or_else(|| StoreError::InvalidResponse {
            reason: "create response carried no spreadsheetId".to_string(),
        })?;
        Ok(CollectionRef {
            collection_id: CollectionId::new(collection_id),
            title: created.properties.title,
        })
    }

    async fn get_collection(
        &self,
        collection_id: &CollectionId,
        include_grid_data: bool,
    ) -> Result<Collection, StoreError> {
        self.get_spreadsheet(
            collection_id,
            &[("includeGridData", include_grid_data.to_string())],
        )
        .await
    }

    async fn get_header_rows(&self, collection_id: &CollectionId) -> Result<Collection, StoreError> {
        let metadata = self.get_collection(collection_id, false).await?;
        if metadata.tables.is_empty() {
            return Ok(metadata);
        }

        let mut query = vec![("includeGridData", "true".to_string())];
        query.extend(
            metadata
                .tables
                .iter()
                .map(|table| ("ranges", header_range(&table.name))),
        );
        self.get_spreadsheet(collection_id, &query).await
    }

    async fn create_table(
        &self,
        collection_id: &CollectionId,
        name: &str,
    ) -> Result<TableRef, StoreError> {
        let op = Operation::CreateTable;
        let request = UpdateRequest::AddSheet(AddSheetRequest {
            properties: NewSheetProperties {
                title: name.to_string(),
            },
        });
        let response = self.batch_update(collection_id, request, op).await?;

        let properties = response
            .replies
            .into_iter()
            .find_map(|reply| reply.add_sheet)
            .map(|reply| reply.properties)
            .ok_or_else(|| StoreError::InvalidResponse {
                reason: "addSheet reply missing from batchUpdate response".to_string(),
            })?;
        Ok(TableRef {
            table_id: properties.sheet_id,
            name: properties.title,
        })
    }

    async fn append_row(
        &self,
        collection_id: &CollectionId,
        table_id: TableId,
        values: &[CellValue],
    ) -> Result<(), StoreError> {
        let request = UpdateRequest::AppendCells(AppendCellsRequest::single_row(table_id, values));
        self.batch_update(collection_id, request, Operation::AppendRow)
            .await
            .map(|_| ())
    }

    fn backend(&self) -> &'static str {
        "sheets"
    }
}

// ============================================================================
// RESPONSE HANDLING
// ============================================================================

/// A1 range covering the first row of a sheet. Quotes in the name are doubled.
fn header_range(sheet_name: &str) -> String {
    format!("'{}'!1:1", sheet_name.replace('\'', "''"))
}

fn transport_error(err: reqwest::Error, op: Operation) -> StoreError {
    if err.is_timeout() {
        StoreError::Timeout {
            operation: op.name().to_string(),
        }
    } else {
        StoreError::Transport {
            reason: err.to_string(),
        }
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
    op: Operation,
    collection_id: Option<&CollectionId>,
) -> Result<T, StoreError> {
    let status = response.status();
    if status.is_success() {
        return response.json::<T>().await.map_err(|e| {
            if e.is_timeout() {
                transport_error(e, op)
            } else {
                StoreError::InvalidResponse {
                    reason: e.to_string(),
                }
            }
        });
    }

    let text = response.text().await.map_err(|e| transport_error(e, op))?;
    Err(map_upstream_error(status, &text, op, collection_id))
}

/// Map an upstream error status and body onto the store taxonomy.
///
/// A 404 only means a missing collection when the request addressed one.
fn map_upstream_error(
    status: StatusCode,
    body: &str,
    op: Operation,
    collection_id: Option<&CollectionId>,
) -> StoreError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| {
            if envelope.error.status.is_empty() {
                envelope.error.message
            } else {
                format!("{}: {}", envelope.error.status, envelope.error.message)
            }
        })
        .unwrap_or_else(|_| format!("HTTP {}: {}", status.as_u16(), body.trim()));

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            StoreError::Unauthorized { reason: message }
        }
        StatusCode::NOT_FOUND if op != Operation::AppendRow => match collection_id {
            Some(collection_id) => {
                tracing::debug!(
                    collection_id = %collection_id,
                    operation = op.name(),
                    upstream = %message,
                    "Remote collection not found"
                );
                StoreError::CollectionNotFound {
                    collection_id: collection_id.to_string(),
                }
            }
            None => op.failure(message),
        },
        StatusCode::BAD_REQUEST if message.contains("already exists") => {
            StoreError::Conflict { reason: message }
        }
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => StoreError::Timeout {
            operation: op.name().to_string(),
        },
        _ => op.failure(message),
    }
}

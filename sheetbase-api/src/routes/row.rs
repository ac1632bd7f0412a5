//! Row REST API Routes
//!
//! Reads decode the first N data rows against the header row. Appends assign
//! the next identifier under the table's append lock.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use sheetbase_core::table_url;
use sheetbase_storage::{AppendLocks, GridStore, TitleRegistry};

use crate::{
    config::ApiConfig,
    error::{ApiError, ApiResult},
    extractors::{ApiJson, ApiQuery},
    services,
    state::AppState,
    types::{AppendRowRequest, RowCreatedResponse, RowsQuery, TableRowsResponse},
};

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// GET /api/v1/collections/{title}/tables/{table}/rows - Read the first N rows
#[utoipa::path(
    get,
    path = "/api/v1/collections/{title}/tables/{table}/rows",
    tag = "Rows",
    params(
        ("title" = String, Path, description = "Registered collection title"),
        ("table" = String, Path, description = "Table name"),
        RowsQuery,
    ),
    responses(
        (status = 200, description = "Header row and data rows", body = TableRowsResponse),
        (status = 400, description = "Limit out of range", body = ApiError),
        (status = 404, description = "Collection or table not found", body = ApiError),
    ),
)]
pub async fn read_rows(
    State(registry): State<Arc<TitleRegistry>>,
    State(store): State<Arc<dyn GridStore>>,
    State(config): State<Arc<ApiConfig>>,
    Path((title, table)): Path<(String, String)>,
    ApiQuery(query): ApiQuery<RowsQuery>,
) -> ApiResult<Json<TableRowsResponse>> {
    let limit = services::resolve_limit(query.limit, config.default_row_limit)?;
    let collection_id = services::resolve_collection(&registry, &title).await?;
    let decoded = services::read_rows(store.as_ref(), &collection_id, &table, limit).await?;

    Ok(Json(TableRowsResponse {
        column_headers: decoded.headers,
        rows: decoded.rows,
    }))
}

/// POST /api/v1/collections/{title}/tables/{table}/rows - Append an object
#[utoipa::path(
    post,
    path = "/api/v1/collections/{title}/tables/{table}/rows",
    tag = "Rows",
    params(
        ("title" = String, Path, description = "Registered collection title"),
        ("table" = String, Path, description = "Table name"),
    ),
    request_body = AppendRowRequest,
    responses(
        (status = 201, description = "Row appended", body = RowCreatedResponse),
        (status = 400, description = "More values than data columns", body = ApiError),
        (status = 404, description = "Collection or table not found", body = ApiError),
        (status = 409, description = "Table has no header row", body = ApiError),
        (status = 502, description = "Remote append failed", body = ApiError),
    ),
)]
pub async fn append_row(
    State(registry): State<Arc<TitleRegistry>>,
    State(store): State<Arc<dyn GridStore>>,
    State(locks): State<Arc<AppendLocks>>,
    Path((title, table)): Path<(String, String)>,
    ApiJson(req): ApiJson<AppendRowRequest>,
) -> ApiResult<impl IntoResponse> {
    let collection_id = services::resolve_collection(&registry, &title).await?;
    let appended =
        services::append_object(store.as_ref(), &locks, &collection_id, &table, &req.values)
            .await?;

    let response = RowCreatedResponse {
        row_id: appended.row_id,
        url: table_url(&collection_id, appended.table_id),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

// ============================================================================
// ROUTER
// ============================================================================

pub fn create_router() -> Router<AppState> {
    Router::new().route("/:title/tables/:table/rows", get(read_rows).post(append_row))
}

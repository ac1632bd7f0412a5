//! Table REST API Routes

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use sheetbase_storage::{GridStore, TitleRegistry};

use crate::{
    error::{ApiError, ApiResult},
    extractors::ApiJson,
    services,
    state::AppState,
    types::{CreateTableRequest, TableCreatedResponse},
};

/// POST /api/v1/collections/{title}/tables - Create a table with a header row
#[utoipa::path(
    post,
    path = "/api/v1/collections/{title}/tables",
    tag = "Tables",
    params(
        ("title" = String, Path, description = "Registered collection title")
    ),
    request_body = CreateTableRequest,
    responses(
        (status = 201, description = "Table created", body = TableCreatedResponse),
        (status = 400, description = "Invalid name or column headers", body = ApiError),
        (status = 404, description = "Collection not found", body = ApiError),
        (status = 409, description = "Table name already used", body = ApiError),
        (status = 502, description = "Remote create or header append failed", body = ApiError),
    ),
)]
pub async fn create_table(
    State(registry): State<Arc<TitleRegistry>>,
    State(store): State<Arc<dyn GridStore>>,
    Path(title): Path<String>,
    ApiJson(req): ApiJson<CreateTableRequest>,
) -> ApiResult<impl IntoResponse> {
    let collection_id = services::resolve_collection(&registry, &title).await?;
    let created =
        services::create_table(store.as_ref(), &collection_id, &req.name, &req.column_headers)
            .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub fn create_router() -> Router<AppState> {
    Router::new().route("/:title/tables", post(create_table))
}

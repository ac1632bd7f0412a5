//! Collection REST API Routes

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use sheetbase_storage::{GridStore, TitleRegistry};

use crate::{
    error::{ApiError, ApiResult},
    extractors::ApiJson,
    services,
    state::AppState,
    types::{
        CollectionCreatedResponse, CollectionResponse, CreateCollectionRequest,
        ListCollectionsResponse,
    },
};

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// POST /api/v1/collections - Create and register a collection
#[utoipa::path(
    post,
    path = "/api/v1/collections",
    tag = "Collections",
    request_body = CreateCollectionRequest,
    responses(
        (status = 201, description = "Collection created", body = CollectionCreatedResponse),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 409, description = "Title already registered", body = ApiError),
        (status = 502, description = "Remote create failed", body = ApiError),
    ),
)]
pub async fn create_collection(
    State(registry): State<Arc<TitleRegistry>>,
    State(store): State<Arc<dyn GridStore>>,
    ApiJson(req): ApiJson<CreateCollectionRequest>,
) -> ApiResult<impl IntoResponse> {
    let created = services::create_collection(&registry, store.as_ref(), &req.title).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/v1/collections - List registered collections
#[utoipa::path(
    get,
    path = "/api/v1/collections",
    tag = "Collections",
    responses(
        (status = 200, description = "Registered collections", body = ListCollectionsResponse),
        (status = 500, description = "Registry unreadable", body = ApiError),
    ),
)]
pub async fn list_collections(
    State(registry): State<Arc<TitleRegistry>>,
) -> ApiResult<Json<ListCollectionsResponse>> {
    let collections = services::list_collections(&registry).await?;
    Ok(Json(ListCollectionsResponse { collections }))
}

/// GET /api/v1/collections/{title} - Describe a collection's tables
#[utoipa::path(
    get,
    path = "/api/v1/collections/{title}",
    tag = "Collections",
    params(
        ("title" = String, Path, description = "Registered collection title")
    ),
    responses(
        (status = 200, description = "Table names and header rows", body = CollectionResponse),
        (status = 404, description = "Collection not found", body = ApiError),
    ),
)]
pub async fn get_collection(
    State(registry): State<Arc<TitleRegistry>>,
    State(store): State<Arc<dyn GridStore>>,
    Path(title): Path<String>,
) -> ApiResult<Json<CollectionResponse>> {
    let described = services::describe_collection(&registry, store.as_ref(), &title).await?;
    Ok(Json(described))
}

// ============================================================================
// ROUTER
// ============================================================================

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_collections).post(create_collection))
        .route("/:title", get(get_collection))
}

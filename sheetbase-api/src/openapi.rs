//! OpenAPI Specification for SHEETBASE API
//!
//! Generated with utoipa from the request/response types and the route
//! annotations.

use utoipa::OpenApi;

use crate::error::{ApiError, ErrorCode};
use crate::routes::{collection, health, row, table};
use crate::telemetry::metrics;
use crate::types::*;

use sheetbase_core::RowRecord;

/// OpenAPI document for SHEETBASE API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "SHEETBASE API",
        version = "0.1.0",
        description = "Spreadsheets as a row-oriented data store: collections, tables and appended objects",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3333", description = "Local Development")
    ),
    tags(
        (name = "Collections", description = "Titled collections backed by remote spreadsheets"),
        (name = "Tables", description = "Tables with a header row"),
        (name = "Rows", description = "Row reads and object appends"),
        (name = "Health", description = "Liveness and readiness probes"),
        (name = "Observability", description = "Prometheus metrics")
    ),
    paths(
        // === Collection Routes ===
        collection::create_collection,
        collection::list_collections,
        collection::get_collection,

        // === Table Routes ===
        table::create_table,

        // === Row Routes ===
        row::read_rows,
        row::append_row,

        // === Health & Metrics ===
        health::ping,
        health::liveness,
        health::readiness,
        metrics::metrics_handler,
    ),
    components(
        schemas(
            // === Error Types ===
            ApiError, ErrorCode,

            // === Collections ===
            CreateCollectionRequest,
            CollectionCreatedResponse,
            CollectionSummary,
            ListCollectionsResponse,
            CollectionResponse,

            // === Tables ===
            CreateTableRequest,
            TableCreatedResponse,

            // === Rows ===
            AppendRowRequest,
            RowCreatedResponse,
            TableRowsResponse,
            RowRecord,

            // === Health ===
            health::HealthResponse,
            health::HealthStatus,
            health::HealthDetails,
            health::ComponentHealth,
        )
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_json_serialization() -> Result<(), String> {
        let json = ApiDoc::openapi()
            .to_json()
            .map_err(|e| format!("Failed to serialize OpenAPI: {}", e))?;

        serde_json::from_str::<serde_json::Value>(&json)
            .map_err(|e| format!("Generated JSON invalid: {}", e))?;
        assert!(json.contains("SHEETBASE API"));
        Ok(())
    }

    #[test]
    fn test_openapi_paths_exist() {
        let openapi = ApiDoc::openapi();
        let paths = &openapi.paths.paths;

        assert!(paths.contains_key("/api/v1/collections"));
        assert!(paths.contains_key("/api/v1/collections/{title}"));
        assert!(paths.contains_key("/api/v1/collections/{title}/tables"));
        assert!(paths.contains_key("/api/v1/collections/{title}/tables/{table}/rows"));
        assert!(paths.contains_key("/health/ready"));
        assert!(paths.contains_key("/metrics"));
    }

    #[test]
    fn test_error_schema_registered() -> Result<(), String> {
        let openapi = ApiDoc::openapi();
        let components = openapi
            .components
            .as_ref()
            .ok_or_else(|| "OpenAPI components missing".to_string())?;
        assert!(components.schemas.contains_key("ApiError"));
        assert!(components.schemas.contains_key("RowRecord"));
        Ok(())
    }
}

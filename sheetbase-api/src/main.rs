//! SHEETBASE API Server Entry Point
//!
//! Loads configuration from the environment, selects the grid store backend
//! and starts the Axum HTTP server.

use std::sync::Arc;

use axum::Router;
use sheetbase_api::telemetry::{init_tracer, TelemetryConfig};
use sheetbase_api::{
    create_api_router, ApiConfig, ApiError, ApiResult, AppState, Backend, SheetsClient,
};
use sheetbase_storage::{GridStore, MockGridStore, TitleRegistry};

#[tokio::main]
async fn main() -> ApiResult<()> {
    let config = ApiConfig::from_env()
        .map_err(|e| ApiError::internal_error(format!("Invalid configuration: {}", e)))?;

    init_tracer(&TelemetryConfig::from_api_config(&config))?;

    let store = build_store(&config)?;
    let registry = TitleRegistry::new(config.registry_path.clone());
    tracing::info!(
        backend = store.backend(),
        registry = %registry.path().display(),
        "Grid store ready"
    );

    let addr = config
        .bind_addr()
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    let state = AppState::new(config, registry, store);
    let app: Router = create_api_router(state);

    tracing::info!(%addr, "Starting SHEETBASE API server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => {
            result.map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}

fn build_store(config: &ApiConfig) -> ApiResult<Arc<dyn GridStore>> {
    match config.backend {
        Backend::Sheets => {
            let token = config.access_token.as_ref().ok_or_else(|| {
                ApiError::internal_error("SHEETBASE_ACCESS_TOKEN is required for the sheets backend")
            })?;
            let client =
                SheetsClient::new(&config.sheets_base_url, token, config.request_timeout)?;
            Ok(Arc::new(client))
        }
        Backend::Memory => {
            tracing::warn!("Using the in-memory grid store; data is lost on restart");
            Ok(Arc::new(MockGridStore::new()))
        }
    }
}

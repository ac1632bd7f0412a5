//! Router harness over the in-memory grid store and a temporary registry.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use sheetbase_api::{create_api_router, ApiConfig, AppState, Backend};
use sheetbase_storage::{MockGridStore, TitleRegistry};
use tempfile::TempDir;
use tower::ServiceExt;

pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Application under test. Holds the temp dir so the registry outlives the test.
pub struct TestApp {
    pub router: Router,
    pub store: MockGridStore,
    pub registry_dir: TempDir,
}

impl TestApp {
    pub fn new() -> TestResult<Self> {
        let registry_dir = tempfile::tempdir()?;
        let config = ApiConfig {
            backend: Backend::Memory,
            registry_path: registry_dir.path().join("spreadsheetIDs.json"),
            ..ApiConfig::default()
        };
        let registry = TitleRegistry::new(config.registry_path.clone());
        let store = MockGridStore::new();
        let state = AppState::new(config, registry, Arc::new(store.clone()));

        Ok(Self {
            router: create_api_router(state),
            store,
            registry_dir,
        })
    }

    /// Send a request and return the status plus the JSON body (`Null` when empty).
    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> TestResult<(StatusCode, Value)> {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(serde_json::to_vec(&json)?)
            }
            None => Body::empty(),
        };
        let response = self.router.clone().oneshot(builder.body(body)?).await?;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        Ok((status, json))
    }

    pub async fn get(&self, uri: &str) -> TestResult<(StatusCode, Value)> {
        self.send("GET", uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResult<(StatusCode, Value)> {
        self.send("POST", uri, Some(body)).await
    }

    /// POST and decode a typed success body, failing on an unexpected status.
    pub async fn post_as<T: DeserializeOwned>(&self, uri: &str, body: Value, expected: StatusCode) -> TestResult<T> {
        let (status, json) = self.post(uri, body).await?;
        if status != expected {
            return Err(format!("POST {} returned {}: {}", uri, status, json).into());
        }
        Ok(serde_json::from_value(json)?)
    }
}

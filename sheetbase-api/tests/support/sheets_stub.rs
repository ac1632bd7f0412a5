//! Local stand-in for the Sheets v4 REST API.
//!
//! Serves fixed spreadsheets by id and records every `batchUpdate` body, so
//! the real `SheetsClient` can be driven over HTTP without credentials.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::sync::oneshot;

#[derive(Clone)]
struct StubState {
    spreadsheets: Arc<HashMap<String, Value>>,
    batch_updates: Arc<Mutex<Vec<(String, Value)>>>,
}

/// Handle for a running stub. Dropping it stops the server.
pub struct SheetsStubHandle {
    base_url: String,
    shutdown: Option<oneshot::Sender<()>>,
    batch_updates: Arc<Mutex<Vec<(String, Value)>>>,
}

impl SheetsStubHandle {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Recorded `(spreadsheet id, request body)` pairs, oldest first.
    pub fn batch_updates(&self) -> Vec<(String, Value)> {
        self.batch_updates
            .lock()
            .map_or_else(|_| Vec::new(), |entries| entries.clone())
    }
}

impl Drop for SheetsStubHandle {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

/// Spawn the stub on an ephemeral port inside the current runtime.
pub async fn spawn_sheets_stub(spreadsheets: Vec<(&str, Value)>) -> Result<SheetsStubHandle, String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .map_err(|err| format!("sheets stub bind failed: {err}"))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("sheets stub local addr failed: {err}"))?;

    let batch_updates = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        spreadsheets: Arc::new(
            spreadsheets
                .into_iter()
                .map(|(id, body)| (id.to_string(), body))
                .collect(),
        ),
        batch_updates: Arc::clone(&batch_updates),
    };
    // `{id}:batchUpdate` is a single path segment, so one route serves both verbs.
    let app = Router::new()
        .route("/spreadsheets/:id", get(get_spreadsheet).post(batch_update))
        .with_state(state);

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await;
    });

    Ok(SheetsStubHandle {
        base_url: format!("http://{addr}"),
        shutdown: Some(shutdown_tx),
        batch_updates,
    })
}

fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": {
                "code": 404,
                "message": "Requested entity was not found.",
                "status": "NOT_FOUND"
            }
        })),
    )
}

async fn get_spreadsheet(State(state): State<StubState>, Path(id): Path<String>) -> impl IntoResponse {
    match state.spreadsheets.get(&id) {
        Some(body) => (StatusCode::OK, Json(body.clone())),
        None => not_found(),
    }
}

async fn batch_update(
    State(state): State<StubState>,
    Path(segment): Path<String>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let Some(id) = segment.strip_suffix(":batchUpdate") else {
        return not_found();
    };
    if !state.spreadsheets.contains_key(id) {
        return not_found();
    }
    if let Ok(mut entries) = state.batch_updates.lock() {
        entries.push((id.to_string(), body));
    }
    (
        StatusCode::OK,
        Json(json!({ "spreadsheetId": id, "replies": [{}] })),
    )
}

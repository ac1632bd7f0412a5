//! Shared application state for Axum routers.

use std::sync::Arc;
use std::time::Instant;

use sheetbase_storage::{AppendLocks, GridStore, TitleRegistry};

use crate::config::ApiConfig;
use crate::remote::InstrumentedStore;

/// Application-wide state shared across all routes.
///
/// Remote and durable dependencies are injected here; nothing is global.
#[derive(Clone)]
pub struct AppState {
    /// Title -> collection id registry.
    pub registry: Arc<TitleRegistry>,
    /// Remote grid store, wrapped with tracing and metrics.
    pub store: Arc<dyn GridStore>,
    /// Per-table locks serialising identifier assignment.
    pub append_locks: Arc<AppendLocks>,
    pub config: Arc<ApiConfig>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: ApiConfig, registry: TitleRegistry, store: Arc<dyn GridStore>) -> Self {
        Self {
            registry: Arc::new(registry),
            store: Arc::new(InstrumentedStore::new(store)),
            append_locks: Arc::new(AppendLocks::new()),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }
}

crate::impl_from_ref!(Arc<TitleRegistry>, registry);
crate::impl_from_ref!(Arc<dyn GridStore>, store);
crate::impl_from_ref!(Arc<AppendLocks>, append_locks);
crate::impl_from_ref!(Arc<ApiConfig>, config);
crate::impl_from_ref!(Instant, start_time);

//! Instrumented Grid Store
//!
//! Wraps any [`GridStore`] so every remote call is logged and recorded in the
//! Prometheus remote-operation metrics. Handlers and services use it unchanged.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use sheetbase_core::{
    CellValue, Collection, CollectionId, CollectionRef, StoreError, TableId, TableRef,
};
use sheetbase_storage::GridStore;

use crate::telemetry::METRICS;

/// [`GridStore`] decorator adding tracing and metrics.
#[derive(Clone)]
pub struct InstrumentedStore {
    inner: Arc<dyn GridStore>,
}

impl InstrumentedStore {
    pub fn new(inner: Arc<dyn GridStore>) -> Self {
        Self { inner }
    }

    async fn observe<T, F>(
        &self,
        operation: &'static str,
        collection: Option<&str>,
        call: F,
    ) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>> + Send,
    {
        let backend = self.inner.backend();
        tracing::debug!(operation, backend, collection, "Remote call");

        let start = Instant::now();
        let result = call.await;
        let duration = start.elapsed();

        if let Ok(metrics) = METRICS.as_ref() {
            metrics.record_remote_operation(operation, backend, result.is_ok(), duration.as_secs_f64());
        }
        if let Err(err) = &result {
            tracing::warn!(
                operation,
                backend,
                collection,
                duration_ms = duration.as_millis() as u64,
                error = %err,
                "Remote call failed"
            );
        }
        result
    }
}

#[async_trait]
impl GridStore for InstrumentedStore {
    async fn create_collection(&self, title: &str) -> Result<CollectionRef, StoreError> {
        self.observe("create_collection", None, self.inner.create_collection(title))
            .await
    }

    async fn get_collection(
        &self,
        collection_id: &CollectionId,
        include_grid_data: bool,
    ) -> Result<Collection, StoreError> {
        self.observe(
            "get_collection",
            Some(collection_id.as_str()),
            self.inner.get_collection(collection_id, include_grid_data),
        )
        .await
    }

    async fn get_header_rows(&self, collection_id: &CollectionId) -> Result<Collection, StoreError> {
        self.observe(
            "get_header_rows",
            Some(collection_id.as_str()),
            self.inner.get_header_rows(collection_id),
        )
        .await
    }

    async fn create_table(
        &self,
        collection_id: &CollectionId,
        name: &str,
    ) -> Result<TableRef, StoreError> {
        self.observe(
            "create_table",
            Some(collection_id.as_str()),
            self.inner.create_table(collection_id, name),
        )
        .await
    }

    async fn append_row(
        &self,
        collection_id: &CollectionId,
        table_id: TableId,
        values: &[CellValue],
    ) -> Result<(), StoreError> {
        self.observe(
            "append_row",
            Some(collection_id.as_str()),
            self.inner.append_row(collection_id, table_id, values),
        )
        .await
    }

    fn backend(&self) -> &'static str {
        self.inner.backend()
    }
}

//! Collection Service
//!
//! Creating, listing and resolving collections. The title registry is the
//! single source of truth for which titles exist.

use sheetbase_core::{collection_url, CollectionId, RegistryError, SheetbaseResult};
use sheetbase_storage::{GridStore, TitleRegistry};

use super::table_service;
use super::validation::require_name;
use crate::types::{CollectionCreatedResponse, CollectionResponse, CollectionSummary};

/// Create a remote collection and register it under `title`.
///
/// The registry writer lock is held from the availability check until the
/// new entry is persisted, so two requests for the same title cannot both
/// create a remote collection. Nothing is written to the registry unless the
/// remote create succeeds.
pub async fn create_collection(
    registry: &TitleRegistry,
    store: &dyn GridStore,
    title: &str,
) -> SheetbaseResult<CollectionCreatedResponse> {
    require_name("title", title)?;

    let mut txn = registry.begin_write().await?;
    if txn.contains(title) {
        return Err(RegistryError::Conflict {
            title: title.to_string(),
        }
        .into());
    }

    let created = store.create_collection(title).await?;
    txn.insert(title, created.collection_id.clone())?;

    if let Err(err) = txn.commit().await {
        tracing::error!(
            title,
            collection_id = %created.collection_id,
            error = %err,
            "Remote collection created but registry persist failed; collection is orphaned"
        );
        return Err(err.into());
    }

    tracing::info!(title, collection_id = %created.collection_id, "Collection registered");
    Ok(CollectionCreatedResponse {
        title: title.to_string(),
        url: collection_url(&created.collection_id),
        collection_id: created.collection_id.into_inner(),
    })
}

/// Every registered collection, ordered by title.
pub async fn list_collections(registry: &TitleRegistry) -> SheetbaseResult<Vec<CollectionSummary>> {
    let entries = registry.entries().await?;
    Ok(entries
        .into_iter()
        .map(|(title, collection_id)| CollectionSummary {
            title,
            collection_id: collection_id.into_inner(),
        })
        .collect())
}

/// Resolve a title through the registry.
pub async fn resolve_collection(
    registry: &TitleRegistry,
    title: &str,
) -> SheetbaseResult<CollectionId> {
    Ok(registry.resolve(title).await?)
}

/// Title, id and the header row of every table.
pub async fn describe_collection(
    registry: &TitleRegistry,
    store: &dyn GridStore,
    title: &str,
) -> SheetbaseResult<CollectionResponse> {
    let collection_id = resolve_collection(registry, title).await?;
    let tables = table_service::list_tables(store, &collection_id).await?;
    Ok(CollectionResponse {
        title: title.to_string(),
        collection_id: collection_id.into_inner(),
        tables,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetbase_core::{SheetbaseError, StoreError};
    use sheetbase_storage::MockGridStore;

    fn registry() -> std::io::Result<(tempfile::TempDir, TitleRegistry)> {
        let dir = tempfile::tempdir()?;
        let registry = TitleRegistry::new(dir.path().join("spreadsheetIDs.json"));
        Ok((dir, registry))
    }

    #[tokio::test]
    async fn test_create_registers_title() -> Result<(), Box<dyn std::error::Error>> {
        let (_dir, registry) = registry()?;
        let store = MockGridStore::new();

        let created = create_collection(&registry, &store, "Contacts").await?;
        assert!(created.url.ends_with(&created.collection_id));
        assert_eq!(
            registry.resolve("Contacts").await?,
            CollectionId::new(created.collection_id)
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_title_skips_remote_create() -> Result<(), Box<dyn std::error::Error>> {
        let (_dir, registry) = registry()?;
        let store = MockGridStore::new();

        create_collection(&registry, &store, "Contacts").await?;
        let err = create_collection(&registry, &store, "Contacts").await;
        assert!(matches!(
            err,
            Err(SheetbaseError::Registry(RegistryError::Conflict { .. }))
        ));
        assert_eq!(store.collection_count(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_remote_failure_leaves_registry_untouched() -> Result<(), Box<dyn std::error::Error>> {
        let (_dir, registry) = registry()?;
        let store = MockGridStore::new();
        store.fail_next_create(StoreError::CreateFailed {
            reason: "quota".into(),
        });

        let err = create_collection(&registry, &store, "Contacts").await;
        assert!(matches!(
            err,
            Err(SheetbaseError::Store(StoreError::CreateFailed { .. }))
        ));
        assert!(registry.entries().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_title_rejected() -> Result<(), Box<dyn std::error::Error>> {
        let (_dir, registry) = registry()?;
        let store = MockGridStore::new();
        let err = create_collection(&registry, &store, " ").await;
        assert!(matches!(err, Err(SheetbaseError::Validation(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_describe_lists_default_table() -> Result<(), Box<dyn std::error::Error>> {
        let (_dir, registry) = registry()?;
        let store = MockGridStore::new();
        create_collection(&registry, &store, "Contacts").await?;

        let described = describe_collection(&registry, &store, "Contacts").await?;
        assert_eq!(described.tables.get("Sheet1"), Some(&Vec::new()));

        let listed = list_collections(&registry).await?;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "Contacts");
        Ok(())
    }
}

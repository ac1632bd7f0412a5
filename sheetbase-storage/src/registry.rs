//! Title Registry
//!
//! Durable mapping from a user-chosen collection title to the identifier the
//! remote store assigned when the collection was created. The mapping is a
//! single JSON object on disk:
//!
//! ```json
//! { "Contacts": "1Yx...", "Inventory": "1Qa..." }
//! ```
//!
//! Every read reloads the file. Writes are read-modify-write cycles run under
//! a process-wide lock and land through a temp file + rename, so readers never
//! observe a partially written mapping.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use sheetbase_core::{CollectionId, RegistryError};
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, MutexGuard};

/// File permission bits applied to the registry file on Unix.
pub const REGISTRY_FILE_MODE: u32 = 0o644;

type Entries = BTreeMap<String, CollectionId>;

/// File-backed title -> collection id registry.
#[derive(Debug)]
pub struct TitleRegistry {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl TitleRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up the collection id registered under `title`.
    pub async fn resolve(&self, title: &str) -> Result<CollectionId, RegistryError> {
        let entries = self.load().await?;
        entries
            .get(title)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound {
                title: title.to_string(),
            })
    }

    /// Register `title` -> `collection_id`. Fails with `Conflict` if the title
    /// is already taken; the existing entry is left untouched.
    pub async fn register(
        &self,
        title: &str,
        collection_id: CollectionId,
    ) -> Result<(), RegistryError> {
        let mut txn = self.begin_write().await?;
        txn.insert(title, collection_id)?;
        txn.commit().await
    }

    /// Snapshot of every registered entry.
    pub async fn entries(&self) -> Result<BTreeMap<String, CollectionId>, RegistryError> {
        self.load().await
    }

    /// Acquire the writer lock and load the current mapping.
    ///
    /// The lock is held until the returned transaction is committed or dropped.
    pub async fn begin_write(&self) -> Result<RegistryTxn<'_>, RegistryError> {
        let guard = self.write_lock.lock().await;
        let entries = self.load().await?;
        Ok(RegistryTxn {
            registry: self,
            _guard: guard,
            entries,
            dirty: false,
        })
    }

    async fn load(&self) -> Result<Entries, RegistryError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "Registry file absent, treating as empty");
                return Ok(Entries::new());
            }
            Err(err) => return Err(self.io_error(err)),
        };

        if contents.trim().is_empty() {
            return Ok(Entries::new());
        }

        serde_json::from_str::<Entries>(&contents).map_err(|err| RegistryError::Corrupt {
            path: self.path.display().to_string(),
            reason: err.to_string(),
        })
    }

    async fn save(&self, entries: &Entries) -> Result<(), RegistryError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|err| self.io_error(err))?;
            }
        }

        let contents = serde_json::to_string_pretty(entries).map_err(|err| RegistryError::Io {
            path: self.path.display().to_string(),
            reason: err.to_string(),
        })?;

        let temp_path = self.path.with_extension("tmp");
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&temp_path)
            .await
            .map_err(|err| self.io_error(err))?;
        file.write_all(contents.as_bytes())
            .await
            .map_err(|err| self.io_error(err))?;
        file.sync_all().await.map_err(|err| self.io_error(err))?;
        drop(file);

        set_file_mode(&temp_path)
            .await
            .map_err(|err| self.io_error(err))?;
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|err| self.io_error(err))?;

        tracing::debug!(path = %self.path.display(), entries = entries.len(), "Registry persisted");
        Ok(())
    }

    fn io_error(&self, err: std::io::Error) -> RegistryError {
        RegistryError::Io {
            path: self.path.display().to_string(),
            reason: err.to_string(),
        }
    }
}

#[cfg(unix)]
async fn set_file_mode(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(REGISTRY_FILE_MODE)).await
}

#[cfg(not(unix))]
async fn set_file_mode(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

// ============================================================================
// WRITE TRANSACTION
// ============================================================================

/// Exclusive read-modify-write scope over the registry file.
pub struct RegistryTxn<'a> {
    registry: &'a TitleRegistry,
    _guard: MutexGuard<'a, ()>,
    entries: Entries,
    dirty: bool,
}

impl RegistryTxn<'_> {
    pub fn contains(&self, title: &str) -> bool {
        self.entries.contains_key(title)
    }

    /// Stage a new entry. Nothing is written until [`RegistryTxn::commit`].
    pub fn insert(&mut self, title: &str, collection_id: CollectionId) -> Result<(), RegistryError> {
        if self.entries.contains_key(title) {
            return Err(RegistryError::Conflict {
                title: title.to_string(),
            });
        }
        self.entries.insert(title.to_string(), collection_id);
        self.dirty = true;
        Ok(())
    }

    /// Persist staged entries and release the writer lock.
    pub async fn commit(self) -> Result<(), RegistryError> {
        if self.dirty {
            self.registry.save(&self.entries).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_registry() -> std::io::Result<(tempfile::TempDir, TitleRegistry)> {
        let dir = tempfile::tempdir()?;
        let registry = TitleRegistry::new(dir.path().join("data").join("spreadsheetIDs.json"));
        Ok((dir, registry))
    }

    #[tokio::test]
    async fn test_resolve_unknown_title_is_not_found() -> Result<(), Box<dyn std::error::Error>> {
        let (_dir, registry) = temp_registry()?;
        let err = registry.resolve("Contacts").await;
        assert_eq!(
            err,
            Err(RegistryError::NotFound {
                title: "Contacts".to_string()
            })
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_register_then_resolve() -> Result<(), Box<dyn std::error::Error>> {
        let (_dir, registry) = temp_registry()?;
        registry.register("Contacts", CollectionId::new("abc")).await?;
        assert_eq!(registry.resolve("Contacts").await?, CollectionId::new("abc"));
        Ok(())
    }

    #[tokio::test]
    async fn test_register_duplicate_keeps_existing() -> Result<(), Box<dyn std::error::Error>> {
        let (_dir, registry) = temp_registry()?;
        registry.register("Contacts", CollectionId::new("first")).await?;
        let err = registry.register("Contacts", CollectionId::new("second")).await;
        assert_eq!(
            err,
            Err(RegistryError::Conflict {
                title: "Contacts".to_string()
            })
        );
        assert_eq!(registry.resolve("Contacts").await?, CollectionId::new("first"));
        Ok(())
    }

    #[tokio::test]
    async fn test_file_format_is_flat_json_object() -> Result<(), Box<dyn std::error::Error>> {
        let (_dir, registry) = temp_registry()?;
        registry.register("Contacts", CollectionId::new("abc")).await?;
        let raw = std::fs::read_to_string(registry.path())?;
        let parsed: BTreeMap<String, String> = serde_json::from_str(&raw)?;
        assert_eq!(parsed.get("Contacts").map(String::as_str), Some("abc"));
        Ok(())
    }

    #[tokio::test]
    async fn test_reads_existing_file() -> Result<(), Box<dyn std::error::Error>> {
        let (dir, _) = temp_registry()?;
        let path = dir.path().join("ids.json");
        std::fs::write(&path, r#"{"Legacy":"1Legacy"}"#)?;
        let registry = TitleRegistry::new(&path);
        assert_eq!(registry.resolve("Legacy").await?, CollectionId::new("1Legacy"));
        Ok(())
    }

    #[tokio::test]
    async fn test_corrupt_file_is_reported() -> Result<(), Box<dyn std::error::Error>> {
        let (dir, _) = temp_registry()?;
        let path = dir.path().join("ids.json");
        std::fs::write(&path, "not json")?;
        let registry = TitleRegistry::new(&path);
        assert!(matches!(
            registry.resolve("x").await,
            Err(RegistryError::Corrupt { .. })
        ));
        // A failed load must not clobber the file.
        assert!(registry.register("x", CollectionId::new("y")).await.is_err());
        assert_eq!(std::fs::read_to_string(&path)?, "not json");
        Ok(())
    }

    #[tokio::test]
    async fn test_dropped_txn_writes_nothing() -> Result<(), Box<dyn std::error::Error>> {
        let (_dir, registry) = temp_registry()?;
        {
            let mut txn = registry.begin_write().await?;
            txn.insert("Ghost", CollectionId::new("g"))?;
        }
        assert!(registry.entries().await?.is_empty());
        Ok(())
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_file_mode_applied() -> Result<(), Box<dyn std::error::Error>> {
        use std::os::unix::fs::PermissionsExt;
        let (_dir, registry) = temp_registry()?;
        registry.register("Contacts", CollectionId::new("abc")).await?;
        let mode = std::fs::metadata(registry.path())?.permissions().mode() & 0o777;
        assert_eq!(mode, REGISTRY_FILE_MODE);
        Ok(())
    }
}

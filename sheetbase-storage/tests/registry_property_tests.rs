//! Property-Based Tests for the Title Registry and Append Locks
//!
//! **Property: Registry Fidelity**
//!
//! For any set of distinct titles registered against any collection ids,
//! resolving a title SHALL return exactly the id it was registered with, and a
//! second registration of the same title SHALL fail without changing the
//! stored mapping.
//!
//! **Property: Unique Row Identifiers**
//!
//! For any number of concurrent appends to one table, each append performed
//! under the table's append lock SHALL observe a distinct row count.

use std::collections::BTreeMap;
use std::sync::Arc;

use proptest::prelude::*;
use sheetbase_core::{encode_header, encode_row, next_identifier, CollectionId, RegistryError};
use sheetbase_storage::{AppendLocks, GridStore, MockGridStore, TitleRegistry};
use sheetbase_test_utils::{arb_collection_id, arb_title, strings};

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .enable_all()
        .build()
        .expect("tokio runtime")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_resolve_returns_registered_id(
        entries in prop::collection::btree_map(arb_title(), arb_collection_id(), 1..8)
    ) {
        let dir = tempfile::tempdir().expect("tempdir");
        let registry = TitleRegistry::new(dir.path().join("spreadsheetIDs.json"));
        let rt = runtime();

        let resolved: BTreeMap<String, CollectionId> = rt.block_on(async {
            for (title, id) in &entries {
                registry.register(title, id.clone()).await.expect("register");
            }
            let mut out = BTreeMap::new();
            for title in entries.keys() {
                out.insert(title.clone(), registry.resolve(title).await.expect("resolve"));
            }
            out
        });

        prop_assert_eq!(resolved, entries);
    }

    #[test]
    fn prop_conflict_leaves_mapping_unchanged(
        title in arb_title(),
        first in arb_collection_id(),
        second in arb_collection_id(),
    ) {
        let dir = tempfile::tempdir().expect("tempdir");
        let registry = TitleRegistry::new(dir.path().join("spreadsheetIDs.json"));
        let rt = runtime();

        let (conflict, stored) = rt.block_on(async {
            registry.register(&title, first.clone()).await.expect("first register");
            let conflict = registry.register(&title, second).await;
            (conflict, registry.resolve(&title).await)
        });

        prop_assert_eq!(conflict, Err(RegistryError::Conflict { title: title.clone() }));
        prop_assert_eq!(stored, Ok(first));
    }
}

#[test]
fn concurrent_registrations_all_survive() {
    let dir = tempfile::tempdir().expect("tempdir");
    let registry = Arc::new(TitleRegistry::new(dir.path().join("spreadsheetIDs.json")));
    let rt = runtime();

    rt.block_on(async {
        let mut handles = Vec::new();
        for i in 0..16 {
            let registry = Arc::clone(&registry);
            handles.push(tokio::spawn(async move {
                registry
                    .register(&format!("title-{}", i), CollectionId::new(format!("id-{}", i)))
                    .await
            }));
        }
        for handle in handles {
            handle.await.expect("join").expect("register");
        }

        let entries = registry.entries().await.expect("entries");
        assert_eq!(entries.len(), 16);
        for i in 0..16 {
            assert_eq!(
                entries.get(&format!("title-{}", i)),
                Some(&CollectionId::new(format!("id-{}", i)))
            );
        }
    });
}

#[test]
fn concurrent_same_title_registers_once() {
    let dir = tempfile::tempdir().expect("tempdir");
    let registry = Arc::new(TitleRegistry::new(dir.path().join("spreadsheetIDs.json")));
    let rt = runtime();

    rt.block_on(async {
        let mut handles = Vec::new();
        for i in 0..8 {
            let registry = Arc::clone(&registry);
            handles.push(tokio::spawn(async move {
                registry
                    .register("Contacts", CollectionId::new(format!("id-{}", i)))
                    .await
            }));
        }
        let mut ok = 0;
        for handle in handles {
            if handle.await.expect("join").is_ok() {
                ok += 1;
            }
        }
        assert_eq!(ok, 1);
    });
}

#[test]
fn corrupt_registry_surfaces_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("spreadsheetIDs.json");
    std::fs::write(&path, "{ \"Contacts\": ").expect("write");
    let registry = TitleRegistry::new(&path);
    let rt = runtime();

    let result = rt.block_on(registry.resolve("Contacts"));
    assert!(matches!(result, Err(RegistryError::Corrupt { .. })));
}

#[test]
fn locked_appends_assign_distinct_identifiers() {
    let store = Arc::new(MockGridStore::new());
    let locks = Arc::new(AppendLocks::new());
    let rt = runtime();

    let rows = rt.block_on(async {
        let created = store.create_collection("Contacts").await.expect("create");
        let id = created.collection_id;
        let table = store.create_table(&id, "People").await.expect("table");
        store
            .append_row(&id, table.table_id, &encode_header(&strings(&["name"])))
            .await
            .expect("header");

        let mut handles = Vec::new();
        for i in 0..20 {
            let store = Arc::clone(&store);
            let locks = Arc::clone(&locks);
            let id = id.clone();
            handles.push(tokio::spawn(async move {
                let _guard = locks.acquire(&id, "People").await;
                let grid = store.get_collection(&id, true).await.expect("read");
                let people = grid
                    .tables
                    .iter()
                    .find(|t| t.name == "People")
                    .expect("table present");
                let row_id = next_identifier(&people.rows);
                store
                    .append_row(&id, table.table_id, &encode_row(row_id, &[format!("p{}", i)]))
                    .await
                    .expect("append");
            }));
        }
        for handle in handles {
            handle.await.expect("join");
        }
        store.table_rows(&id, "People").expect("rows")
    });

    let ids: Vec<String> = rows
        .iter()
        .skip(1)
        .map(|row| row[0].formatted().to_string())
        .collect();
    let expected: Vec<String> = (1..=20).map(|n| n.to_string()).collect();
    assert_eq!(ids, expected);
}

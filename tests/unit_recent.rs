use assert_matches::assert_matches;
use sheetlink::SheetLinkError;
use sheetlink::host::{MemoryStore, PropertyStore};
use sheetlink::recent::RecentSheets;
use std::sync::Arc;

fn ids(recent: &RecentSheets) -> Vec<String> {
    recent.list().into_iter().map(|entry| entry.id).collect()
}

#[test]
fn touch_beyond_capacity_evicts_oldest() {
    let store = Arc::new(MemoryStore::new());
    let recent = RecentSheets::new(store, "alice", 3);

    for id in ["a", "b", "c", "d"] {
        recent.touch(id, &format!("Sheet {id}")).unwrap();
    }

    assert_eq!(ids(&recent), ["d", "c", "b"]);
}

#[test]
fn touching_existing_id_promotes_without_duplicating() {
    let store = Arc::new(MemoryStore::new());
    let recent = RecentSheets::new(store, "alice", 5);

    recent.touch("a", "First").unwrap();
    recent.touch("b", "Second").unwrap();
    recent.touch("c", "Third").unwrap();
    recent.touch("a", "First renamed").unwrap();

    assert_eq!(ids(&recent), ["a", "c", "b"]);
    assert_eq!(recent.list()[0].name, "First renamed");
    assert_eq!(recent.list().len(), 3);
}

#[test]
fn clear_then_list_is_empty() {
    let store = Arc::new(MemoryStore::new());
    let recent = RecentSheets::new(store.clone(), "alice", 5);

    recent.touch("a", "First").unwrap();
    recent.clear().unwrap();

    assert!(recent.list().is_empty());
    assert!(recent.names().is_empty());
    assert_eq!(store.get("recent_sheets/alice").unwrap(), None);
}

#[test]
fn list_survives_reload_from_store() {
    let store = Arc::new(MemoryStore::new());
    {
        let recent = RecentSheets::new(store.clone(), "alice", 5);
        recent.touch("a", "First").unwrap();
        recent.touch("b", "Second").unwrap();
    }

    let reloaded = RecentSheets::new(store, "alice", 5);
    assert_eq!(ids(&reloaded), ["b", "a"]);
}

#[test]
fn sessions_are_isolated() {
    let store = Arc::new(MemoryStore::new());
    let alice = RecentSheets::new(store.clone(), "alice", 5);
    let bob = RecentSheets::new(store, "bob", 5);

    alice.touch("a", "Alice sheet").unwrap();

    assert_eq!(ids(&alice), ["a"]);
    assert!(bob.list().is_empty());
}

#[test]
fn corrupt_record_degrades_to_empty_list() {
    let store = Arc::new(MemoryStore::new());
    store.set("recent_sheets/alice", "not json").unwrap();

    let recent = RecentSheets::new(store, "alice", 5);
    assert!(recent.list().is_empty());
}

#[test]
fn touch_propagates_store_write_failures() {
    struct FailingStore;

    impl PropertyStore for FailingStore {
        fn get(&self, _key: &str) -> sheetlink::Result<Option<String>> {
            Ok(None)
        }
        fn set(&self, _key: &str, _value: &str) -> sheetlink::Result<()> {
            Err(SheetLinkError::host(anyhow::anyhow!("store offline")))
        }
        fn delete(&self, _key: &str) -> sheetlink::Result<()> {
            Err(SheetLinkError::host(anyhow::anyhow!("store offline")))
        }
    }

    let recent = RecentSheets::new(Arc::new(FailingStore), "alice", 5);
    assert_matches!(
        recent.touch("a", "First"),
        Err(SheetLinkError::HostUnavailable(_))
    );
    assert_matches!(recent.clear(), Err(SheetLinkError::HostUnavailable(_)));
}

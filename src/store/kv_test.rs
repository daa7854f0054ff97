use super::*;

#[test]
fn memory_store_set_get_remove() {
    let store = MemoryStore::new();
    assert!(store.is_empty());
    store.set("language", "hi").unwrap();
    assert_eq!(store.get("language").as_deref(), Some("hi"));
    store.remove("language");
    assert_eq!(store.get("language"), None);
}

#[test]
fn memory_store_last_write_wins() {
    let store = MemoryStore::new();
    store.set("accountType", "user").unwrap();
    store.set("accountType", "worker").unwrap();
    assert_eq!(store.get("accountType").as_deref(), Some("worker"));
    assert_eq!(store.len(), 1);
}

#[test]
fn memory_store_remove_missing_key_is_noop() {
    let store = MemoryStore::new();
    store.remove("missing");
    assert!(store.is_empty());
}

#[cfg(not(feature = "csr"))]
#[test]
fn browser_storage_outside_browser_reads_nothing_and_rejects_writes() {
    let store = BrowserStorage;
    assert_eq!(store.get("user"), None);
    assert_eq!(store.set("user", "{}"), Err(StorageError::Unavailable));
    store.remove("user");
}

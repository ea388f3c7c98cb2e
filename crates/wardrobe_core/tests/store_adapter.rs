use wardrobe_core::seed::default_clothing_items;
use wardrobe_core::store::{load_collection, load_stored_collection, save_collection, LoadSource};
use wardrobe_core::{
    ClothingItem, KeyValueStore, SqliteKeyValueStore, StoreError, CLOTHING_ITEMS_KEY,
    OUTFIT_LOGS_KEY,
};

fn fallback() -> Vec<ClothingItem> {
    default_clothing_items().into_iter().take(2).collect()
}

#[test]
fn collection_keys_are_fixed_and_distinct() {
    assert_eq!(CLOTHING_ITEMS_KEY, "clothing_items");
    assert_eq!(OUTFIT_LOGS_KEY, "outfit_logs");
}

#[test]
fn load_missing_key_returns_default() {
    let store = SqliteKeyValueStore::open_in_memory().unwrap();

    let loaded = load_collection(&store, CLOTHING_ITEMS_KEY, fallback);
    assert_eq!(loaded, fallback());
}

#[test]
fn load_corrupted_json_returns_default() {
    let store = SqliteKeyValueStore::open_in_memory().unwrap();
    store.set(CLOTHING_ITEMS_KEY, "{not json").unwrap();

    let loaded = load_collection(&store, CLOTHING_ITEMS_KEY, fallback);
    assert_eq!(loaded, fallback());
}

#[test]
fn load_non_array_value_returns_default() {
    let store = SqliteKeyValueStore::open_in_memory().unwrap();
    store
        .set(CLOTHING_ITEMS_KEY, r#"{"id": "x", "name": "shirt"}"#)
        .unwrap();

    let loaded = load_stored_collection(&store, CLOTHING_ITEMS_KEY, fallback);
    assert_eq!(loaded.items, fallback());
    assert_eq!(loaded.source, LoadSource::Failed);
}

#[test]
fn load_skips_only_entries_that_do_not_decode() {
    let store = SqliteKeyValueStore::open_in_memory().unwrap();
    let kept = default_clothing_items().remove(3);
    let raw = format!(
        r#"[{{"id": "x", "name": 42}}, {}]"#,
        serde_json::to_string(&kept).unwrap()
    );
    store.set(CLOTHING_ITEMS_KEY, &raw).unwrap();

    let loaded = load_stored_collection(&store, CLOTHING_ITEMS_KEY, fallback);
    assert_eq!(loaded.items, vec![kept]);
    assert_eq!(loaded.source, LoadSource::Stored);
    assert_eq!(loaded.skipped, 1);
}

#[test]
fn load_reports_missing_key() {
    let store = SqliteKeyValueStore::open_in_memory().unwrap();

    let loaded = load_stored_collection(&store, OUTFIT_LOGS_KEY, fallback);
    assert_eq!(loaded.source, LoadSource::Missing);
    assert_eq!(loaded.skipped, 0);
}

#[test]
fn load_read_failure_returns_default() {
    let store = SqliteKeyValueStore::open_in_memory().unwrap();
    store
        .connection()
        .execute_batch("DROP TABLE kv_entries;")
        .unwrap();

    assert!(store.get(CLOTHING_ITEMS_KEY).is_err());
    let loaded = load_stored_collection(&store, CLOTHING_ITEMS_KEY, fallback);
    assert_eq!(loaded.items, fallback());
    assert_eq!(loaded.source, LoadSource::Failed);
}

#[test]
fn save_then_load_returns_same_items() {
    let store = SqliteKeyValueStore::open_in_memory().unwrap();
    let items = default_clothing_items();

    save_collection(&store, CLOTHING_ITEMS_KEY, items.as_slice()).unwrap();
    let loaded: Vec<ClothingItem> = load_collection(&store, CLOTHING_ITEMS_KEY, Vec::new);

    assert_eq!(loaded, items);
    let raw = store.get(CLOTHING_ITEMS_KEY).unwrap().unwrap();
    assert!(raw.starts_with('['));
}

#[test]
fn save_failure_is_reported_not_panicked() {
    let store = SqliteKeyValueStore::open_in_memory().unwrap();
    store
        .connection()
        .execute_batch("PRAGMA query_only = ON;")
        .unwrap();

    let err = save_collection(&store, CLOTHING_ITEMS_KEY, fallback().as_slice()).unwrap_err();
    assert!(matches!(err, StoreError::Db(_)));
}

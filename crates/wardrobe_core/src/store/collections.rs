//! JSON collection load/save over a [`KeyValueStore`].
//!
//! # Invariants
//! - A collection is stored as one JSON array under one fixed key.
//! - `load_collection` never returns an error; `save_collection` never panics.
//! - One undecodable entry only drops that entry.

use crate::store::kv_store::KeyValueStore;
use crate::store::StoreResult;
use log::{debug, error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Key of the clothing catalog blob.
pub const CLOTHING_ITEMS_KEY: &str = "clothing_items";
/// Key of the outfit history blob.
pub const OUTFIT_LOGS_KEY: &str = "outfit_logs";

/// Where a loaded collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Decoded from the stored value.
    Stored,
    /// Key absent (first run); holds the caller default.
    Missing,
    /// Read failed or the value is not a JSON array; holds the caller default.
    /// The stored value must be left alone.
    Failed,
}

/// Result of [`load_stored_collection`].
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedCollection<T> {
    pub items: Vec<T>,
    pub source: LoadSource,
    /// Stored entries dropped because they did not decode.
    pub skipped: usize,
}

impl<T> LoadedCollection<T> {
    fn fallback(items: Vec<T>, source: LoadSource) -> Self {
        Self {
            items,
            source,
            skipped: 0,
        }
    }
}

/// Loads the collection stored under `key`, reporting its provenance.
///
/// The stored value must be a JSON array. Entries are decoded one by one and
/// entries that fail to decode are skipped, so one bad record never costs the
/// rest of the collection. `default()` is used when the key is missing, the
/// substrate read fails, or the value is not an array.
pub fn load_stored_collection<S, T, F>(store: &S, key: &str, default: F) -> LoadedCollection<T>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
    F: FnOnce() -> Vec<T>,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("event=collection_load module=store status=missing key={key}");
            return LoadedCollection::fallback(default(), LoadSource::Missing);
        }
        Err(err) => {
            warn!(
                "event=collection_load module=store status=error key={} error_code=read_failed error={}",
                key, err
            );
            return LoadedCollection::fallback(default(), LoadSource::Failed);
        }
    };

    let entries = match serde_json::from_str::<Vec<Value>>(&raw) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(
                "event=collection_load module=store status=error key={} error_code=decode_failed error={}",
                key, err
            );
            return LoadedCollection::fallback(default(), LoadSource::Failed);
        }
    };

    let mut items = Vec::with_capacity(entries.len());
    let mut skipped = 0;
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<T>(entry) {
            Ok(item) => items.push(item),
            Err(err) => {
                skipped += 1;
                warn!(
                    "event=collection_load module=store status=skipped key={} index={} error={}",
                    key, index, err
                );
            }
        }
    }
    debug!(
        "event=collection_load module=store status=ok key={} count={} skipped={}",
        key,
        items.len(),
        skipped
    );
    LoadedCollection {
        items,
        source: LoadSource::Stored,
        skipped,
    }
}

/// Loads the collection stored under `key`, see [`load_stored_collection`].
///
/// Failures are logged and never reach the caller.
pub fn load_collection<S, T, F>(store: &S, key: &str, default: F) -> Vec<T>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
    F: FnOnce() -> Vec<T>,
{
    load_stored_collection(store, key, default).items
}

/// Serializes `items` as a JSON array and writes it under `key`.
///
/// # Errors
/// - `Encode` when serialization fails.
/// - `Db` when the substrate write fails (e.g. disk full, read-only file).
///
/// Both are logged here; callers may ignore the returned error.
pub fn save_collection<S, T>(store: &S, key: &str, items: &[T]) -> StoreResult<()>
where
    S: KeyValueStore + ?Sized,
    T: Serialize,
{
    let result: StoreResult<()> = serde_json::to_string(items)
        .map_err(Into::into)
        .and_then(|json| store.set(key, &json));

    match &result {
        Ok(()) => debug!(
            "event=collection_save module=store status=ok key={} count={}",
            key,
            items.len()
        ),
        Err(err) => error!(
            "event=collection_save module=store status=error key={} count={} error={}",
            key,
            items.len(),
            err
        ),
    }
    result
}

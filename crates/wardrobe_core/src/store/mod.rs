//! Persistent store adapter.
//!
//! # Responsibility
//! - Define the key-value contract the state core persists through.
//! - Read/write the two named JSON collections with degrade-and-continue
//!   semantics.
//!
//! # Invariants
//! - Loading never fails: absence and corruption both yield the caller default.
//! - A load reports whether its data came from storage, so defaults never
//!   overwrite a value that merely failed to read.
//! - Saving failures are logged and returned, never panicked on.

pub mod collections;
pub mod kv_store;

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use collections::{
    load_collection, load_stored_collection, save_collection, LoadSource, LoadedCollection,
    CLOTHING_ITEMS_KEY, OUTFIT_LOGS_KEY,
};
pub use kv_store::{KeyValueStore, SqliteKeyValueStore};

pub type StoreResult<T> = Result<T, StoreError>;

/// Error raised by key-value store reads and writes.
#[derive(Debug)]
pub enum StoreError {
    /// Storage substrate failure (open, read or write).
    Db(DbError),
    /// Collection could not be serialized to JSON.
    Encode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode collection: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

//! Host configuration resolved from the environment.
//!
//! # Responsibility
//! - Resolve database path and logging settings with stable defaults.
//! - Bootstrap logging and one explicitly owned wardrobe session from that
//!   configuration.
//!
//! # Invariants
//! - Blank environment values are treated as unset.
//! - Resolution never fails; only opening the store can.

use crate::clock::SystemDateSource;
use crate::logging::{default_log_level, init_logging, LoggingError};
use crate::service::wardrobe_state::WardrobeState;
use crate::store::{SqliteKeyValueStore, StoreResult};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "WARDROBE_DB_PATH";
pub const LOG_DIR_ENV: &str = "WARDROBE_LOG_DIR";
pub const LOG_LEVEL_ENV: &str = "WARDROBE_LOG_LEVEL";

const DEFAULT_DB_FILE_NAME: &str = "wardrobe.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "wardrobe-logs";

/// Session state backed by the on-disk store and the system clock.
pub type WardrobeSession = WardrobeState<SqliteKeyValueStore, SystemDateSource>;

/// Settings for one wardrobe session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WardrobeConfig {
    /// SQLite file holding the `clothing_items` / `outfit_logs` entries.
    pub db_path: PathBuf,
    /// Absolute directory for rolling log files.
    pub log_dir: PathBuf,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
}

impl Default for WardrobeConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_dir: std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME),
            log_level: default_log_level().to_string(),
        }
    }
}

impl WardrobeConfig {
    /// Resolves configuration from `WARDROBE_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let read = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            db_path: read(DB_PATH_ENV).map_or(defaults.db_path, PathBuf::from),
            log_dir: read(LOG_DIR_ENV).map_or(defaults.log_dir, PathBuf::from),
            log_level: read(LOG_LEVEL_ENV).unwrap_or(defaults.log_level),
        }
    }

    /// Starts file logging with the configured level and directory.
    ///
    /// # Errors
    /// Same as [`init_logging`].
    pub fn init_logging(&self) -> Result<(), LoggingError> {
        init_logging(&self.log_level, &self.log_dir)
    }
}

/// Opens the configured store and constructs the session's state core.
///
/// Logging is started separately (`WardrobeConfig::init_logging`), so a
/// logging failure never blocks access to the wardrobe.
pub fn open_wardrobe(config: &WardrobeConfig) -> StoreResult<WardrobeSession> {
    let store = SqliteKeyValueStore::open(&config.db_path)?;
    Ok(WardrobeState::open(store, SystemDateSource))
}

#[cfg(test)]
mod tests {
    use super::{open_wardrobe, WardrobeConfig, DB_PATH_ENV, LOG_LEVEL_ENV};
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[test]
    fn lookup_overrides_and_blank_values_fall_back() {
        let vars = HashMap::from([
            (DB_PATH_ENV, "  /data/wardrobe.db ".to_string()),
            (LOG_LEVEL_ENV, "   ".to_string()),
        ]);
        let config = WardrobeConfig::from_lookup(|name| vars.get(name).cloned());
        let defaults = WardrobeConfig::default();

        assert_eq!(config.db_path, PathBuf::from("/data/wardrobe.db"));
        assert_eq!(config.log_level, defaults.log_level);
        assert_eq!(config.log_dir, defaults.log_dir);
    }

    #[test]
    fn open_wardrobe_seeds_a_fresh_database() {
        let dir = tempfile::tempdir().unwrap();
        let config = WardrobeConfig {
            db_path: dir.path().join("wardrobe.sqlite3"),
            ..WardrobeConfig::default()
        };

        let state = open_wardrobe(&config).unwrap();
        assert_eq!(state.clothing_items().len(), 10);
        assert!(config.db_path.exists());
    }
}

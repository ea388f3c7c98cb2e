//! Core state management for the wardrobe tracker.
//! This crate is the single source of truth for wardrobe invariants.

pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod seed;
pub mod service;
pub mod store;

pub use clock::{DateSource, FixedDateSource, SystemDateSource};
pub use config::{open_wardrobe, WardrobeConfig, WardrobeSession};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::clothing::{
    ClothingCategory, ClothingItem, ClothingSubCategory, ClothingValidationError, ItemId, WearType,
};
pub use model::outfit::{LogId, Outfit, OutfitLog};
pub use service::stats::{WearCount, WearOrder};
pub use service::wardrobe_state::{
    DeletionSummary, LoggedOutfit, OutfitRemoval, WardrobeError, WardrobeResult, WardrobeSnapshot,
    WardrobeState,
};
pub use store::{
    KeyValueStore, SqliteKeyValueStore, StoreError, StoreResult, CLOTHING_ITEMS_KEY,
    OUTFIT_LOGS_KEY,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

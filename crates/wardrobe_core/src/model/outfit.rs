//! Outfit and outfit log domain model.
//!
//! # Responsibility
//! - Define the top/bottom pairing recorded when an outfit is logged.
//! - Group all outfits of one calendar day into an `OutfitLog`.
//!
//! # Invariants
//! - `Outfit` holds item snapshots, so later catalog edits do not rewrite history.
//! - An `OutfitLog` is never empty and is unique per `date` within a collection.
//!   The state core enforces both; this module only describes the shape.

use crate::model::clothing::ClothingItem;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of an outfit log.
pub type LogId = String;

/// One top + one bottom worn together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outfit {
    pub top: ClothingItem,
    pub bottom: ClothingItem,
}

impl Outfit {
    pub fn new(top: ClothingItem, bottom: ClothingItem) -> Self {
        Self { top, bottom }
    }

    /// Returns whether either side of the outfit is the item `id`.
    pub fn references(&self, id: &str) -> bool {
        self.top.id == id || self.bottom.id == id
    }
}

/// All outfits logged on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutfitLog {
    pub id: LogId,
    /// Day granularity; serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Logging order.
    pub outfits: Vec<Outfit>,
}

impl OutfitLog {
    /// Creates a log for `date` holding a single outfit, with a generated id.
    pub fn first_of_day(date: NaiveDate, outfit: Outfit) -> Self {
        Self {
            id: generate_log_id(),
            date,
            outfits: vec![outfit],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.outfits.is_empty()
    }
}

/// Generates a fresh outfit log id.
pub fn generate_log_id() -> LogId {
    format!("log-{}", Uuid::new_v4())
}

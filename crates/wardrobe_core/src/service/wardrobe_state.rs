//! Wardrobe state core.
//!
//! # Responsibility
//! - Own the clothing catalog and outfit history for one session.
//! - Apply mutations with cross-collection consistency (delete cascades).
//! - Write each effective mutation through to the key-value store.
//!
//! # Invariants
//! - No `OutfitLog` is ever empty after an operation returns.
//! - At most one `OutfitLog` exists per calendar date.
//! - Clothing item ids and outfit log ids are unique.
//! - Each effective mutation yields a new collection version; snapshots taken
//!   before it are never altered.
//! - Persistence failures never roll back or reject an in-memory mutation.

use crate::clock::DateSource;
use crate::model::clothing::{
    generate_item_id, ClothingCategory, ClothingItem, ClothingSubCategory,
    ClothingValidationError, ItemId,
};
use crate::model::outfit::{generate_log_id, LogId, Outfit, OutfitLog};
use crate::seed::{default_clothing_items, default_outfit_logs};
use crate::service::stats::{self, WearCount, WearOrder};
use crate::store::{
    load_stored_collection, save_collection, KeyValueStore, LoadSource, CLOTHING_ITEMS_KEY,
    OUTFIT_LOGS_KEY,
};
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub type WardrobeResult<T> = Result<T, WardrobeError>;

/// Rejected mutation. The collections are untouched whenever one is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WardrobeError {
    /// Item breaks a clothing model invariant.
    InvalidItem(ClothingValidationError),
    /// An item with this id is already in the catalog.
    DuplicateItem(ItemId),
    /// Outfit position does not exist in the addressed log.
    OutfitIndexOutOfRange {
        log_id: LogId,
        index: usize,
        len: usize,
    },
}

impl Display for WardrobeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidItem(err) => write!(f, "invalid clothing item: {err}"),
            Self::DuplicateItem(id) => write!(f, "clothing item already exists: {id}"),
            Self::OutfitIndexOutOfRange { log_id, index, len } => write!(
                f,
                "outfit index {index} is out of range for log {log_id} with {len} outfit(s)"
            ),
        }
    }
}

impl Error for WardrobeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidItem(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ClothingValidationError> for WardrobeError {
    fn from(value: ClothingValidationError) -> Self {
        Self::InvalidItem(value)
    }
}

/// Where a successfully logged outfit landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedOutfit {
    pub log_id: LogId,
    /// Position of the new outfit within the log.
    pub outfit_index: usize,
    /// `true` when this was the first outfit of the day.
    pub created_log: bool,
}

/// Outcome of a clothing item deletion, including cascade effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeletionSummary {
    pub items_removed: usize,
    pub outfits_removed: usize,
    pub logs_removed: usize,
}

impl DeletionSummary {
    /// `true` when nothing was removed.
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }
}

/// Outcome of removing outfits from a log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutfitRemoval {
    /// The log id is unknown; nothing changed.
    Unchanged,
    /// Outfit(s) removed; the log still has entries.
    OutfitRemoved,
    /// The last outfit(s) were removed, so the log itself is gone.
    LogRemoved,
}

/// Immutable view of one collection version.
#[derive(Debug, Clone)]
pub struct WardrobeSnapshot {
    pub clothing_items: Arc<Vec<ClothingItem>>,
    pub outfit_logs: Arc<Vec<OutfitLog>>,
    pub revision: u64,
}

/// Single owner of the wardrobe collections for one session.
pub struct WardrobeState<S: KeyValueStore, C: DateSource> {
    store: S,
    clock: C,
    clothing_items: Arc<Vec<ClothingItem>>,
    outfit_logs: Arc<Vec<OutfitLog>>,
    revision: u64,
    persist_failures: u64,
}

impl<S: KeyValueStore, C: DateSource> WardrobeState<S, C> {
    /// Loads both collections from `store` and returns the ready state.
    ///
    /// Missing or unreadable collections fall back to the built-in dataset,
    /// independently of each other. Loaded data is repaired so that every
    /// invariant holds. A collection is written back only when its key was
    /// missing or it needed repair; a value that failed to read is left
    /// untouched in the store.
    pub fn open(store: S, clock: C) -> Self {
        let today = clock.today();
        let loaded_items =
            load_stored_collection(&store, CLOTHING_ITEMS_KEY, default_clothing_items);
        let loaded_logs =
            load_stored_collection(&store, OUTFIT_LOGS_KEY, || default_outfit_logs(today));

        let (clothing_items, deduped) = dedupe_items(loaded_items.items);
        let (outfit_logs, normalized) = normalize_logs(loaded_logs.items);
        let item_repairs = deduped + loaded_items.skipped;
        let log_repairs = normalized + loaded_logs.skipped;
        if item_repairs + log_repairs > 0 {
            warn!(
                "event=state_open module=state status=repaired item_repairs={} log_repairs={}",
                item_repairs, log_repairs
            );
        }

        let mut state = Self {
            store,
            clock,
            clothing_items: Arc::new(clothing_items),
            outfit_logs: Arc::new(outfit_logs),
            revision: 0,
            persist_failures: 0,
        };
        if needs_write_back(loaded_items.source, item_repairs) {
            state.persist_items();
        }
        if needs_write_back(loaded_logs.source, log_repairs) {
            state.persist_logs();
        }

        info!(
            "event=state_open module=state status=ok items={} logs={}",
            state.clothing_items.len(),
            state.outfit_logs.len()
        );
        state
    }

    /// Current clothing catalog, insertion order.
    pub fn clothing_items(&self) -> &[ClothingItem] {
        &self.clothing_items
    }

    /// Current outfit logs, storage order (new days are prepended).
    pub fn outfit_logs(&self) -> &[OutfitLog] {
        &self.outfit_logs
    }

    /// Cheap handle to the current version of both collections.
    pub fn snapshot(&self) -> WardrobeSnapshot {
        WardrobeSnapshot {
            clothing_items: Arc::clone(&self.clothing_items),
            outfit_logs: Arc::clone(&self.outfit_logs),
            revision: self.revision,
        }
    }

    /// Incremented on every mutation that changed a collection.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of collection writes that failed since `open`.
    pub fn persist_failures(&self) -> u64 {
        self.persist_failures
    }

    pub fn find_item(&self, id: &str) -> Option<&ClothingItem> {
        self.clothing_items.iter().find(|item| item.id == id)
    }

    pub fn find_log(&self, id: &str) -> Option<&OutfitLog> {
        self.outfit_logs.iter().find(|log| log.id == id)
    }

    pub fn log_for_date(&self, date: NaiveDate) -> Option<&OutfitLog> {
        self.outfit_logs.iter().find(|log| log.date == date)
    }

    /// Log of the date source's current day, if anything was worn yet.
    pub fn todays_log(&self) -> Option<&OutfitLog> {
        self.log_for_date(self.clock.today())
    }

    /// Logs sorted by date, most recent first.
    pub fn history(&self) -> Vec<&OutfitLog> {
        let mut logs: Vec<&OutfitLog> = self.outfit_logs.iter().collect();
        logs.sort_by(|a, b| b.date.cmp(&a.date));
        logs
    }

    pub fn items_in_category(&self, category: ClothingCategory) -> Vec<&ClothingItem> {
        self.clothing_items
            .iter()
            .filter(|item| item.category == category)
            .collect()
    }

    pub fn items_in_sub_category(&self, sub_category: ClothingSubCategory) -> Vec<&ClothingItem> {
        self.clothing_items
            .iter()
            .filter(|item| item.sub_category == sub_category)
            .collect()
    }

    /// Wear counts for every catalog item.
    pub fn wear_frequency(&self, order: WearOrder) -> Vec<WearCount> {
        stats::wear_frequency(&self.clothing_items, &self.outfit_logs, order)
    }

    /// The `limit` most worn catalog items.
    pub fn top_worn(&self, limit: usize) -> Vec<WearCount> {
        stats::top_worn(&self.clothing_items, &self.outfit_logs, limit)
    }

    /// Appends `item` to the catalog.
    ///
    /// A blank id is replaced by a generated one.
    ///
    /// # Errors
    /// - `InvalidItem` when the sub-category does not match the category.
    /// - `DuplicateItem` when the id is already taken.
    pub fn add_clothing_item(&mut self, mut item: ClothingItem) -> WardrobeResult<ItemId> {
        if item.id.trim().is_empty() {
            item.id = generate_item_id();
        }
        if let Err(err) = item.validate() {
            warn!(
                "event=item_add module=state status=rejected item_id={} error={}",
                item.id, err
            );
            return Err(err.into());
        }
        if self.find_item(&item.id).is_some() {
            warn!(
                "event=item_add module=state status=rejected item_id={} error_code=duplicate_id",
                item.id
            );
            return Err(WardrobeError::DuplicateItem(item.id));
        }

        let id = item.id.clone();
        Arc::make_mut(&mut self.clothing_items).push(item);
        self.revision += 1;
        self.persist_items();

        info!(
            "event=item_add module=state status=ok item_id={} items={}",
            id,
            self.clothing_items.len()
        );
        Ok(id)
    }

    /// Records `top_id` + `bottom_id` as worn today.
    ///
    /// Returns `None` and leaves every collection untouched when either id is
    /// unknown, or when the top is not a `Tops` item or the bottom not a
    /// `Bottoms` item. Callers surface that to the user.
    pub fn log_outfit(&mut self, top_id: &str, bottom_id: &str) -> Option<LoggedOutfit> {
        let top = self.resolve_outfit_item("top", top_id, ClothingCategory::Tops)?;
        let bottom = self.resolve_outfit_item("bottom", bottom_id, ClothingCategory::Bottoms)?;
        let today = self.clock.today();
        let outfit = Outfit::new(top, bottom);

        let logs = Arc::make_mut(&mut self.outfit_logs);
        let logged = match logs.iter().position(|log| log.date == today) {
            Some(position) => {
                let log = &mut logs[position];
                log.outfits.push(outfit);
                LoggedOutfit {
                    log_id: log.id.clone(),
                    outfit_index: log.outfits.len() - 1,
                    created_log: false,
                }
            }
            None => {
                let log = OutfitLog::first_of_day(today, outfit);
                let log_id = log.id.clone();
                logs.insert(0, log);
                LoggedOutfit {
                    log_id,
                    outfit_index: 0,
                    created_log: true,
                }
            }
        };
        self.revision += 1;
        self.persist_logs();

        info!(
            "event=outfit_log module=state status=ok log_id={} date={} outfit_index={} created_log={}",
            logged.log_id, today, logged.outfit_index, logged.created_log
        );
        Some(logged)
    }

    /// Removes every item whose id is in `ids`, plus every logged outfit that
    /// wore one of them. Logs left empty are removed too.
    ///
    /// Unknown ids are ignored, so repeating a deletion is a no-op.
    pub fn delete_clothing_items<I>(&mut self, ids: I) -> DeletionSummary
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let doomed: HashSet<String> = ids
            .into_iter()
            .map(|id| id.as_ref().to_string())
            .collect();

        let items_removed = self
            .clothing_items
            .iter()
            .filter(|item| doomed.contains(&item.id))
            .count();
        let outfits_removed = self
            .outfit_logs
            .iter()
            .flat_map(|log| log.outfits.iter())
            .filter(|outfit| wears_any(outfit, &doomed))
            .count();

        if items_removed == 0 && outfits_removed == 0 {
            debug!(
                "event=item_delete module=state status=noop requested={}",
                doomed.len()
            );
            return DeletionSummary::default();
        }

        if items_removed > 0 {
            Arc::make_mut(&mut self.clothing_items).retain(|item| !doomed.contains(&item.id));
        }

        let mut logs_removed = 0;
        if outfits_removed > 0 {
            let logs = Arc::make_mut(&mut self.outfit_logs);
            for log in logs.iter_mut() {
                log.outfits.retain(|outfit| !wears_any(outfit, &doomed));
            }
            let before = logs.len();
            logs.retain(|log| !log.is_empty());
            logs_removed = before - logs.len();
        }

        self.revision += 1;
        self.persist_items();
        self.persist_logs();

        let summary = DeletionSummary {
            items_removed,
            outfits_removed,
            logs_removed,
        };
        info!(
            "event=item_delete module=state status=ok items_removed={} outfits_removed={} logs_removed={}",
            summary.items_removed, summary.outfits_removed, summary.logs_removed
        );
        summary
    }

    /// Removes the outfit at `outfit_index` from log `log_id`; the log goes
    /// away with its last outfit.
    ///
    /// An unknown `log_id` is a no-op (`Ok(OutfitRemoval::Unchanged)`).
    ///
    /// # Errors
    /// - `OutfitIndexOutOfRange` when the log has no outfit at that position.
    pub fn delete_outfit_log(
        &mut self,
        log_id: &str,
        outfit_index: usize,
    ) -> WardrobeResult<OutfitRemoval> {
        self.delete_outfits(log_id, &[outfit_index])
    }

    /// Removes several outfits of one log in a single mutation.
    ///
    /// Duplicate indices count once. Either every index is removed or, when
    /// any is out of range, none is.
    ///
    /// # Errors
    /// - `OutfitIndexOutOfRange` for the first index the log does not have.
    pub fn delete_outfits(
        &mut self,
        log_id: &str,
        outfit_indices: &[usize],
    ) -> WardrobeResult<OutfitRemoval> {
        let Some(position) = self.outfit_logs.iter().position(|log| log.id == log_id) else {
            debug!("event=outfit_delete module=state status=noop log_id={log_id} reason=unknown_log");
            return Ok(OutfitRemoval::Unchanged);
        };

        let len = self.outfit_logs[position].outfits.len();
        if let Some(&index) = outfit_indices.iter().find(|&&index| index >= len) {
            warn!(
                "event=outfit_delete module=state status=rejected log_id={} index={} len={}",
                log_id, index, len
            );
            return Err(WardrobeError::OutfitIndexOutOfRange {
                log_id: log_id.to_string(),
                index,
                len,
            });
        }
        if outfit_indices.is_empty() {
            return Ok(OutfitRemoval::Unchanged);
        }

        let mut descending = outfit_indices.to_vec();
        descending.sort_unstable_by(|a, b| b.cmp(a));
        descending.dedup();

        let logs = Arc::make_mut(&mut self.outfit_logs);
        for index in &descending {
            logs[position].outfits.remove(*index);
        }
        let removal = if logs[position].is_empty() {
            logs.remove(position);
            OutfitRemoval::LogRemoved
        } else {
            OutfitRemoval::OutfitRemoved
        };
        self.revision += 1;
        self.persist_logs();

        info!(
            "event=outfit_delete module=state status=ok log_id={} removed={} log_removed={}",
            log_id,
            descending.len(),
            removal == OutfitRemoval::LogRemoved
        );
        Ok(removal)
    }

    fn resolve_outfit_item(
        &self,
        side: &'static str,
        id: &str,
        expected: ClothingCategory,
    ) -> Option<ClothingItem> {
        let reason = match self.find_item(id) {
            Some(item) if item.category == expected => return Some(item.clone()),
            Some(_) => "wrong_category",
            None => "unknown_item",
        };
        warn!(
            "event=outfit_log module=state status=rejected side={} item_id={} reason={}",
            side, id, reason
        );
        None
    }

    fn persist_items(&mut self) {
        let items = self.clothing_items.as_slice();
        if save_collection(&self.store, CLOTHING_ITEMS_KEY, items).is_err() {
            self.persist_failures += 1;
        }
    }

    fn persist_logs(&mut self) {
        let logs = self.outfit_logs.as_slice();
        if save_collection(&self.store, OUTFIT_LOGS_KEY, logs).is_err() {
            self.persist_failures += 1;
        }
    }
}

fn wears_any(outfit: &Outfit, ids: &HashSet<String>) -> bool {
    ids.iter().any(|id| outfit.references(id))
}

// Seeded defaults stick and repairs persist; a failed read keeps its stored value.
fn needs_write_back(source: LoadSource, repairs: usize) -> bool {
    match source {
        LoadSource::Missing => true,
        LoadSource::Stored => repairs > 0,
        LoadSource::Failed => false,
    }
}

// Keeps the first occurrence of every item id.
fn dedupe_items(items: Vec<ClothingItem>) -> (Vec<ClothingItem>, usize) {
    let total = items.len();
    let mut seen = HashSet::new();
    let unique: Vec<ClothingItem> = items
        .into_iter()
        .filter(|item| seen.insert(item.id.clone()))
        .collect();
    let dropped = total - unique.len();
    (unique, dropped)
}

// Drops empty logs, merges logs sharing a date into the first one seen, and
// re-keys logs whose id collides with an earlier log.
fn normalize_logs(logs: Vec<OutfitLog>) -> (Vec<OutfitLog>, usize) {
    let mut normalized: Vec<OutfitLog> = Vec::with_capacity(logs.len());
    let mut by_date: HashMap<NaiveDate, usize> = HashMap::new();
    let mut ids: HashSet<LogId> = HashSet::new();
    let mut repairs = 0;

    for mut log in logs {
        if log.is_empty() {
            repairs += 1;
            continue;
        }
        if let Some(&position) = by_date.get(&log.date) {
            normalized[position].outfits.append(&mut log.outfits);
            repairs += 1;
            continue;
        }
        if !ids.insert(log.id.clone()) {
            log.id = generate_log_id();
            ids.insert(log.id.clone());
            repairs += 1;
        }
        by_date.insert(log.date, normalized.len());
        normalized.push(log);
    }
    (normalized, repairs)
}

#[cfg(test)]
mod tests {
    use super::{dedupe_items, normalize_logs};
    use crate::model::outfit::OutfitLog;
    use crate::seed::{default_clothing_items, default_outfit_logs};
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn normalize_logs_drops_empty_and_merges_same_date() {
        let seeded = default_outfit_logs(day(10));
        let mut duplicate_day = seeded[0].clone();
        duplicate_day.id = "dup".to_string();
        let empty = OutfitLog {
            id: "empty".to_string(),
            date: day(1),
            outfits: Vec::new(),
        };
        let expected_len = seeded[0].outfits.len() * 2;

        let mut input = seeded.clone();
        input.push(duplicate_day);
        input.push(empty);

        let (logs, repairs) = normalize_logs(input);
        assert_eq!(repairs, 2);
        assert_eq!(logs.len(), seeded.len());
        assert_eq!(logs[0].id, seeded[0].id);
        assert_eq!(logs[0].outfits.len(), expected_len);
    }

    #[test]
    fn normalize_logs_rekeys_colliding_ids() {
        let seeded = default_outfit_logs(day(10));
        let mut collision = seeded[1].clone();
        collision.date = day(20);
        collision.id = seeded[0].id.clone();

        let mut input = seeded.clone();
        input.push(collision);
        let (logs, repairs) = normalize_logs(input);

        assert_eq!(repairs, 1);
        assert_eq!(logs.len(), seeded.len() + 1);
        assert_ne!(logs.last().unwrap().id, seeded[0].id);
    }

    #[test]
    fn dedupe_items_keeps_first_occurrence() {
        let mut items = default_clothing_items();
        let mut twin = items[0].clone();
        twin.name = "twin".to_string();
        items.push(twin);

        let (unique, dropped) = dedupe_items(items);
        assert_eq!(dropped, 1);
        assert_eq!(unique.len(), 10);
        assert_eq!(unique[0].name, "Blue T-Shirt");
    }
}

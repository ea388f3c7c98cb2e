//! Wear-frequency statistics over the catalog and outfit history.
//!
//! # Invariants
//! - Every catalog item gets exactly one entry, including never-worn items.
//! - Outfits referencing items no longer in the catalog are ignored.
//! - Sorting is stable: equal counts keep catalog order.

use crate::model::clothing::ClothingItem;
use crate::model::outfit::OutfitLog;
use std::collections::HashMap;

/// How many logged outfits reference one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WearCount {
    pub item: ClothingItem,
    pub count: usize,
}

/// Ordering of a wear-frequency listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WearOrder {
    #[default]
    MostWorn,
    LeastWorn,
}

/// Counts how often each catalog item appears in logged outfits.
pub fn wear_frequency(
    items: &[ClothingItem],
    logs: &[OutfitLog],
    order: WearOrder,
) -> Vec<WearCount> {
    let mut counts: HashMap<&str, usize> = items.iter().map(|item| (item.id.as_str(), 0)).collect();

    for outfit in logs.iter().flat_map(|log| log.outfits.iter()) {
        for worn in [&outfit.top, &outfit.bottom] {
            if let Some(count) = counts.get_mut(worn.id.as_str()) {
                *count += 1;
            }
        }
    }

    let mut frequency: Vec<WearCount> = items
        .iter()
        .map(|item| WearCount {
            item: item.clone(),
            count: counts.get(item.id.as_str()).copied().unwrap_or(0),
        })
        .collect();

    match order {
        WearOrder::MostWorn => frequency.sort_by(|a, b| b.count.cmp(&a.count)),
        WearOrder::LeastWorn => frequency.sort_by(|a, b| a.count.cmp(&b.count)),
    }
    frequency
}

/// The `limit` most worn items, e.g. for a chart.
pub fn top_worn(items: &[ClothingItem], logs: &[OutfitLog], limit: usize) -> Vec<WearCount> {
    let mut frequency = wear_frequency(items, logs, WearOrder::MostWorn);
    frequency.truncate(limit);
    frequency
}

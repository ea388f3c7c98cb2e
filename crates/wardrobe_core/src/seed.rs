//! Built-in starter dataset used when storage has nothing usable.
//!
//! Log dates are relative to the injected `today`, so a fresh install shows a
//! short recent history.

use crate::model::clothing::{ClothingItem, ClothingSubCategory, WearType};
use crate::model::outfit::{Outfit, OutfitLog};
use chrono::{Days, NaiveDate};

struct SeedItem {
    id: &'static str,
    name: &'static str,
    sub_category: ClothingSubCategory,
    wear_type: WearType,
    hint: &'static str,
}

const SEED_ITEMS: &[SeedItem] = &[
    SeedItem {
        id: "top1",
        name: "Blue T-Shirt",
        sub_category: ClothingSubCategory::TShirt,
        wear_type: WearType::Indoor,
        hint: "blue t-shirt",
    },
    SeedItem {
        id: "top2",
        name: "White Shirt",
        sub_category: ClothingSubCategory::Shirt,
        wear_type: WearType::Outdoor,
        hint: "white shirt",
    },
    SeedItem {
        id: "top3",
        name: "Gray Hoodie",
        sub_category: ClothingSubCategory::Hoodie,
        wear_type: WearType::Outdoor,
        hint: "gray hoodie",
    },
    SeedItem {
        id: "top4",
        name: "Black Sweatshirt",
        sub_category: ClothingSubCategory::Sweatshirt,
        wear_type: WearType::Indoor,
        hint: "black sweatshirt",
    },
    SeedItem {
        id: "top5",
        name: "Beige Sweater",
        sub_category: ClothingSubCategory::Sweater,
        wear_type: WearType::Indoor,
        hint: "beige sweater",
    },
    SeedItem {
        id: "bottom1",
        name: "Denim Shorts",
        sub_category: ClothingSubCategory::Shorts,
        wear_type: WearType::Outdoor,
        hint: "denim shorts",
    },
    SeedItem {
        id: "bottom2",
        name: "Chino Pants",
        sub_category: ClothingSubCategory::Pants,
        wear_type: WearType::Indoor,
        hint: "chino pants",
    },
    SeedItem {
        id: "bottom3",
        name: "Cargo Shorts",
        sub_category: ClothingSubCategory::ThreeFourthPants,
        wear_type: WearType::Outdoor,
        hint: "cargo shorts",
    },
    SeedItem {
        id: "bottom4",
        name: "Blue Jeans",
        sub_category: ClothingSubCategory::Pants,
        wear_type: WearType::Outdoor,
        hint: "blue jeans",
    },
    SeedItem {
        id: "bottom5",
        name: "Khaki Shorts",
        sub_category: ClothingSubCategory::Shorts,
        wear_type: WearType::Indoor,
        hint: "khaki shorts",
    },
];

// (log id, days before today, outfits as (top index, bottom index) into SEED_ITEMS)
const SEED_LOGS: &[(&str, u64, &[(usize, usize)])] = &[
    ("log1", 1, &[(0, 5), (1, 6)]),
    ("log2", 2, &[(2, 7)]),
    ("log3", 4, &[(0, 5)]),
];

/// Default clothing catalog.
pub fn default_clothing_items() -> Vec<ClothingItem> {
    SEED_ITEMS
        .iter()
        .map(|seed| ClothingItem {
            id: seed.id.to_string(),
            name: seed.name.to_string(),
            image: format!("https://picsum.photos/seed/{}/400/400", seed.id),
            image_hint: seed.hint.to_string(),
            category: seed.sub_category.category(),
            sub_category: seed.sub_category,
            wear_type: seed.wear_type,
        })
        .collect()
}

/// Default outfit history, most recent first.
pub fn default_outfit_logs(today: NaiveDate) -> Vec<OutfitLog> {
    let items = default_clothing_items();
    SEED_LOGS
        .iter()
        .map(|(id, days_ago, pairs)| OutfitLog {
            id: (*id).to_string(),
            date: today.checked_sub_days(Days::new(*days_ago)).unwrap_or(today),
            outfits: pairs
                .iter()
                .map(|&(top, bottom)| Outfit::new(items[top].clone(), items[bottom].clone()))
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{default_clothing_items, default_outfit_logs};
    use chrono::NaiveDate;
    use std::collections::HashSet;

    #[test]
    fn seed_items_are_valid_and_unique() {
        let items = default_clothing_items();
        assert_eq!(items.len(), 10);
        for item in &items {
            item.validate().unwrap();
        }
        let ids: HashSet<_> = items.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids.len(), items.len());
    }

    #[test]
    fn seed_logs_are_non_empty_unique_per_date_and_pair_tops_with_bottoms() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let logs = default_outfit_logs(today);

        let dates: HashSet<_> = logs.iter().map(|log| log.date).collect();
        assert_eq!(dates.len(), logs.len());
        assert_eq!(logs[0].date, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        for log in &logs {
            assert!(!log.outfits.is_empty());
            assert!(log.date < today);
            for outfit in &log.outfits {
                assert!(outfit.top.is_top());
                assert!(outfit.bottom.is_bottom());
            }
        }
    }
}

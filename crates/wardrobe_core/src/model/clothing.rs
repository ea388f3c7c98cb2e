//! Clothing item domain model.
//!
//! # Responsibility
//! - Define the catalog entry and its category vocabularies.
//! - Validate category/sub-category pairing on construction and decode.
//!
//! # Invariants
//! - `id` is stable and never reused for another item.
//! - `sub_category` always belongs to `category`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of a clothing item.
///
/// Kept as a string because seed data and persisted blobs use free-form ids.
pub type ItemId = String;

/// Top-level clothing category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClothingCategory {
    Tops,
    Bottoms,
}

const TOP_SUB_CATEGORIES: &[ClothingSubCategory] = &[
    ClothingSubCategory::TShirt,
    ClothingSubCategory::Shirt,
    ClothingSubCategory::Hoodie,
    ClothingSubCategory::Sweatshirt,
    ClothingSubCategory::Sweater,
    ClothingSubCategory::Jersey,
];

const BOTTOM_SUB_CATEGORIES: &[ClothingSubCategory] = &[
    ClothingSubCategory::Shorts,
    ClothingSubCategory::Pants,
    ClothingSubCategory::ThreeFourthPants,
    ClothingSubCategory::Capri,
];

impl ClothingCategory {
    /// All categories in display order.
    pub const ALL: [ClothingCategory; 2] = [Self::Tops, Self::Bottoms];

    /// Sub-categories valid for this category, in display order.
    pub fn sub_categories(self) -> &'static [ClothingSubCategory] {
        match self {
            Self::Tops => TOP_SUB_CATEGORIES,
            Self::Bottoms => BOTTOM_SUB_CATEGORIES,
        }
    }
}

impl Display for ClothingCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tops => write!(f, "Tops"),
            Self::Bottoms => write!(f, "Bottoms"),
        }
    }
}

/// Sub-category of a clothing item. Each variant belongs to exactly one
/// [`ClothingCategory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClothingSubCategory {
    #[serde(rename = "T-Shirt")]
    TShirt,
    Shirt,
    Hoodie,
    Sweatshirt,
    Sweater,
    Jersey,
    Shorts,
    Pants,
    #[serde(rename = "Three-Fourth Pants")]
    ThreeFourthPants,
    Capri,
}

impl ClothingSubCategory {
    /// Returns the category this sub-category belongs to.
    pub fn category(self) -> ClothingCategory {
        match self {
            Self::TShirt
            | Self::Shirt
            | Self::Hoodie
            | Self::Sweatshirt
            | Self::Sweater
            | Self::Jersey => ClothingCategory::Tops,
            Self::Shorts | Self::Pants | Self::ThreeFourthPants | Self::Capri => {
                ClothingCategory::Bottoms
            }
        }
    }

    /// Human-readable label, identical to the persisted wire name.
    pub fn label(self) -> &'static str {
        match self {
            Self::TShirt => "T-Shirt",
            Self::Shirt => "Shirt",
            Self::Hoodie => "Hoodie",
            Self::Sweatshirt => "Sweatshirt",
            Self::Sweater => "Sweater",
            Self::Jersey => "Jersey",
            Self::Shorts => "Shorts",
            Self::Pants => "Pants",
            Self::ThreeFourthPants => "Three-Fourth Pants",
            Self::Capri => "Capri",
        }
    }
}

impl Display for ClothingSubCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Where an item is usually worn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WearType {
    Indoor,
    Outdoor,
}

/// Validation errors for clothing item invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClothingValidationError {
    /// `id` is empty or whitespace only.
    EmptyId,
    /// `sub_category` does not belong to `category`.
    SubCategoryMismatch {
        category: ClothingCategory,
        sub_category: ClothingSubCategory,
    },
}

impl Display for ClothingValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "clothing item id cannot be empty"),
            Self::SubCategoryMismatch {
                category,
                sub_category,
            } => write!(
                f,
                "sub-category `{sub_category}` does not belong to category `{category}`"
            ),
        }
    }
}

impl Error for ClothingValidationError {}

/// Catalog entry for one owned piece of clothing.
///
/// Serialized with camelCase field names to stay compatible with the
/// persisted `clothing_items` blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ClothingItemRecord")]
pub struct ClothingItem {
    pub id: ItemId,
    pub name: String,
    /// Image URI or embedded data URL.
    pub image: String,
    /// Short alt-text style description of the image.
    pub image_hint: String,
    pub category: ClothingCategory,
    pub sub_category: ClothingSubCategory,
    pub wear_type: WearType,
}

impl ClothingItem {
    /// Creates an item with a generated id; `category` is derived from
    /// `sub_category`.
    pub fn new(
        name: impl Into<String>,
        image: impl Into<String>,
        sub_category: ClothingSubCategory,
        wear_type: WearType,
    ) -> Self {
        Self {
            id: generate_item_id(),
            name: name.into(),
            image: image.into(),
            image_hint: String::new(),
            category: sub_category.category(),
            sub_category,
            wear_type,
        }
    }

    /// Sets the image hint, builder style.
    pub fn with_image_hint(mut self, hint: impl Into<String>) -> Self {
        self.image_hint = hint.into();
        self
    }

    /// Checks item invariants.
    ///
    /// # Errors
    /// - `EmptyId` when `id` is blank.
    /// - `SubCategoryMismatch` when `sub_category` belongs to another category.
    pub fn validate(&self) -> Result<(), ClothingValidationError> {
        if self.id.trim().is_empty() {
            return Err(ClothingValidationError::EmptyId);
        }
        if self.sub_category.category() != self.category {
            return Err(ClothingValidationError::SubCategoryMismatch {
                category: self.category,
                sub_category: self.sub_category,
            });
        }
        Ok(())
    }

    pub fn is_top(&self) -> bool {
        self.category == ClothingCategory::Tops
    }

    pub fn is_bottom(&self) -> bool {
        self.category == ClothingCategory::Bottoms
    }
}

/// Generates a fresh clothing item id.
pub fn generate_item_id() -> ItemId {
    format!("item-{}", Uuid::new_v4())
}

// Decode shape; converted through `validate()` so persisted data cannot
// smuggle in a mismatched category pair.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClothingItemRecord {
    id: ItemId,
    name: String,
    image: String,
    #[serde(default)]
    image_hint: String,
    category: ClothingCategory,
    sub_category: ClothingSubCategory,
    wear_type: WearType,
}

impl TryFrom<ClothingItemRecord> for ClothingItem {
    type Error = ClothingValidationError;

    fn try_from(record: ClothingItemRecord) -> Result<Self, Self::Error> {
        let item = Self {
            id: record.id,
            name: record.name,
            image: record.image,
            image_hint: record.image_hint,
            category: record.category,
            sub_category: record.sub_category,
            wear_type: record.wear_type,
        };
        item.validate()?;
        Ok(item)
    }
}

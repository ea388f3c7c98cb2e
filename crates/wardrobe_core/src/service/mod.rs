//! Core use-case services.
//!
//! # Responsibility
//! - Own wardrobe state and its mutation rules.
//! - Derive read-only statistics for presentation layers.

pub mod stats;
pub mod wardrobe_state;

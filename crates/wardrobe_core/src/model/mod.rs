//! Wardrobe domain model.
//!
//! # Responsibility
//! - Define the clothing catalog and outfit history shapes used by core logic.
//! - Own the closed category vocabularies shared by state and storage.
//!
//! # Invariants
//! - Every clothing item and outfit log is identified by a stable string id.
//! - Outfits carry full item snapshots taken at log time.

pub mod clothing;
pub mod outfit;

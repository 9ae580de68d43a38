//! Domain model for the item store.
//!
//! # Invariants
//! - Every persisted item is identified by a store-generated `ItemId`.
//! - Items are never deleted.

pub mod item;

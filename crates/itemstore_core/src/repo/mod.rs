//! Repository layer for items.
//!
//! # Responsibility
//! - Define the item data-access contract.
//! - Isolate SQL composition and row mapping from callers.
//!
//! # Invariants
//! - Every implementation honors the same filter and ordering semantics.
//! - Missing rows are reported as empty results, not errors.

pub mod item_repo;
pub mod memory_repo;
pub mod query;
pub mod row_mapper;

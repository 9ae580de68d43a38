//! Core persistence layer for the item store.
//! Owns the item model, the repository contract and its SQLite binding.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::item::{Item, ItemId, ItemSearchCond, ItemUpdate};
pub use repo::item_repo::{ItemRepository, RepoError, RepoResult, SqliteItemRepository};
pub use repo::memory_repo::MemoryItemRepository;
pub use repo::row_mapper::MappingError;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

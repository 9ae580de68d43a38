//! Map-backed item repository.
//!
//! # Invariants
//! - Ids come from a monotonic sequence starting at 1 and are never reused,
//!   not even after `clear_store`.
//! - Filtering and ordering match `SqliteItemRepository`.

use crate::model::item::{Item, ItemId, ItemSearchCond, ItemUpdate};
use crate::repo::item_repo::{ItemRepository, RepoResult};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct MemoryState {
    last_id: ItemId,
    items: BTreeMap<ItemId, Item>,
}

/// In-process item repository; safe to share across threads.
#[derive(Debug, Default)]
pub struct MemoryItemRepository {
    state: Mutex<MemoryState>,
}

impl MemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every stored item. The id sequence keeps counting.
    pub fn clear_store(&self) {
        self.lock().items.clear();
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        // State is only mutated through single assignments, so a poisoned
        // guard still holds consistent data.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ItemRepository for MemoryItemRepository {
    fn save(&self, mut item: Item) -> RepoResult<Item> {
        let mut state = self.lock();
        state.last_id += 1;
        let id = state.last_id;

        item.id = Some(id);
        state.items.insert(id, item.clone());
        Ok(item)
    }

    fn update(&self, id: ItemId, update: &ItemUpdate) -> RepoResult<()> {
        if let Some(item) = self.lock().items.get_mut(&id) {
            item.apply(update);
        }
        Ok(())
    }

    fn find_by_id(&self, id: ItemId) -> RepoResult<Option<Item>> {
        Ok(self.lock().items.get(&id).cloned())
    }

    fn find_all(&self, cond: &ItemSearchCond) -> RepoResult<Vec<Item>> {
        Ok(self
            .lock()
            .items
            .values()
            .filter(|item| cond.matches(item))
            .cloned()
            .collect())
    }
}

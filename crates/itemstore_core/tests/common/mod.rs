#![allow(dead_code)]

use itemstore_core::db::open_db;
use itemstore_core::{Item, ItemRepository, SqliteItemRepository};
use rusqlite::Connection;
use tempfile::TempDir;

/// File-backed store kept alive for the duration of one test.
pub struct TestStore {
    _dir: TempDir,
    pub conn: Connection,
}

impl TestStore {
    pub fn open() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let conn = open_db(dir.path().join("items.db")).unwrap();
        Self { _dir: dir, conn }
    }

    /// Runs `body` inside a transaction that is always rolled back.
    ///
    /// The transaction is dropped on every exit path, including a panic
    /// raised by a failing assertion inside `body`.
    pub fn scoped<T>(&mut self, body: impl FnOnce(&SqliteItemRepository<'_>) -> T) -> T {
        let tx = self.conn.transaction().unwrap();
        let repo = SqliteItemRepository::try_new(&tx).unwrap();
        body(&repo)
    }

    pub fn count_rows(&self) -> i64 {
        self.conn
            .query_row("SELECT COUNT(*) FROM item;", [], |row| row.get(0))
            .unwrap()
    }
}

/// Saves the three items used by the search scenarios, in order.
pub fn seed_search_items(repo: &impl ItemRepository) -> [Item; 3] {
    [
        repo.save(Item::new("itemA-1", 10000, 10)).unwrap(),
        repo.save(Item::new("itemA-2", 20000, 20)).unwrap(),
        repo.save(Item::new("itemB-1", 30000, 30)).unwrap(),
    ]
}

//! Item repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide save/update/find APIs over the `item` table.
//! - Keep SQL text and key retrieval inside the persistence boundary.
//!
//! # Invariants
//! - `save` assigns the store-generated id exactly once.
//! - Absence is `Ok(None)` or an empty `Vec`, never an error.
//! - Store failures propagate unchanged; nothing is retried here.

use crate::db::migrations::{latest_version, schema_version};
use crate::db::DbError;
use crate::model::item::{Item, ItemId, ItemSearchCond, ItemUpdate};
use crate::repo::query::{build_find_all, insert_sql, select_by_id_sql, update_by_id_sql};
use crate::repo::row_mapper::{ensure_item_table_ready, ItemRowMapper, MappingError};
use log::{debug, error, info};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors from item persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Any failure reported by the store.
    Store(DbError),
    /// The insert succeeded but returned no generated key.
    KeyRetrieval,
    /// Result shape does not fit the item row mapping.
    Mapping(MappingError),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::KeyRetrieval => write!(f, "insert into `item` returned no generated id"),
            Self::Mapping(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "item repository requires schema version {expected_version}, got {actual_version}"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::KeyRetrieval => None,
            Self::Mapping(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Store(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Store(DbError::Sqlite(value))
    }
}

impl From<MappingError> for RepoError {
    fn from(value: MappingError) -> Self {
        Self::Mapping(value)
    }
}

/// Repository interface for item persistence.
pub trait ItemRepository {
    /// Inserts `item` and returns it carrying the generated id.
    fn save(&self, item: Item) -> RepoResult<Item>;
    /// Replaces name, price and quantity of the item with `id`.
    ///
    /// Unknown ids are a silent no-op.
    fn update(&self, id: ItemId, update: &ItemUpdate) -> RepoResult<()>;
    /// Loads one item by id.
    fn find_by_id(&self, id: ItemId) -> RepoResult<Option<Item>>;
    /// Lists items matching `cond` in creation order.
    fn find_all(&self, cond: &ItemSearchCond) -> RepoResult<Vec<Item>>;
}

/// SQLite-backed item repository.
pub struct SqliteItemRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteItemRepository<'conn> {
    /// Creates a repository over a migrated connection.
    ///
    /// Accepts a `Transaction` as well, through deref.
    ///
    /// # Errors
    /// - `RepoError::UninitializedConnection` when migrations have not run.
    /// - `RepoError::Mapping` when the `item` table does not fit the mapping.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version = schema_version(conn)?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        ensure_item_table_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ItemRepository for SqliteItemRepository<'_> {
    fn save(&self, mut item: Item) -> RepoResult<Item> {
        let key: Option<ItemId> = self
            .conn
            .query_row(
                &insert_sql(),
                params![item.item_name.as_str(), item.price, item.quantity],
                |row| row.get(0),
            )
            .optional()
            .map_err(|err| {
                error!("event=item_save module=repo status=error error={err}");
                err
            })?;

        let Some(id) = key else {
            error!("event=item_save module=repo status=error error_code=key_retrieval_failed");
            return Err(RepoError::KeyRetrieval);
        };

        item.id = Some(id);
        info!("event=item_save module=repo status=ok id={id}");
        Ok(item)
    }

    fn update(&self, id: ItemId, update: &ItemUpdate) -> RepoResult<()> {
        let changed = self.conn.execute(
            &update_by_id_sql(),
            params![update.item_name.as_str(), update.price, update.quantity, id],
        )?;

        info!("event=item_update module=repo status=ok id={id} changed={changed}");
        Ok(())
    }

    fn find_by_id(&self, id: ItemId) -> RepoResult<Option<Item>> {
        let mut stmt = self.conn.prepare(&select_by_id_sql())?;
        let mapper = ItemRowMapper::bind(&stmt)?;

        let item = stmt
            .query_row([id], |row| mapper.map_row(row))
            .optional()?;
        Ok(item)
    }

    fn find_all(&self, cond: &ItemSearchCond) -> RepoResult<Vec<Item>> {
        let query = build_find_all(cond);
        debug!(
            "event=item_find_all module=repo status=start sql=\"{}\"",
            query.sql
        );

        let mut stmt = self.conn.prepare(&query.sql)?;
        let mapper = ItemRowMapper::bind(&stmt)?;

        let mut rows = stmt.query(params_from_iter(query.params))?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(mapper.map_row(row)?);
        }

        debug!(
            "event=item_find_all module=repo status=ok count={}",
            items.len()
        );
        Ok(items)
    }
}

//! Static field-to-column mapping for `item` rows.
//!
//! # Responsibility
//! - Declare which column feeds which `Item` field.
//! - Verify a statement's result shape, or the live `item` table, against
//!   that declaration before any row is read.
//!
//! # Invariants
//! - Column lookup happens once per bound statement, never per row.
//! - A missing column is a configuration error (`MappingError`), not a
//!   data error.

use rusqlite::{Connection, Row, Statement};
use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::model::item::Item;
use crate::repo::item_repo::RepoResult;

/// Table backing the item repository.
pub const ITEM_TABLE: &str = "item";

/// `Item` field bound to one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemField {
    Id,
    ItemName,
    Price,
    Quantity,
}

/// One entry of the field-to-column table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnBinding {
    pub field: ItemField,
    pub column: &'static str,
}

/// Field-to-column table; order matches the select list used by queries.
pub const ITEM_COLUMNS: [ColumnBinding; 4] = [
    ColumnBinding {
        field: ItemField::Id,
        column: "id",
    },
    ColumnBinding {
        field: ItemField::ItemName,
        column: "item_name",
    },
    ColumnBinding {
        field: ItemField::Price,
        column: "price",
    },
    ColumnBinding {
        field: ItemField::Quantity,
        column: "quantity",
    },
];

/// Returns the column mapped to `field`.
pub const fn column_for(field: ItemField) -> &'static str {
    match field {
        ItemField::Id => ITEM_COLUMNS[0].column,
        ItemField::ItemName => ITEM_COLUMNS[1].column,
        ItemField::Price => ITEM_COLUMNS[2].column,
        ItemField::Quantity => ITEM_COLUMNS[3].column,
    }
}

/// Comma-separated select list built from [`ITEM_COLUMNS`].
pub fn select_list() -> String {
    ITEM_COLUMNS
        .iter()
        .map(|binding| binding.column)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A row shape does not fit the declared mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// The backing table does not exist.
    MissingTable(&'static str),
    /// A mapped column is absent from the table or the statement result.
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for MappingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTable(table) => {
                write!(f, "item mapping requires table `{table}`")
            }
            Self::MissingColumn { table, column } => write!(
                f,
                "item mapping requires column `{column}` in `{table}`"
            ),
        }
    }
}

impl Error for MappingError {}

/// Row mapper bound to the column positions of one prepared statement.
#[derive(Debug, Clone, Copy)]
pub struct ItemRowMapper {
    id: usize,
    item_name: usize,
    price: usize,
    quantity: usize,
}

impl ItemRowMapper {
    /// Resolves every mapped column in the statement's result shape.
    ///
    /// # Errors
    /// - `MappingError::MissingColumn` for the first mapped column the
    ///   statement does not return.
    pub fn bind(stmt: &Statement<'_>) -> Result<Self, MappingError> {
        let index_of = |field: ItemField| {
            let column = column_for(field);
            stmt.column_index(column)
                .map_err(|_| MappingError::MissingColumn {
                    table: ITEM_TABLE,
                    column,
                })
        };

        Ok(Self {
            id: index_of(ItemField::Id)?,
            item_name: index_of(ItemField::ItemName)?,
            price: index_of(ItemField::Price)?,
            quantity: index_of(ItemField::Quantity)?,
        })
    }

    /// Converts one result row into an `Item`.
    pub fn map_row(&self, row: &Row<'_>) -> rusqlite::Result<Item> {
        Ok(Item {
            id: Some(row.get(self.id)?),
            item_name: row.get(self.item_name)?,
            price: row.get(self.price)?,
            quantity: row.get(self.quantity)?,
        })
    }
}

/// Checks that the live `item` table carries every mapped column.
///
/// # Errors
/// - `RepoError::Mapping` when the table or one of its columns is missing.
/// - `RepoError::Store` when the schema cannot be inspected.
pub fn ensure_item_table_ready(conn: &Connection) -> RepoResult<()> {
    if !table_exists(conn, ITEM_TABLE)? {
        return Err(MappingError::MissingTable(ITEM_TABLE).into());
    }

    let columns = table_columns(conn, ITEM_TABLE)?;
    for binding in ITEM_COLUMNS {
        if !columns.iter().any(|name| name == binding.column) {
            return Err(MappingError::MissingColumn {
                table: ITEM_TABLE,
                column: binding.column,
            }
            .into());
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> rusqlite::Result<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_columns(conn: &Connection, table: &str) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(names)
}

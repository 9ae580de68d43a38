//! SQL composition for item lookups.
//!
//! # Responsibility
//! - Turn an `ItemSearchCond` into one parameterized `SELECT`.
//! - Keep predicate order and bind order in lockstep.
//!
//! # Invariants
//! - No `WHERE` clause is emitted when no filter is active.
//! - Active predicates are joined with `AND`.
//! - Results are always ordered by `id ASC`, i.e. creation order.
//! - Name matching is a case-sensitive substring test (`instr`), so `%` and
//!   `_` in user input carry no wildcard meaning.

use rusqlite::types::Value;

use crate::model::item::ItemSearchCond;
use crate::repo::row_mapper::{column_for, select_list, ItemField, ITEM_TABLE};

/// Parameterized SQL plus positional bind values.
#[derive(Debug, Clone, PartialEq)]
pub struct FindAllQuery {
    pub sql: String,
    pub params: Vec<Value>,
}

/// Unconditional select over every mapped column.
pub fn select_all_sql() -> String {
    format!("SELECT {} FROM {ITEM_TABLE}", select_list())
}

/// Point lookup by identifier; binds `?1 = id`.
pub fn select_by_id_sql() -> String {
    format!(
        "{} WHERE {} = ?1",
        select_all_sql(),
        column_for(ItemField::Id)
    )
}

/// Insert of every mutable column; binds `?1..?3` in field order and
/// returns the generated id.
pub fn insert_sql() -> String {
    format!(
        "INSERT INTO {ITEM_TABLE} ({}, {}, {}) VALUES (?1, ?2, ?3) RETURNING {}",
        column_for(ItemField::ItemName),
        column_for(ItemField::Price),
        column_for(ItemField::Quantity),
        column_for(ItemField::Id)
    )
}

/// Update of every mutable column; binds `?1..?3` in field order, `?4 = id`.
pub fn update_by_id_sql() -> String {
    format!(
        "UPDATE {ITEM_TABLE} SET {} = ?1, {} = ?2, {} = ?3 WHERE {} = ?4",
        column_for(ItemField::ItemName),
        column_for(ItemField::Price),
        column_for(ItemField::Quantity),
        column_for(ItemField::Id)
    )
}

/// Builds the find-all query for `cond`.
pub fn build_find_all(cond: &ItemSearchCond) -> FindAllQuery {
    let mut predicates: Vec<String> = Vec::new();
    let mut params: Vec<Value> = Vec::new();

    if let Some(name) = cond.name_filter() {
        params.push(Value::Text(name.to_string()));
        predicates.push(format!(
            "instr({}, ?{}) > 0",
            column_for(ItemField::ItemName),
            params.len()
        ));
    }

    if let Some(max_price) = cond.max_price {
        params.push(Value::Integer(max_price));
        predicates.push(format!(
            "{} <= ?{}",
            column_for(ItemField::Price),
            params.len()
        ));
    }

    let mut sql = select_all_sql();
    if !predicates.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&predicates.join(" AND "));
    }
    sql.push_str(&format!(" ORDER BY {} ASC", column_for(ItemField::Id)));

    FindAllQuery { sql, params }
}

#[cfg(test)]
mod tests {
    use super::{build_find_all, insert_sql, select_by_id_sql, update_by_id_sql};
    use crate::model::item::ItemSearchCond;
    use rusqlite::types::Value;

    #[test]
    fn no_filters_emit_no_where_clause() {
        let query = build_find_all(&ItemSearchCond::all());
        assert_eq!(
            query.sql,
            "SELECT id, item_name, price, quantity FROM item ORDER BY id ASC"
        );
        assert!(query.params.is_empty());
    }

    #[test]
    fn blank_name_is_dropped() {
        let query = build_find_all(&ItemSearchCond::all().with_item_name("   "));
        assert!(!query.sql.contains("WHERE"));
        assert!(query.params.is_empty());
    }

    #[test]
    fn name_only() {
        let query = build_find_all(&ItemSearchCond::all().with_item_name("itemA"));
        assert_eq!(
            query.sql,
            "SELECT id, item_name, price, quantity FROM item \
             WHERE instr(item_name, ?1) > 0 ORDER BY id ASC"
        );
        assert_eq!(query.params, vec![Value::Text("itemA".to_string())]);
    }

    #[test]
    fn price_only_keeps_zero_bound() {
        let query = build_find_all(&ItemSearchCond::all().with_max_price(0));
        assert_eq!(
            query.sql,
            "SELECT id, item_name, price, quantity FROM item WHERE price <= ?1 ORDER BY id ASC"
        );
        assert_eq!(query.params, vec![Value::Integer(0)]);
    }

    #[test]
    fn both_filters_are_and_combined_in_bind_order() {
        let cond = ItemSearchCond::new(Some("itemA".to_string()), Some(10000));
        let query = build_find_all(&cond);
        assert!(query
            .sql
            .ends_with("WHERE instr(item_name, ?1) > 0 AND price <= ?2 ORDER BY id ASC"));
        assert_eq!(
            query.params,
            vec![Value::Text("itemA".to_string()), Value::Integer(10000)]
        );
    }

    #[test]
    fn point_lookup_binds_id() {
        assert_eq!(
            select_by_id_sql(),
            "SELECT id, item_name, price, quantity FROM item WHERE id = ?1"
        );
    }

    #[test]
    fn write_statements_use_mapped_columns() {
        assert_eq!(
            insert_sql(),
            "INSERT INTO item (item_name, price, quantity) VALUES (?1, ?2, ?3) RETURNING id"
        );
        assert_eq!(
            update_by_id_sql(),
            "UPDATE item SET item_name = ?1, price = ?2, quantity = ?3 WHERE id = ?4"
        );
    }
}

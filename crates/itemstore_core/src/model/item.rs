//! Item domain model and its transient query/update carriers.
//!
//! # Responsibility
//! - Define the persisted `Item` record.
//! - Define `ItemSearchCond` and `ItemUpdate`, which are never persisted.
//!
//! # Invariants
//! - `id` is `None` until the store assigns one on save, and never changes
//!   afterwards.
//! - A blank name filter means "no name filter".
//! - `max_price = None` means "no price constraint"; `Some(0)` is a real bound.

use serde::{Deserialize, Serialize};

/// Store-generated item identifier.
pub type ItemId = i64;

/// Canonical item record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Assigned by the store on first save.
    pub id: Option<ItemId>,
    pub item_name: String,
    /// Non-negative by convention; not enforced.
    pub price: i64,
    pub quantity: i64,
}

impl Item {
    /// Creates an unsaved item without identifier.
    pub fn new(item_name: impl Into<String>, price: i64, quantity: i64) -> Self {
        Self {
            id: None,
            item_name: item_name.into(),
            price,
            quantity,
        }
    }

    /// Overwrites every mutable field with the values from `update`.
    ///
    /// The identifier is left untouched.
    pub fn apply(&mut self, update: &ItemUpdate) {
        self.item_name = update.item_name.clone();
        self.price = update.price;
        self.quantity = update.quantity;
    }
}

/// Optional filters for multi-row item search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSearchCond {
    /// Substring filter on `item_name`. Blank values are ignored.
    pub item_name: Option<String>,
    /// Inclusive upper bound on `price`.
    pub max_price: Option<i64>,
}

impl ItemSearchCond {
    pub fn new(item_name: Option<String>, max_price: Option<i64>) -> Self {
        Self {
            item_name,
            max_price,
        }
    }

    /// Condition with no active filter; matches every item.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_item_name(mut self, item_name: impl Into<String>) -> Self {
        self.item_name = Some(item_name.into());
        self
    }

    pub fn with_max_price(mut self, max_price: i64) -> Self {
        self.max_price = Some(max_price);
        self
    }

    /// Returns the active name filter.
    ///
    /// `None`, empty and whitespace-only values all map to `None`.
    pub fn name_filter(&self) -> Option<&str> {
        self.item_name
            .as_deref()
            .filter(|value| !value.trim().is_empty())
    }

    /// Returns whether `item` satisfies every active filter.
    ///
    /// Name matching is a case-sensitive substring test, identical to the
    /// SQL predicate built for the SQLite repository.
    pub fn matches(&self, item: &Item) -> bool {
        if let Some(name) = self.name_filter() {
            if !item.item_name.contains(name) {
                return false;
            }
        }
        if let Some(max_price) = self.max_price {
            if item.price > max_price {
                return false;
            }
        }
        true
    }
}

/// Replacement values for the mutable fields of one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemUpdate {
    pub item_name: String,
    pub price: i64,
    pub quantity: i64,
}

impl ItemUpdate {
    pub fn new(item_name: impl Into<String>, price: i64, quantity: i64) -> Self {
        Self {
            item_name: item_name.into(),
            price,
            quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Item, ItemSearchCond, ItemUpdate};

    #[test]
    fn blank_name_filter_is_treated_as_absent() {
        assert_eq!(ItemSearchCond::all().name_filter(), None);
        assert_eq!(ItemSearchCond::all().with_item_name("").name_filter(), None);
        assert_eq!(
            ItemSearchCond::all().with_item_name(" \t\n").name_filter(),
            None
        );
        assert_eq!(
            ItemSearchCond::all().with_item_name(" itemA").name_filter(),
            Some(" itemA")
        );
    }

    #[test]
    fn zero_max_price_is_a_real_bound() {
        let cond = ItemSearchCond::all().with_max_price(0);
        assert!(cond.matches(&Item::new("free", 0, 1)));
        assert!(!cond.matches(&Item::new("cheap", 1, 1)));
    }

    #[test]
    fn name_match_is_case_sensitive_substring() {
        let cond = ItemSearchCond::all().with_item_name("temA");
        assert!(cond.matches(&Item::new("itemA-1", 10, 1)));
        assert!(!cond.matches(&Item::new("ITEMA-1", 10, 1)));
        assert!(!cond.matches(&Item::new("itemB-1", 10, 1)));
    }

    #[test]
    fn apply_keeps_identifier() {
        let mut item = Item::new("before", 1, 1);
        item.id = Some(7);
        item.apply(&ItemUpdate::new("after", 2, 3));

        assert_eq!(item.id, Some(7));
        assert_eq!(item.item_name, "after");
        assert_eq!(item.price, 2);
        assert_eq!(item.quantity, 3);
    }
}

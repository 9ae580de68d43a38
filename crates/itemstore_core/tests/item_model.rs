use itemstore_core::{Item, ItemSearchCond, ItemUpdate};
use serde_json::json;

#[test]
fn new_item_has_no_identifier() {
    let item = Item::new("itemA", 10000, 10);
    assert_eq!(item.id, None);
}

#[test]
fn equality_includes_identifier() {
    let mut left = Item::new("itemA", 10000, 10);
    let mut right = left.clone();
    assert_eq!(left, right);

    left.id = Some(1);
    right.id = Some(2);
    assert_ne!(left, right);
}

#[test]
fn serialized_shapes_use_camel_case_field_names() {
    let mut item = Item::new("itemA", 10000, 10);
    item.id = Some(3);
    assert_eq!(
        serde_json::to_value(&item).unwrap(),
        json!({ "id": 3, "itemName": "itemA", "price": 10000, "quantity": 10 })
    );

    let cond: ItemSearchCond =
        serde_json::from_value(json!({ "itemName": "itemA", "maxPrice": null })).unwrap();
    assert_eq!(cond, ItemSearchCond::all().with_item_name("itemA"));

    let update: ItemUpdate =
        serde_json::from_value(json!({ "itemName": "x", "price": 1, "quantity": 2 })).unwrap();
    assert_eq!(update, ItemUpdate::new("x", 1, 2));
}

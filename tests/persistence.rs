use std::collections::BTreeMap;
use std::fs;

use cloudeats::modules::cart;
use cloudeats::modules::order::service::{list_orders, place_order};
use cloudeats::types::{Context, ToContext};
use cloudeats::utils::config::{Config, StoreConfig};

fn open(path: &std::path::Path) -> Context {
    Config {
        store: StoreConfig {
            path: path.to_path_buf(),
        },
    }
    .to_context()
    .unwrap()
}

#[test]
fn orders_survive_reopening_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cloudeats.json");

    let mut ctx = open(&path);
    cart::service::add_meal(&mut ctx, "m1").unwrap();
    place_order(&mut ctx).unwrap();
    drop(ctx);

    let ctx = open(&path);
    let orders = list_orders(&ctx).unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].id, "ORD-001");
}

#[test]
fn store_file_uses_the_documented_keys_and_status_labels() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cloudeats.json");

    let mut ctx = open(&path);
    cart::service::add_meal(&mut ctx, "m1").unwrap();
    place_order(&mut ctx).unwrap();
    drop(ctx);

    let raw = fs::read_to_string(&path).unwrap();
    let entries: BTreeMap<String, String> = serde_json::from_str(&raw).unwrap();
    assert!(entries.contains_key("menu"));
    assert!(entries.contains_key("cart"));
    assert!(entries.contains_key("orders"));
    assert!(entries["orders"].contains("Pending restaurant"));

    // Prices are stored as JSON numbers, as the browser app wrote them.
    let menu: serde_json::Value = serde_json::from_str(&entries["menu"]).unwrap();
    assert!(menu[0]["price"].is_number());
}

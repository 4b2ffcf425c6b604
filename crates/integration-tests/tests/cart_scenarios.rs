//! End-to-end cart flows across the pages that share one cart context.
//!
//! Run with: cargo test -p biobaum-integration-tests --test cart_scenarios

#![allow(clippy::unwrap_used)]

use std::cell::RefCell;
use std::rc::Rc;

use biobaum_cart::{
    CartContext, CartEvent, CartStore, CatalogError, CheckoutError, DisplayMetadata, OrderOutcome,
    complete_order,
};
use biobaum_core::{CurrencyCode, ItemId, OrderId};
use biobaum_integration_tests::{TestStorage, catalog_tree};
use rust_decimal::Decimal;

fn eur(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

// ============================================================================
// Cart operations
// ============================================================================

#[test]
fn test_add_set_remove_scenario() {
    let storage = TestStorage::new();
    let ctx = storage.load();
    let tree = ItemId::new("tree-1");

    ctx.update(|s| s.add_item(tree.clone(), eur(2_500), 2, DisplayMetadata::default()))
        .unwrap();
    assert_eq!(ctx.read(CartStore::cart_total), eur(5_000));

    ctx.update(|s| s.add_item(tree.clone(), eur(2_500), 1, DisplayMetadata::default()))
        .unwrap();
    assert_eq!(ctx.read(|s| s.quantity(&tree)), 3);
    assert_eq!(ctx.read(CartStore::cart_total), eur(7_500));

    ctx.update(|s| s.set_quantity(&tree, 1)).unwrap();
    assert_eq!(ctx.read(CartStore::cart_total), eur(2_500));

    ctx.update(|s| s.remove_item(&tree));
    assert!(ctx.read(CartStore::list_entries).is_empty());
    assert_eq!(ctx.read(CartStore::cart_total), Decimal::ZERO);

    // The cleared state was persisted too.
    assert!(storage.load().read(CartStore::is_empty));
}

#[test]
fn test_observers_see_every_change_in_order() {
    let ctx = CartContext::new(CartStore::new(), CurrencyCode::EUR);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    ctx.update(|s| {
        s.subscribe(move |event: &CartEvent, _state: &biobaum_cart::CartState| {
            sink.borrow_mut().push(event.clone());
        });
    });

    let apple = catalog_tree("apple", "Apple tree", "25.00");
    ctx.update(|s| s.add_catalog_item(&apple, 1)).unwrap();
    ctx.update(|s| s.set_quantity(&apple.id, 3)).unwrap();
    ctx.update(|s| s.remove_item(&apple.id));
    ctx.update(CartStore::clear);

    assert_eq!(
        *seen.borrow(),
        vec![
            CartEvent::ItemAdded {
                item_id: apple.id.clone(),
                quantity: 1,
            },
            CartEvent::QuantityChanged {
                item_id: apple.id.clone(),
                quantity: 3,
            },
            CartEvent::ItemRemoved {
                item_id: apple.id.clone(),
            },
            CartEvent::Cleared,
        ]
    );
}

// ============================================================================
// Catalog to checkout
// ============================================================================

#[test]
fn test_catalog_to_confirmed_order() {
    let storage = TestStorage::new();
    let catalog_page = storage.load();
    let checkout_page = catalog_page.clone();

    let apple = catalog_tree("apple", "Apple tree", "25.00");
    let oak = catalog_tree("oak", "Oak", "49.99");
    catalog_page.update(|s| s.add_catalog_item(&apple, 2)).unwrap();
    catalog_page.update(|s| s.add_catalog_item(&oak, 1)).unwrap();

    let summary = checkout_page.checkout_summary();
    assert_eq!(summary.lines.len(), 2);
    assert_eq!(summary.lines.first().unwrap().price, "€25.00");
    assert_eq!(summary.lines.first().unwrap().line_price, "€50.00");
    assert_eq!(summary.item_count, 3);
    assert_eq!(summary.subtotal, "€99.99");

    let receipt = checkout_page
        .update(|s| {
            complete_order(
                s,
                OrderOutcome::Confirmed {
                    order_id: OrderId::new("order-42"),
                },
            )
        })
        .unwrap();
    assert_eq!(receipt.total, eur(9_999));
    assert_eq!(receipt.entries.len(), 2);

    assert!(catalog_page.read(CartStore::is_empty));
    assert!(storage.load().read(CartStore::is_empty));
}

#[test]
fn test_failed_order_keeps_cart_for_retry() {
    let storage = TestStorage::new();
    let ctx = storage.load();
    ctx.update(|s| s.add_catalog_item(&catalog_tree("birch", "Birch", "12.50"), 4))
        .unwrap();

    let err = ctx
        .update(|s| {
            complete_order(
                s,
                OrderOutcome::Failed {
                    reason: "payment declined".to_string(),
                },
            )
        })
        .unwrap_err();
    assert_eq!(err, CheckoutError::OrderFailed("payment declined".to_string()));

    // Still there after a reload, ready for a retry.
    let reloaded = storage.load();
    assert_eq!(reloaded.read(CartStore::cart_total), eur(5_000));

    reloaded
        .update(|s| {
            complete_order(
                s,
                OrderOutcome::Confirmed {
                    order_id: OrderId::new("order-43"),
                },
            )
        })
        .unwrap();
    assert!(reloaded.read(CartStore::is_empty));
}

#[test]
fn test_unpriced_tree_cannot_be_added() {
    let ctx = CartContext::new(CartStore::new(), CurrencyCode::EUR);
    let walnut: biobaum_cart::CatalogTree =
        serde_json::from_str(r#"{"_id":"walnut","name":"Walnut"}"#).unwrap();

    let err = ctx.update(|s| s.add_catalog_item(&walnut, 1)).unwrap_err();
    assert_eq!(err, CatalogError::MissingPrice(ItemId::new("walnut")));
    assert!(ctx.read(CartStore::is_empty));
}

#[test]
fn test_price_snapshot_survives_catalog_price_change() {
    let ctx = CartContext::new(CartStore::new(), CurrencyCode::EUR);
    ctx.update(|s| s.add_catalog_item(&catalog_tree("cherry", "Cherry", "30.00"), 1))
        .unwrap();

    // The catalog raises the price; the entry keeps what the user saw.
    ctx.update(|s| s.add_catalog_item(&catalog_tree("cherry", "Cherry", "35.00"), 1))
        .unwrap();

    let entry = ctx.read(|s| s.get(&ItemId::new("cherry")).cloned()).unwrap();
    assert_eq!(entry.quantity(), 2);
    assert_eq!(entry.unit_price(), eur(3_000));
    assert_eq!(ctx.read(CartStore::cart_total), eur(6_000));
}

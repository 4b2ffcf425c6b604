//! Cart editing commands.

use std::fmt::Write as _;
use std::path::Path;

use biobaum_cart::{CartContext, CartStore, CatalogTree, DisplayMetadata};
use biobaum_core::{CurrencyCode, ItemId, Price};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument, warn};

use super::CommandError;

/// A catalog response holding one tree or a list of them.
///
/// Trees are kept as raw JSON so one malformed tree cannot sink the rest.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Many(Vec<Value>),
    One(Value),
}

impl CatalogDocument {
    fn into_trees(self) -> Vec<Value> {
        match self {
            Self::Many(trees) => trees,
            Self::One(tree) => vec![tree],
        }
    }
}

/// Add units of an item; a single unit when `quantity` is omitted.
///
/// # Errors
///
/// Returns an error if the quantity or price is rejected by the cart.
#[instrument(skip(ctx, name, image))]
pub fn add(
    ctx: &CartContext,
    id: &str,
    price: Decimal,
    quantity: Option<i64>,
    name: Option<String>,
    image: Option<String>,
) -> Result<(), CommandError> {
    let item_id = ItemId::new(id);
    let metadata = DisplayMetadata {
        name,
        image,
        ..DisplayMetadata::default()
    };
    let new_quantity = ctx.update(|store| match quantity {
        Some(quantity) => store.add_item(item_id.clone(), price, quantity, metadata),
        None => store.add_one(item_id.clone(), price, metadata),
    })?;

    #[allow(clippy::print_stdout)]
    {
        println!("{item_id}: {new_quantity} in cart");
    }
    Ok(())
}

/// Add every tree in a catalog JSON file.
///
/// Trees that are malformed or lack a usable price are skipped with a
/// warning, as the catalog shows them as "N/A" without an add button.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not JSON, or if the
/// cart rejects the quantity.
#[instrument(skip(ctx))]
pub fn add_trees(ctx: &CartContext, file: &Path, quantity: i64) -> Result<(), CommandError> {
    let content = std::fs::read_to_string(file).map_err(|source| CommandError::Io {
        path: file.display().to_string(),
        source,
    })?;
    let trees = serde_json::from_str::<CatalogDocument>(&content)?.into_trees();
    let count = trees.len();
    info!(count, "Loaded catalog trees");

    let mut added = 0usize;
    for raw in trees {
        let tree = match serde_json::from_value::<CatalogTree>(raw) {
            Ok(tree) => tree,
            Err(e) => {
                warn!(error = %e, "Skipping malformed tree");
                continue;
            }
        };
        let item = match tree.to_cart_item() {
            Ok(item) => item,
            Err(e) => {
                warn!(tree = %tree.id, error = %e, "Skipping tree");
                continue;
            }
        };
        let new_quantity = ctx.update(|store| {
            store.add_item(
                item.item_id.clone(),
                item.unit_price,
                quantity,
                item.display_metadata,
            )
        })?;
        added += 1;

        #[allow(clippy::print_stdout)]
        {
            println!(
                "{} ({}): {new_quantity} in cart",
                tree.name.as_deref().unwrap_or_else(|| item.item_id.as_str()),
                Price::new(item.unit_price, ctx.currency())
            );
        }
    }

    info!(added, skipped = count - added, "Catalog trees added");
    Ok(())
}

/// Set an item's quantity; zero or less removes it.
///
/// # Errors
///
/// Returns `ItemNotFound` when setting a positive quantity on an item that is
/// not in the cart.
#[instrument(skip(ctx))]
pub fn set(ctx: &CartContext, id: &str, quantity: i64) -> Result<(), CommandError> {
    let item_id = ItemId::new(id);
    let new_quantity = ctx.update(|store| store.set_quantity(&item_id, quantity))?;

    #[allow(clippy::print_stdout)]
    {
        if new_quantity == 0 {
            println!("{item_id}: removed");
        } else {
            println!("{item_id}: {new_quantity} in cart");
        }
    }
    Ok(())
}

/// Remove an item. Removing an absent item is not an error.
#[instrument(skip(ctx))]
pub fn remove(ctx: &CartContext, id: &str) {
    let item_id = ItemId::new(id);
    let removed = ctx.update(|store| store.remove_item(&item_id));

    #[allow(clippy::print_stdout)]
    {
        match removed {
            Some(entry) => println!("{item_id}: removed ({} units)", entry.quantity()),
            None => println!("{item_id}: not in cart"),
        }
    }
}

/// Print the cart's entries and totals.
pub fn show(ctx: &CartContext) {
    let output = ctx.read(|store| render_cart(store, ctx.currency()));

    #[allow(clippy::print_stdout)]
    {
        print!("{output}");
    }
}

/// Empty the cart.
#[instrument(skip(ctx))]
pub fn clear(ctx: &CartContext) {
    ctx.update(CartStore::clear);

    #[allow(clippy::print_stdout)]
    {
        println!("Cart cleared");
    }
}

/// Render the cart listing in insertion order.
fn render_cart(store: &CartStore, currency: CurrencyCode) -> String {
    if store.is_empty() {
        return "Your cart is empty\n".to_string();
    }

    let mut out = String::new();
    for entry in store.state().entries() {
        let name = entry
            .display_metadata()
            .name
            .as_deref()
            .unwrap_or_else(|| entry.item_id().as_str());
        let _ = writeln!(
            out,
            "{:<24} {:>4} x {:>10} = {:>10}",
            name,
            entry.quantity(),
            Price::new(entry.unit_price(), currency),
            Price::new(CartStore::item_total_price(entry), currency),
        );
    }
    let _ = writeln!(
        out,
        "{} trees, total {}",
        store.total_quantity(),
        Price::new(store.cart_total(), currency)
    );
    out
}

//! BioBaum Cart - the tree-sponsorship shopping cart engine.
//!
//! Catalog pages add trees, the cart page edits quantities, and the checkout
//! page reads totals and clears the cart once an order is confirmed. All of
//! them go through one [`CartStore`], reached via a [`CartContext`].
//!
//! # Modules
//!
//! - [`store`] - Cart operations and derived totals
//! - [`state`] / [`entry`] - The cart's data model
//! - [`events`] - Change notifications delivered to observers
//! - [`persistence`] - Storage backends, document format, best-effort saving
//! - [`context`] - The shared handle passed to collaborators
//! - [`catalog`] - Converting catalog API documents into cart adds
//! - [`checkout`] - Sponsorship summary and order completion
//! - [`config`] - Environment configuration
//!
//! # Example
//!
//! ```rust
//! use biobaum_cart::{CartStore, DisplayMetadata};
//! use biobaum_core::ItemId;
//! use rust_decimal::Decimal;
//!
//! let mut store = CartStore::new();
//! let tree = ItemId::new("tree-1");
//! store.add_item(tree.clone(), Decimal::new(2_500, 2), 2, DisplayMetadata::default())?;
//! assert_eq!(store.cart_total(), Decimal::new(5_000, 2));
//!
//! store.set_quantity(&tree, 0)?;
//! assert!(store.is_empty());
//! # Ok::<(), biobaum_cart::CartError>(())
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod context;
pub mod entry;
pub mod error;
pub mod events;
pub mod persistence;
pub mod state;
pub mod store;

pub use catalog::{CatalogError, CatalogItem, CatalogPrice, CatalogTree};
pub use checkout::{
    CheckoutError, CheckoutLine, CheckoutSummary, OrderOutcome, OrderReceipt, complete_order,
};
pub use config::{CartConfig, ConfigError};
pub use context::CartContext;
pub use entry::{CartEntry, DisplayMetadata};
pub use error::{CartError, PersistenceError};
pub use events::{CartEvent, CartObserver};
pub use state::CartState;
pub use store::CartStore;

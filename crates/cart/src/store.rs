//! The cart store: sole writer of [`CartState`].
//!
//! All operations run to completion synchronously. Validation happens before
//! any state change, so a rejected call leaves the cart exactly as it was.
//! Each successful mutation is followed by a [`CartEvent`] to every observer.

use std::fmt;

use biobaum_core::ItemId;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::entry::{CartEntry, DisplayMetadata};
use crate::error::{CartError, Result};
use crate::events::{CartEvent, CartObserver};
use crate::state::CartState;

/// Shopping cart state container.
#[derive(Default)]
pub struct CartStore {
    state: CartState,
    observers: Vec<Box<dyn CartObserver>>,
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl CartStore {
    /// Create a store with an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store around previously restored state.
    #[must_use]
    pub fn with_state(state: CartState) -> Self {
        Self {
            state,
            observers: Vec::new(),
        }
    }

    /// Register an observer for all subsequent mutations.
    pub fn subscribe(&mut self, observer: impl CartObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Read-only view of the current state.
    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    /// Add `quantity_delta` units of an item.
    ///
    /// A new item is inserted at the end with the given unit price and
    /// metadata. An item already in the cart keeps its original price
    /// snapshot and metadata; only its quantity grows.
    ///
    /// Returns the item's quantity after the add.
    ///
    /// # Errors
    ///
    /// - `InvalidQuantity` if `quantity_delta <= 0` or the resulting quantity
    ///   does not fit in a `u32`
    /// - `InvalidPrice` if a new item has a negative unit price
    /// - `AmountOverflow` if the line or cart total would overflow
    pub fn add_item(
        &mut self,
        item_id: ItemId,
        unit_price: Decimal,
        quantity_delta: i64,
        display_metadata: DisplayMetadata,
    ) -> Result<u32> {
        let delta = positive_quantity(quantity_delta)?;

        let quantity = if let Some(existing) = self.state.get(&item_id) {
            let quantity = existing
                .quantity()
                .checked_add(delta)
                .ok_or(CartError::InvalidQuantity(quantity_delta))?;
            self.ensure_totals_fit(&item_id, existing.unit_price(), quantity)?;
            if let Some(entry) = self.state.get_mut(&item_id) {
                entry.set_quantity(quantity);
            }
            quantity
        } else {
            if unit_price < Decimal::ZERO {
                return Err(CartError::InvalidPrice(unit_price));
            }
            self.ensure_totals_fit(&item_id, unit_price, delta)?;
            self.state.insert(CartEntry::new(
                item_id.clone(),
                delta,
                unit_price,
                display_metadata,
            ));
            delta
        };

        debug!(item_id = %item_id, quantity, "Added to cart");
        self.notify(&CartEvent::ItemAdded { item_id, quantity });
        Ok(quantity)
    }

    /// Add a single unit of an item.
    ///
    /// # Errors
    ///
    /// Same as [`add_item`](Self::add_item).
    pub fn add_one(
        &mut self,
        item_id: ItemId,
        unit_price: Decimal,
        display_metadata: DisplayMetadata,
    ) -> Result<u32> {
        self.add_item(item_id, unit_price, 1, display_metadata)
    }

    /// Remove an item. Removing an absent item is a no-op.
    pub fn remove_item(&mut self, item_id: &ItemId) -> Option<CartEntry> {
        let removed = self.state.remove(item_id)?;
        debug!(item_id = %item_id, "Removed from cart");
        self.notify(&CartEvent::ItemRemoved {
            item_id: item_id.clone(),
        });
        Some(removed)
    }

    /// Set an item's quantity directly.
    ///
    /// A quantity of zero or less removes the item (absent items included,
    /// which is a no-op). Returns the resulting quantity.
    ///
    /// # Errors
    ///
    /// - `ItemNotFound` if the item was never added and `quantity > 0`; only
    ///   [`add_item`](Self::add_item) establishes a unit price
    /// - `InvalidQuantity` if `quantity` does not fit in a `u32`
    /// - `AmountOverflow` if the line or cart total would overflow
    pub fn set_quantity(&mut self, item_id: &ItemId, quantity: i64) -> Result<u32> {
        if quantity <= 0 {
            self.remove_item(item_id);
            return Ok(0);
        }
        let quantity_u32 = positive_quantity(quantity)?;

        let Some(entry) = self.state.get(item_id) else {
            return Err(CartError::ItemNotFound(item_id.clone()));
        };
        if entry.quantity() == quantity_u32 {
            return Ok(quantity_u32);
        }
        self.ensure_totals_fit(item_id, entry.unit_price(), quantity_u32)?;

        if let Some(entry) = self.state.get_mut(item_id) {
            entry.set_quantity(quantity_u32);
        }
        debug!(item_id = %item_id, quantity = quantity_u32, "Cart quantity set");
        self.notify(&CartEvent::QuantityChanged {
            item_id: item_id.clone(),
            quantity: quantity_u32,
        });
        Ok(quantity_u32)
    }

    /// Quantity of an item, or 0 if it is not in the cart.
    #[must_use]
    pub fn quantity(&self, item_id: &ItemId) -> u32 {
        self.state.get(item_id).map_or(0, CartEntry::quantity)
    }

    /// `entry.quantity * entry.unit_price`.
    #[must_use]
    pub fn item_total_price(entry: &CartEntry) -> Decimal {
        entry.total_price()
    }

    /// Sum of item totals; zero for an empty cart.
    #[must_use]
    pub fn cart_total(&self) -> Decimal {
        self.state.total()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        let removed = self.state.item_count();
        self.state.clear();
        info!(removed, "Cart cleared");
        self.notify(&CartEvent::Cleared);
    }

    /// Entries in insertion order, as an owned snapshot.
    #[must_use]
    pub fn list_entries(&self) -> Vec<CartEntry> {
        self.state.entries().cloned().collect()
    }

    #[must_use]
    pub fn get(&self, item_id: &ItemId) -> Option<&CartEntry> {
        self.state.get(item_id)
    }

    /// Number of distinct items.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.state.item_count()
    }

    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.state.total_quantity()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Check that giving `item_id` the quantity `quantity` keeps both its line
    /// total and the cart total representable.
    fn ensure_totals_fit(
        &self,
        item_id: &ItemId,
        unit_price: Decimal,
        quantity: u32,
    ) -> Result<()> {
        let overflow = || CartError::AmountOverflow(item_id.clone());

        let line = unit_price
            .checked_mul(Decimal::from(quantity))
            .ok_or_else(overflow)?;
        self.state
            .entries()
            .filter(|e| e.item_id() != item_id)
            .try_fold(line, |acc, e| acc.checked_add(e.total_price()))
            .ok_or_else(overflow)?;
        Ok(())
    }

    fn notify(&mut self, event: &CartEvent) {
        for observer in &mut self.observers {
            observer.on_change(event, &self.state);
        }
    }
}

/// Convert a caller-supplied quantity to a positive `u32`.
fn positive_quantity(quantity: i64) -> Result<u32> {
    u32::try_from(quantity)
        .ok()
        .filter(|q| *q > 0)
        .ok_or(CartError::InvalidQuantity(quantity))
}

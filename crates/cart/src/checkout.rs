//! Checkout: the sponsorship summary and order completion.
//!
//! The checkout page reads a [`CheckoutSummary`] snapshot while the order is
//! submitted to the remote API. The cart is only cleared once that API has
//! confirmed the order; a failed or pending order leaves it untouched.

use biobaum_core::{CurrencyCode, ItemId, OrderId, Price};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{info, warn};

use crate::entry::CartEntry;
use crate::store::CartStore;

/// Checkout errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    #[error("Order failed: {0}")]
    OrderFailed(String),
}

/// One line of the sponsorship summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutLine {
    pub item_id: ItemId,
    pub name: Option<String>,
    pub image: Option<String>,
    pub quantity: u32,
    /// Unit price, e.g. "€25.00" (shown as "each")
    pub price: String,
    /// `quantity * price`
    pub line_price: String,
}

impl CheckoutLine {
    fn from_entry(entry: &CartEntry, currency: CurrencyCode) -> Self {
        let metadata = entry.display_metadata();
        Self {
            item_id: entry.item_id().clone(),
            name: metadata.name.clone(),
            image: metadata.image.clone(),
            quantity: entry.quantity(),
            price: entry.unit_price_in(currency).display(),
            line_price: Price::new(entry.total_price(), currency).display(),
        }
    }
}

/// Display snapshot of the cart for the checkout page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSummary {
    pub lines: Vec<CheckoutLine>,
    pub subtotal: String,
    /// Total units across all lines
    pub item_count: u64,
    /// Unformatted subtotal, for submitting the order
    pub total: Decimal,
}

impl CheckoutSummary {
    /// An empty summary.
    #[must_use]
    pub fn empty(currency: CurrencyCode) -> Self {
        Self {
            lines: Vec::new(),
            subtotal: Price::zero(currency).display(),
            item_count: 0,
            total: Decimal::ZERO,
        }
    }

    /// Snapshot the store's entries.
    #[must_use]
    pub fn from_store(store: &CartStore, currency: CurrencyCode) -> Self {
        let total = store.cart_total();
        Self {
            lines: store
                .state()
                .entries()
                .map(|entry| CheckoutLine::from_entry(entry, currency))
                .collect(),
            subtotal: Price::new(total, currency).display(),
            item_count: store.total_quantity(),
            total,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Result reported by the remote order API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderOutcome {
    Confirmed { order_id: OrderId },
    Failed { reason: String },
}

/// What was ordered, kept for the success page after the cart is cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderReceipt {
    pub order_id: OrderId,
    pub entries: Vec<CartEntry>,
    pub total: Decimal,
}

/// Apply the order API's outcome to the cart.
///
/// A confirmed order clears the cart and returns a receipt of what was in it.
///
/// # Errors
///
/// - `EmptyCart` if there is nothing to order
/// - `OrderFailed` if the API reported a failure; the cart is kept so the
///   user can retry
pub fn complete_order(
    store: &mut CartStore,
    outcome: OrderOutcome,
) -> Result<OrderReceipt, CheckoutError> {
    if store.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    match outcome {
        OrderOutcome::Confirmed { order_id } => {
            let receipt = OrderReceipt {
                order_id,
                entries: store.list_entries(),
                total: store.cart_total(),
            };
            store.clear();
            info!(
                order_id = %receipt.order_id,
                total = %receipt.total,
                "Order confirmed, cart cleared"
            );
            Ok(receipt)
        }
        OrderOutcome::Failed { reason } => {
            warn!(%reason, "Order failed, keeping cart");
            Err(CheckoutError::OrderFailed(reason))
        }
    }
}

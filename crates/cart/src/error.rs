//! Cart error types.
//!
//! Validation failures ([`CartError`]) are returned synchronously to the
//! caller so the UI action can show an inline message. Storage failures
//! ([`PersistenceError`]) never reach the caller of a cart operation: the
//! persistence observer logs them and falls back to memory-only operation.

use biobaum_core::ItemId;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::persistence::StorageError;

/// Errors returned by cart store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Quantity delta was non-positive, or the quantity is out of range.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// A positive quantity was set on an item that was never added.
    #[error("Item not in cart: {0}")]
    ItemNotFound(ItemId),

    /// Unit prices must not be negative.
    #[error("Invalid unit price: {0}")]
    InvalidPrice(Decimal),

    /// The line or cart total would exceed the representable decimal range.
    #[error("Amount overflow for item {0}")]
    AmountOverflow(ItemId),
}

/// Errors from reading or writing the persisted cart document.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The key-value storage could not be read or written.
    #[error("Storage unavailable: {0}")]
    Unavailable(#[from] StorageError),

    /// The cart state could not be encoded.
    #[error("Serialization error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The stored document is not a valid cart document.
    #[error("Corrupt cart document: {0}")]
    Corrupt(String),
}

/// Result type alias for cart operations.
pub type Result<T> = std::result::Result<T, CartError>;

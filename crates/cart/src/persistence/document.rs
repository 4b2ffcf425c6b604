//! The persisted cart document.
//!
//! ```json
//! {"entries": [{"itemId": "tree-1", "quantity": 2, "unitPrice": "25.00", "displayMetadata": {"name": "Apple"}}]}
//! ```
//!
//! Entries are stored in insertion order and unit prices as decimal strings,
//! so decoding an encoded state reproduces it exactly.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entry::CartEntry;
use crate::error::PersistenceError;
use crate::state::CartState;

#[derive(Serialize)]
struct CartDocumentRef<'a> {
    entries: Vec<&'a CartEntry>,
}

#[derive(Deserialize)]
struct CartDocument {
    entries: Vec<CartEntry>,
}

/// Encode a cart state as a JSON document.
///
/// # Errors
///
/// Returns `PersistenceError::Serialize` if encoding fails.
pub fn encode(state: &CartState) -> Result<String, PersistenceError> {
    let document = CartDocumentRef {
        entries: state.entries().collect(),
    };
    serde_json::to_string(&document).map_err(PersistenceError::Serialize)
}

/// Decode and validate a JSON document.
///
/// # Errors
///
/// Returns `PersistenceError::Corrupt` if the document is not valid JSON, does
/// not match the schema, or breaks a cart invariant (zero quantity, negative
/// price, duplicate item, overflowing total).
pub fn decode(json: &str) -> Result<CartState, PersistenceError> {
    let document: CartDocument =
        serde_json::from_str(json).map_err(|e| PersistenceError::Corrupt(e.to_string()))?;

    let mut state = CartState::new();
    let mut total = Decimal::ZERO;
    for entry in document.entries {
        if entry.quantity() == 0 {
            return Err(corrupt("zero quantity", &entry));
        }
        if entry.unit_price() < Decimal::ZERO {
            return Err(corrupt("negative unit price", &entry));
        }
        total = entry
            .unit_price()
            .checked_mul(Decimal::from(entry.quantity()))
            .and_then(|line| total.checked_add(line))
            .ok_or_else(|| corrupt("total overflows", &entry))?;

        let item_id = entry.item_id().clone();
        if !state.insert(entry) {
            return Err(PersistenceError::Corrupt(format!(
                "duplicate entry for item {item_id}"
            )));
        }
    }
    Ok(state)
}

fn corrupt(reason: &str, entry: &CartEntry) -> PersistenceError {
    PersistenceError::Corrupt(format!("{reason} for item {}", entry.item_id()))
}

//! Change notifications emitted by the cart store.
//!
//! The store does not know how (or whether) its state is stored. After each
//! successful mutation it hands a [`CartEvent`] and the resulting
//! [`CartState`] to every registered [`CartObserver`]; persistence is one
//! such observer.

use biobaum_core::ItemId;

use crate::state::CartState;

/// What changed in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// An item was added or its quantity was increased by an add.
    ItemAdded {
        item_id: ItemId,
        /// Quantity after the add.
        quantity: u32,
    },
    /// An entry was removed (explicitly or by setting its quantity to zero).
    ItemRemoved { item_id: ItemId },
    /// An entry's quantity was set directly.
    QuantityChanged { item_id: ItemId, quantity: u32 },
    /// All entries were removed.
    Cleared,
}

impl CartEvent {
    /// The item the event refers to, if any.
    #[must_use]
    pub const fn item_id(&self) -> Option<&ItemId> {
        match self {
            Self::ItemAdded { item_id, .. }
            | Self::ItemRemoved { item_id }
            | Self::QuantityChanged { item_id, .. } => Some(item_id),
            Self::Cleared => None,
        }
    }
}

/// Receives cart change notifications.
///
/// Called synchronously after the mutation has been applied. Observers see
/// the new state read-only and cannot undo the change.
pub trait CartObserver {
    fn on_change(&mut self, event: &CartEvent, state: &CartState);
}

impl<F> CartObserver for F
where
    F: FnMut(&CartEvent, &CartState),
{
    fn on_change(&mut self, event: &CartEvent, state: &CartState) {
        self(event, state);
    }
}

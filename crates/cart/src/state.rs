//! Cart state: the insertion-ordered entry map plus derived totals.

use biobaum_core::ItemId;
use indexmap::IndexMap;
use rust_decimal::Decimal;

use crate::entry::CartEntry;

/// The contents of a cart.
///
/// Holds one entry per item id, in the order items were first added. Totals
/// are derived on every call and never stored, so they cannot drift from the
/// entries. Only [`CartStore`](crate::CartStore) mutates a `CartState`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartState {
    entries: IndexMap<ItemId, CartEntry>,
}

impl CartState {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterate entries in insertion order.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = &CartEntry> {
        self.entries.values()
    }

    #[must_use]
    pub fn get(&self, item_id: &ItemId) -> Option<&CartEntry> {
        self.entries.get(item_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct items.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.entries.len()
    }

    /// Sum of quantities across all entries.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.entries.values().map(|e| u64::from(e.quantity())).sum()
    }

    /// Grand total: sum of `quantity * unit_price` over all entries.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.entries
            .values()
            .fold(Decimal::ZERO, |acc, e| acc.saturating_add(e.total_price()))
    }

    pub(crate) fn get_mut(&mut self, item_id: &ItemId) -> Option<&mut CartEntry> {
        self.entries.get_mut(item_id)
    }

    /// Insert a new entry at the end. Returns `false` if the id already exists.
    pub(crate) fn insert(&mut self, entry: CartEntry) -> bool {
        if self.entries.contains_key(entry.item_id()) {
            return false;
        }
        self.entries.insert(entry.item_id().clone(), entry);
        true
    }

    /// Remove an entry, keeping the order of the remaining ones.
    pub(crate) fn remove(&mut self, item_id: &ItemId) -> Option<CartEntry> {
        self.entries.shift_remove(item_id)
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

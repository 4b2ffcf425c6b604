//! Best-effort persistence observer.

use tracing::{debug, error, info, warn};

use super::document;
use super::storage::KeyValueStore;
use crate::error::PersistenceError;
use crate::events::{CartEvent, CartObserver};
use crate::state::CartState;

/// Default storage key for the cart document.
pub const DEFAULT_STORAGE_KEY: &str = "cart";

/// Writes the cart document to storage after every change.
///
/// Persistence never interrupts the user: the first storage failure is logged
/// and the persister switches to memory-only mode for the rest of the
/// session. In-memory state is never rolled back.
#[derive(Debug)]
pub struct CartPersister<S> {
    storage: S,
    key: String,
    degraded: bool,
}

impl<S: KeyValueStore> CartPersister<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            degraded: false,
        }
    }

    /// Whether storage failed and writes are no longer attempted.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Read the stored cart.
    ///
    /// Returns `Ok(None)` if nothing is stored under the key.
    ///
    /// # Errors
    ///
    /// - `PersistenceError::Unavailable` if storage cannot be read
    /// - `PersistenceError::Corrupt` if the stored document is invalid
    pub fn load(&self) -> Result<Option<CartState>, PersistenceError> {
        self.storage
            .get(&self.key)?
            .map(|json| document::decode(&json))
            .transpose()
    }

    /// Write `state` to storage.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if encoding or the storage write fails.
    pub fn save(&mut self, state: &CartState) -> Result<(), PersistenceError> {
        let json = document::encode(state)?;
        self.storage.set(&self.key, &json)?;
        Ok(())
    }

    /// Restore the cart at startup.
    ///
    /// Never fails: a missing, corrupt or unreadable document yields an empty
    /// cart. Unreadable storage additionally puts the persister into
    /// memory-only mode.
    pub fn restore(&mut self) -> CartState {
        match self.load() {
            Ok(Some(state)) => {
                info!(
                    key = %self.key,
                    items = state.item_count(),
                    "Cart restored from storage"
                );
                state
            }
            Ok(None) => {
                debug!(key = %self.key, "No stored cart, starting empty");
                CartState::new()
            }
            Err(e @ PersistenceError::Unavailable(_)) => {
                self.degrade(&e);
                CartState::new()
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Discarding stored cart");
                CartState::new()
            }
        }
    }

    fn degrade(&mut self, err: &PersistenceError) {
        error!(
            key = %self.key,
            error = %err,
            "Cart storage unavailable, continuing in memory only"
        );
        self.degraded = true;
    }
}

impl<S: KeyValueStore> CartObserver for CartPersister<S> {
    fn on_change(&mut self, event: &CartEvent, state: &CartState) {
        if self.degraded {
            return;
        }
        match self.save(state) {
            Ok(()) => debug!(key = %self.key, ?event, "Cart persisted"),
            Err(e) => self.degrade(&e),
        }
    }
}

//! Cart context shared with the pages that use the cart.
//!
//! There is no global cart. One `CartContext` is built at startup and a clone
//! is handed to each collaborator (catalog, cart page, checkout). All clones
//! refer to the same store.

use std::cell::RefCell;
use std::rc::Rc;

use biobaum_core::CurrencyCode;

use crate::checkout::CheckoutSummary;
use crate::config::CartConfig;
use crate::persistence::{CartPersister, FileStorage, KeyValueStore};
use crate::store::CartStore;

/// Handle to the application's cart store.
///
/// Single-threaded by construction (`!Send`): every operation runs to
/// completion on the UI thread, so no locking is involved.
///
/// Closures passed to [`read`](Self::read) and [`update`](Self::update) must
/// not call back into the same context.
#[derive(Debug, Clone)]
pub struct CartContext {
    inner: Rc<CartContextInner>,
}

#[derive(Debug)]
struct CartContextInner {
    store: RefCell<CartStore>,
    currency: CurrencyCode,
}

impl CartContext {
    /// Wrap an existing store.
    #[must_use]
    pub fn new(store: CartStore, currency: CurrencyCode) -> Self {
        Self {
            inner: Rc::new(CartContextInner {
                store: RefCell::new(store),
                currency,
            }),
        }
    }

    /// Restore the cart from `storage` and persist every later change to it.
    #[must_use]
    pub fn restore<S>(storage: S, key: &str, currency: CurrencyCode) -> Self
    where
        S: KeyValueStore + 'static,
    {
        let mut persister = CartPersister::new(storage, key);
        let mut store = CartStore::with_state(persister.restore());
        store.subscribe(persister);
        Self::new(store, currency)
    }

    /// Restore from the file storage named in `config`.
    #[must_use]
    pub fn from_config(config: &CartConfig) -> Self {
        Self::restore(
            FileStorage::new(&config.storage_path),
            &config.storage_key,
            config.currency,
        )
    }

    /// Currency used for display.
    #[must_use]
    pub fn currency(&self) -> CurrencyCode {
        self.inner.currency
    }

    /// Run a read-only closure against the store.
    pub fn read<R>(&self, f: impl FnOnce(&CartStore) -> R) -> R {
        f(&*self.inner.store.borrow())
    }

    /// Run a mutating closure against the store.
    pub fn update<R>(&self, f: impl FnOnce(&mut CartStore) -> R) -> R {
        f(&mut *self.inner.store.borrow_mut())
    }

    /// Snapshot for the checkout page in this context's currency.
    #[must_use]
    pub fn checkout_summary(&self) -> CheckoutSummary {
        self.read(|store| CheckoutSummary::from_store(store, self.currency()))
    }
}

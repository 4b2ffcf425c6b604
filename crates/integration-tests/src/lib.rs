//! Integration tests for the BioBaum cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p biobaum-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - Catalog, cart page and checkout sharing one context
//! - `cart_persistence` - Restoring the cart across restarts, storage failures
//!
//! The helpers below build contexts over throwaway file storage so each test
//! can simulate page reloads.

use std::path::{Path, PathBuf};

use biobaum_cart::{CartConfig, CartContext, CatalogTree};
use tempfile::TempDir;

/// A storage directory that lives as long as the test.
pub struct TestStorage {
    dir: TempDir,
}

impl TestStorage {
    /// Create an empty storage directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    /// Path of the storage file.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.dir.path().join("storage.json")
    }

    /// Root of the temporary directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Configuration pointing at this storage.
    #[must_use]
    pub fn config(&self) -> CartConfig {
        CartConfig {
            storage_path: self.path(),
            ..CartConfig::default()
        }
    }

    /// Build a context, as a fresh page load would.
    #[must_use]
    pub fn load(&self) -> CartContext {
        CartContext::from_config(&self.config())
    }
}

impl Default for TestStorage {
    fn default() -> Self {
        Self::new()
    }
}

/// A catalog tree as returned by the tree API.
///
/// # Panics
///
/// Panics if the arguments do not form a valid tree document.
#[must_use]
#[allow(clippy::expect_used)]
pub fn catalog_tree(id: &str, name: &str, price: &str) -> CatalogTree {
    serde_json::from_value(serde_json::json!({
        "_id": id,
        "name": name,
        "image": format!("/img/{id}.webp"),
        "price": { "$numberDecimal": price },
    }))
    .expect("Invalid catalog tree")
}

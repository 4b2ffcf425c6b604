//! Cart persistence.
//!
//! - [`storage`] - key-value string backends (`MemoryStorage`, `FileStorage`)
//! - [`document`] - the JSON cart document and its validation
//! - [`persister`] - the observer that saves after every change and restores
//!   at startup

pub mod document;
pub mod persister;
pub mod storage;

pub use persister::{CartPersister, DEFAULT_STORAGE_KEY};
pub use storage::{FileStorage, KeyValueStore, MemoryStorage, StorageError};

//! BioBaum Core - Shared types library.
//!
//! This crate provides common types used across all BioBaum components:
//! - `cart` - The tree-sponsorship shopping cart engine
//! - `cli` - Command-line front end driving the cart
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and decimal prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

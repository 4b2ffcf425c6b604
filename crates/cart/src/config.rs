//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CART_STORAGE_KEY` - Key the cart document is stored under (default: cart)
//! - `CART_STORAGE_PATH` - File backing the key-value storage
//!   (default: .biobaum/storage.json)
//! - `CART_CURRENCY` - ISO 4217 code used for display (default: EUR)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;

use biobaum_core::CurrencyCode;
use thiserror::Error;

use crate::persistence::DEFAULT_STORAGE_KEY;

const DEFAULT_STORAGE_PATH: &str = ".biobaum/storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Storage key for the cart document
    pub storage_key: String,
    /// Path of the file-backed key-value storage
    pub storage_path: PathBuf,
    /// Currency used when formatting prices
    pub currency: CurrencyCode,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., production, staging)
    pub sentry_environment: Option<String>,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            currency: CurrencyCode::default(),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let storage_key =
            get("CART_STORAGE_KEY").unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());
        let storage_path = get("CART_STORAGE_PATH")
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_PATH), PathBuf::from);
        let currency = match get("CART_CURRENCY") {
            Some(raw) => raw.parse::<CurrencyCode>().map_err(|e| {
                ConfigError::InvalidEnvVar("CART_CURRENCY".to_string(), e.to_string())
            })?,
            None => CurrencyCode::default(),
        };

        Ok(Self {
            storage_key,
            storage_path,
            currency,
            sentry_dsn: get("SENTRY_DSN"),
            sentry_environment: get("SENTRY_ENVIRONMENT"),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CartConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, CartConfig::default());
        assert_eq!(config.storage_key, "cart");
        assert_eq!(config.currency, CurrencyCode::EUR);
    }

    #[test]
    fn test_overrides() {
        let config = CartConfig::from_lookup(lookup(&[
            ("CART_STORAGE_KEY", "biobaum-cart"),
            ("CART_STORAGE_PATH", "/tmp/bb.json"),
            ("CART_CURRENCY", "chf"),
            ("SENTRY_DSN", "https://key@sentry.example/1"),
        ]))
        .unwrap();

        assert_eq!(config.storage_key, "biobaum-cart");
        assert_eq!(config.storage_path, PathBuf::from("/tmp/bb.json"));
        assert_eq!(config.currency, CurrencyCode::CHF);
        assert_eq!(config.sentry_dsn.as_deref(), Some("https://key@sentry.example/1"));
        assert_eq!(config.sentry_environment, None);
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = CartConfig::from_lookup(lookup(&[("CART_STORAGE_KEY", "  ")])).unwrap();
        assert_eq!(config.storage_key, "cart");
    }

    #[test]
    fn test_invalid_currency() {
        let err = CartConfig::from_lookup(lookup(&[("CART_CURRENCY", "DOGE")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref var, _) if var == "CART_CURRENCY"));
    }
}

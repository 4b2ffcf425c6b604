//! Catalog tree conversion.
//!
//! The remote catalog API returns tree documents with the price encoded as a
//! Decimal128 wrapper:
//!
//! ```json
//! {"_id": "65f0a1", "name": "Apple tree", "image": "/img/apple.webp", "price": {"$numberDecimal": "25.00"}}
//! ```
//!
//! Catalog pages turn these into cart adds. An item without a usable price
//! is shown as "N/A" in the catalog and cannot be added to the cart.

use std::str::FromStr;

use biobaum_core::ItemId;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::entry::DisplayMetadata;
use crate::error::CartError;
use crate::store::CartStore;

/// Errors converting or adding a catalog tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Tree {0} has no price")]
    MissingPrice(ItemId),

    #[error("Tree {0} has an invalid price: {1}")]
    InvalidPrice(ItemId, String),

    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Price as returned by the catalog API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CatalogPrice {
    /// `{"$numberDecimal": "25.00"}`
    Decimal128 {
        #[serde(rename = "$numberDecimal")]
        number_decimal: String,
    },
    /// `"25.00"`
    Text(String),
    /// `25` or `25.5`
    Number(serde_json::Number),
    /// Any other shape; never a usable price
    Other(serde_json::Value),
}

impl CatalogPrice {
    fn parse(&self) -> Option<Decimal> {
        let raw = match self {
            Self::Decimal128 { number_decimal } => number_decimal.trim().to_owned(),
            Self::Text(text) => text.trim().to_owned(),
            Self::Number(number) => number.to_string(),
            Self::Other(_) => return None,
        };
        Decimal::from_str(&raw)
            .or_else(|_| Decimal::from_scientific(&raw))
            .ok()
    }

    fn raw(&self) -> String {
        match self {
            Self::Decimal128 { number_decimal } => number_decimal.clone(),
            Self::Text(text) => text.clone(),
            Self::Number(number) => number.to_string(),
            Self::Other(value) => value.to_string(),
        }
    }
}

/// A tree document from the catalog API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogTree {
    #[serde(rename = "_id")]
    pub id: ItemId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub price: Option<CatalogPrice>,
}

/// The arguments a catalog page passes to [`CartStore::add_item`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    pub item_id: ItemId,
    pub unit_price: Decimal,
    pub display_metadata: DisplayMetadata,
}

impl CatalogTree {
    /// Convert to cart item arguments.
    ///
    /// # Errors
    ///
    /// Returns `MissingPrice` or `InvalidPrice` if the tree has no usable price.
    pub fn to_cart_item(&self) -> Result<CatalogItem, CatalogError> {
        let price = self
            .price
            .as_ref()
            .ok_or_else(|| CatalogError::MissingPrice(self.id.clone()))?;
        let unit_price = price
            .parse()
            .filter(|p| *p >= Decimal::ZERO)
            .ok_or_else(|| CatalogError::InvalidPrice(self.id.clone(), price.raw()))?;

        Ok(CatalogItem {
            item_id: self.id.clone(),
            unit_price,
            display_metadata: DisplayMetadata {
                name: self.name.clone(),
                image: self.image.clone(),
                ..DisplayMetadata::default()
            },
        })
    }
}

impl CartStore {
    /// Add a catalog tree with the price snapshot taken from the document.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the tree has no usable price or the add is
    /// rejected by the store.
    pub fn add_catalog_item(
        &mut self,
        tree: &CatalogTree,
        quantity: i64,
    ) -> Result<u32, CatalogError> {
        let item = tree.to_cart_item()?;
        Ok(self.add_item(
            item.item_id,
            item.unit_price,
            quantity,
            item.display_metadata,
        )?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(json: &str) -> CatalogTree {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_number_decimal_price() {
        let tree = parse(
            r#"{"_id":"65f0a1","name":"Apple tree","image":"/img/apple.webp","price":{"$numberDecimal":"25.00"},"age":3}"#,
        );
        let item = tree.to_cart_item().unwrap();
        assert_eq!(item.item_id.as_str(), "65f0a1");
        assert_eq!(item.unit_price, Decimal::new(2_500, 2));
        assert_eq!(item.display_metadata.name.as_deref(), Some("Apple tree"));
        assert_eq!(item.display_metadata.image.as_deref(), Some("/img/apple.webp"));
    }

    #[test]
    fn test_plain_prices() {
        let text = parse(r#"{"_id":"a","price":"19.90"}"#);
        assert_eq!(text.to_cart_item().unwrap().unit_price, Decimal::new(1_990, 2));

        let number = parse(r#"{"_id":"b","price":40}"#);
        assert_eq!(number.to_cart_item().unwrap().unit_price, Decimal::new(40, 0));
    }

    #[test]
    fn test_missing_price() {
        let tree = parse(r#"{"_id":"c","name":"Walnut"}"#);
        assert_eq!(
            tree.to_cart_item().unwrap_err(),
            CatalogError::MissingPrice(ItemId::new("c"))
        );
    }

    #[test]
    fn test_invalid_price() {
        let tree = parse(r#"{"_id":"d","price":{"$numberDecimal":"N/A"}}"#);
        assert!(matches!(
            tree.to_cart_item(),
            Err(CatalogError::InvalidPrice(_, ref raw)) if raw == "N/A"
        ));

        let wrong_shape = parse(r#"{"_id":"f","price":{"$numberDecimal":25}}"#);
        assert!(matches!(
            wrong_shape.to_cart_item(),
            Err(CatalogError::InvalidPrice(_, ref raw)) if raw == r#"{"$numberDecimal":25}"#
        ));
        assert!(matches!(
            parse(r#"{"_id":"g","price":true}"#).to_cart_item(),
            Err(CatalogError::InvalidPrice(_, _))
        ));

        let negative = parse(r#"{"_id":"e","price":"-5"}"#);
        assert!(matches!(
            negative.to_cart_item(),
            Err(CatalogError::InvalidPrice(_, _))
        ));
    }

    #[test]
    fn test_add_catalog_item() {
        let mut store = CartStore::new();
        let tree = parse(
            r#"{"_id":"65f0a1","name":"Apple tree","price":{"$numberDecimal":"25.00"}}"#,
        );

        assert_eq!(store.add_catalog_item(&tree, 2).unwrap(), 2);
        assert_eq!(store.add_catalog_item(&tree, 1).unwrap(), 3);
        assert_eq!(store.cart_total(), Decimal::new(7_500, 2));

        assert_eq!(
            store.add_catalog_item(&tree, 0).unwrap_err(),
            CatalogError::Cart(CartError::InvalidQuantity(0))
        );
    }
}

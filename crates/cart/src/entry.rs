//! Cart line items.

use biobaum_core::{CurrencyCode, ItemId, Price};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Rendering data carried alongside an entry.
///
/// Has no bearing on pricing. Keys other than `name` and `image` are kept
/// as-is so a stored document round-trips without losing data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DisplayMetadata {
    /// Metadata with a display name and an optional image reference.
    #[must_use]
    pub fn named(name: impl Into<String>, image: Option<String>) -> Self {
        Self {
            name: Some(name.into()),
            image,
            extra: Map::new(),
        }
    }
}

/// One line item in the cart.
///
/// The unit price is a snapshot taken when the item was first added, so the
/// cart total stays stable if the catalog price changes later. Fields are
/// read-only outside this crate; quantities change through
/// [`CartStore`](crate::CartStore) operations only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry {
    item_id: ItemId,
    quantity: u32,
    unit_price: Decimal,
    #[serde(default)]
    display_metadata: DisplayMetadata,
}

impl CartEntry {
    pub(crate) const fn new(
        item_id: ItemId,
        quantity: u32,
        unit_price: Decimal,
        display_metadata: DisplayMetadata,
    ) -> Self {
        Self {
            item_id,
            quantity,
            unit_price,
            display_metadata,
        }
    }

    #[must_use]
    pub const fn item_id(&self) -> &ItemId {
        &self.item_id
    }

    /// Units sponsored; always at least 1 for an entry held by a cart.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    #[must_use]
    pub const fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    #[must_use]
    pub const fn display_metadata(&self) -> &DisplayMetadata {
        &self.display_metadata
    }

    /// `quantity * unit_price`.
    ///
    /// The store rejects mutations whose totals would overflow, so for any
    /// entry it holds this is exact. Saturates for hand-built values.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.unit_price.saturating_mul(Decimal::from(self.quantity))
    }

    /// Unit price with currency, for display.
    #[must_use]
    pub const fn unit_price_in(&self, currency_code: CurrencyCode) -> Price {
        Price::new(self.unit_price, currency_code)
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn entry(quantity: u32, cents: i64) -> CartEntry {
        CartEntry::new(
            ItemId::new("tree-1"),
            quantity,
            Decimal::new(cents, 2),
            DisplayMetadata::named("Apple tree", Some("/img/apple.webp".to_string())),
        )
    }

    #[test]
    fn test_total_price() {
        assert_eq!(entry(3, 2_500).total_price(), Decimal::new(7_500, 2));
    }

    #[test]
    fn test_total_price_is_exact_for_cents() {
        // 0.10 * 3 must be exactly 0.30, not 0.30000000000000004
        assert_eq!(entry(3, 10).total_price().to_string(), "0.30");
    }

    #[test]
    fn test_unit_price_in_currency() {
        let price = entry(2, 2_500).unit_price_in(CurrencyCode::EUR);
        assert_eq!(price.amount, Decimal::new(2_500, 2));
        assert_eq!(price.to_string(), "€25.00");
    }

    #[test]
    fn test_serializes_with_camel_case_and_string_price() {
        let json = serde_json::to_value(entry(2, 2_500)).unwrap();
        assert_eq!(json["itemId"], "tree-1");
        assert_eq!(json["quantity"], 2);
        assert_eq!(json["unitPrice"], "25.00");
        assert_eq!(json["displayMetadata"]["name"], "Apple tree");
    }

    #[test]
    fn test_metadata_keeps_unknown_keys() {
        let json = r#"{"name":"Oak","image":"oak.webp","region":"Styria"}"#;
        let meta: DisplayMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(meta.name.as_deref(), Some("Oak"));
        assert_eq!(meta.extra.get("region"), Some(&Value::from("Styria")));

        let back = serde_json::to_value(&meta).unwrap();
        assert_eq!(back["region"], "Styria");
    }

    #[test]
    fn test_missing_metadata_defaults() {
        let json = r#"{"itemId":"tree-2","quantity":1,"unitPrice":"9.90"}"#;
        let entry: CartEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.display_metadata(), &DisplayMetadata::default());
        assert_eq!(entry.unit_price(), Decimal::new(990, 2));
    }
}

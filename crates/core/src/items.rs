//! Priced Items

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Serialize;

use crate::ids::TypedId;

/// Selling channel marker.
#[derive(Debug)]
pub struct Shop;

/// Shop Id
pub type ShopId = TypedId<Shop>;

/// Stock keeping unit identifying a product across all shops.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Sku(String);

impl Sku {
    /// Creates a new SKU.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The SKU as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Sku {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<&str> for Sku {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Sku {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A product's price at one shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricedItem {
    /// Product SKU
    pub sku: Sku,

    /// Shop the price applies to
    pub shop_id: ShopId,

    /// List price in cents; `None` when the product is not priced at this shop.
    pub list_price_cents: Option<u64>,

    /// Minimum order quantity
    pub moq: Option<u32>,

    /// Competitor price in cents
    pub competitor_price_cents: Option<u64>,

    /// Link to the competitor listing
    pub competitor_link: Option<String>,
}

impl PricedItem {
    /// Creates a priced item with no informational fields set.
    pub fn new(sku: impl Into<Sku>, shop_id: ShopId, list_price_cents: Option<u64>) -> Self {
        Self {
            sku: sku.into(),
            shop_id,
            list_price_cents,
            moq: None,
            competitor_price_cents: None,
            competitor_link: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_item_has_no_informational_fields() {
        let item = PricedItem::new("SKU-1", ShopId::from_i64(1), Some(1000));

        assert_eq!(item.sku.as_str(), "SKU-1");
        assert_eq!(item.list_price_cents, Some(1000));
        assert!(item.moq.is_none());
        assert!(item.competitor_price_cents.is_none());
        assert!(item.competitor_link.is_none());
    }
}

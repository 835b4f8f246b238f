//! Pricing Data

use pricebook::items::{ShopId, Sku};

/// Pricing Update Data
///
/// Replaces the editable fields of one product-shop pricing row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingUpdate {
    pub sku: Sku,
    pub shop_id: ShopId,
    pub sell_price_cents: Option<u64>,
    pub moq: Option<u32>,
    pub competitor_price_cents: Option<u64>,
    pub competitor_link: Option<String>,
}

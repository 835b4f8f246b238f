//! Pricing Records

use pricebook::{
    items::{PricedItem, ShopId, Sku},
    vouchers::{DiscountTypeKey, Voucher, VoucherDiscount, VoucherId},
};
use serde::Serialize;

/// Shop Record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShopRecord {
    pub id: ShopId,
    pub code: String,
    pub name: String,
}

/// Product-shop pricing row as stored.
#[derive(Debug, Clone)]
pub(crate) struct PricingRecord {
    pub sku: String,
    pub shop_id: i64,
    pub sell_price: Option<u64>,
    pub moq: Option<u32>,
    pub competitor_price: Option<u64>,
    pub competitor_link: Option<String>,
}

impl From<PricingRecord> for PricedItem {
    fn from(record: PricingRecord) -> Self {
        Self {
            sku: Sku::new(record.sku),
            shop_id: ShopId::from_i64(record.shop_id),
            list_price_cents: record.sell_price,
            moq: record.moq,
            competitor_price_cents: record.competitor_price,
            competitor_link: record.competitor_link,
        }
    }
}

/// Voucher row reduced to the fields the pricing engine reads.
#[derive(Debug, Clone)]
pub(crate) struct OfferRecord {
    pub id: i64,
    pub shop_id: i64,
    pub discount_type: DiscountTypeKey,
    pub discount: u64,
    pub min_spend: u64,
    pub max_discount: Option<u64>,
}

impl From<OfferRecord> for Voucher {
    fn from(record: OfferRecord) -> Self {
        Self {
            id: VoucherId::from_i64(record.id),
            shop_id: ShopId::from_i64(record.shop_id),
            discount: VoucherDiscount::from_raw(record.discount_type, record.discount),
            min_spend_cents: record.min_spend,
            max_discount_cents: record.max_discount,
        }
    }
}

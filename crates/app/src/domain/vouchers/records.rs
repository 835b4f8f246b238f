//! Voucher Records

use jiff::Timestamp;
use pricebook::{
    items::ShopId,
    sheet::UNKNOWN_SHOP,
    vouchers::{Voucher, VoucherDiscount, VoucherId, VoucherSnapshot, VoucherTypeId},
};

/// Label used when a voucher has no category.
pub const UNTYPED_VOUCHER: &str = "Voucher";

/// Voucher Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoucherRecord {
    pub id: VoucherId,
    pub shop_id: ShopId,
    pub shop_name: Option<String>,
    pub voucher_type_id: Option<VoucherTypeId>,
    pub voucher_type_name: Option<String>,
    pub discount: VoucherDiscount,
    pub min_spend_cents: u64,
    pub max_discount_cents: Option<u64>,
    pub created_at: Timestamp,
}

impl VoucherRecord {
    /// Shop name, or a placeholder when the shop is unknown.
    #[must_use]
    pub fn shop_label(&self) -> &str {
        self.shop_name.as_deref().unwrap_or(UNKNOWN_SHOP)
    }

    /// Voucher type name, or a generic label when untyped.
    #[must_use]
    pub fn type_label(&self) -> &str {
        self.voucher_type_name.as_deref().unwrap_or(UNTYPED_VOUCHER)
    }

    /// Text an operator must type to confirm deleting this voucher.
    #[must_use]
    pub fn confirmation_text(&self) -> String {
        format!("{} · {}", self.shop_label(), self.type_label())
    }

    /// The editable fields, for change detection.
    #[must_use]
    pub fn snapshot(&self) -> VoucherSnapshot {
        VoucherSnapshot {
            shop_id: self.shop_id,
            voucher_type_id: self.voucher_type_id,
            discount: self.discount,
            min_spend_cents: self.min_spend_cents,
            max_discount_cents: self.max_discount_cents,
        }
    }

    /// The voucher as pricing input.
    #[must_use]
    pub fn offer(&self) -> Voucher {
        Voucher {
            id: self.id,
            shop_id: self.shop_id,
            discount: self.discount,
            min_spend_cents: self.min_spend_cents,
            max_discount_cents: self.max_discount_cents,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> VoucherRecord {
        VoucherRecord {
            id: VoucherId::from_i64(1),
            shop_id: ShopId::from_i64(1),
            shop_name: Some("Shopee".to_string()),
            voucher_type_id: Some(VoucherTypeId::from_i64(2)),
            voucher_type_name: Some("Shop Voucher".to_string()),
            discount: VoucherDiscount::Fixed(500),
            min_spend_cents: 1000,
            max_discount_cents: None,
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn confirmation_text_joins_shop_and_type() {
        assert_eq!(record().confirmation_text(), "Shopee · Shop Voucher");
    }

    #[test]
    fn confirmation_text_falls_back_to_placeholders() {
        let record = VoucherRecord {
            shop_name: None,
            voucher_type_id: None,
            voucher_type_name: None,
            ..record()
        };

        assert_eq!(record.confirmation_text(), "Unknown shop · Voucher");
    }

    #[test]
    fn offer_keeps_pricing_fields() {
        let offer = record().offer();

        assert_eq!(offer.min_spend_cents, 1000);
        assert_eq!(offer.discount, VoucherDiscount::Fixed(500));
    }
}

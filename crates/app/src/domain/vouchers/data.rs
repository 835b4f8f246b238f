//! Voucher Data

use pricebook::{
    items::ShopId,
    money::{MoneyError, to_basis_points, to_cents},
    vouchers::{DiscountTypeKey, VoucherDiscount, VoucherSnapshot, VoucherTypeId},
};

use crate::domain::vouchers::records::VoucherRecord;

/// Voucher form input in user-facing units.
///
/// `discount` is dollars for fixed vouchers and percent for percentage
/// vouchers; `min_spend` and `max_discount` are always dollars.
#[derive(Debug, Clone, PartialEq)]
pub struct VoucherForm {
    pub shop_id: ShopId,
    pub voucher_type_id: Option<VoucherTypeId>,
    pub discount_type: DiscountTypeKey,
    pub discount: f64,
    pub min_spend: f64,
    pub max_discount: Option<f64>,
}

impl VoucherForm {
    /// Converts the form into storage units.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::InvalidAmount`] for negative or non-finite amounts.
    pub fn normalize(&self) -> Result<VoucherSnapshot, MoneyError> {
        let discount = match self.discount_type {
            DiscountTypeKey::Fixed => VoucherDiscount::Fixed(to_cents(self.discount)?),
            DiscountTypeKey::Percentage => {
                VoucherDiscount::Percentage(to_basis_points(self.discount)?)
            }
        };

        Ok(VoucherSnapshot {
            shop_id: self.shop_id,
            voucher_type_id: self.voucher_type_id,
            discount,
            min_spend_cents: to_cents(self.min_spend)?,
            max_discount_cents: self.max_discount.map(to_cents).transpose()?,
        })
    }
}

/// Result of a voucher update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The submitted values matched the stored voucher; nothing was written.
    Unchanged,

    /// The voucher was updated.
    Updated(VoucherRecord),
}

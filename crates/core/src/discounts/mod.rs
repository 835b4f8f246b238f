//! Discount calculation
//!
//! Turns a single eligible voucher into a discount amount in cents for a
//! priced item. Choosing between vouchers happens in [`crate::pricing`].

use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};

use crate::{
    eligibility::is_eligible,
    items::PricedItem,
    vouchers::{Voucher, VoucherDiscount},
};

/// Basis points in one whole (100%).
pub const BASIS_POINTS_SCALE: u64 = 10_000;

/// `cents * basis_points / 10000`, rounded half away from zero.
///
/// Results that do not fit in `u64` saturate to `u64::MAX`; callers clamp
/// discounts to the list price so a saturated value still resolves correctly.
#[must_use]
pub fn basis_points_of(cents: u64, basis_points: u64) -> u64 {
    let (Some(cents), Some(basis_points), Some(scale)) = (
        Decimal::from_u64(cents),
        Decimal::from_u64(basis_points),
        Decimal::from_u64(BASIS_POINTS_SCALE),
    ) else {
        return u64::MAX;
    };

    cents
        .checked_mul(basis_points)
        .and_then(|product| product.checked_div(scale))
        .map(|amount| amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|amount| amount.to_u64())
        .unwrap_or(u64::MAX)
}

/// Discount a voucher would give on `list_price_cents` before any cap.
#[must_use]
pub fn raw_discount(list_price_cents: u64, discount: VoucherDiscount) -> u64 {
    match discount {
        VoucherDiscount::Fixed(cents) => cents,
        VoucherDiscount::Percentage(basis_points) => basis_points_of(list_price_cents, basis_points),
    }
}

/// Discount amount for one voucher against one item.
///
/// Returns `None` when the voucher is not eligible for the item. The amount
/// is capped by the voucher's maximum discount but not by the list price.
#[must_use]
pub fn compute_discount(item: &PricedItem, voucher: &Voucher) -> Option<u64> {
    if !is_eligible(item, voucher) {
        return None;
    }

    let list_price_cents = item.list_price_cents?;
    let amount = raw_discount(list_price_cents, voucher.discount);

    Some(
        voucher
            .max_discount_cents
            .map_or(amount, |max| amount.min(max)),
    )
}

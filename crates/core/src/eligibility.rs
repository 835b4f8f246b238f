//! Voucher eligibility

use crate::{items::PricedItem, vouchers::Voucher};

/// Whether `voucher` can apply to `item`.
///
/// A voucher applies only to priced items in its own shop whose list price
/// reaches the voucher's minimum spend.
#[must_use]
pub fn is_eligible(item: &PricedItem, voucher: &Voucher) -> bool {
    item.shop_id == voucher.shop_id
        && item
            .list_price_cents
            .is_some_and(|price| price >= voucher.min_spend_cents)
}

/// The subset of `vouchers` eligible for `item`, in input order.
pub fn eligible_vouchers<'a, I>(item: &PricedItem, vouchers: I) -> Vec<&'a Voucher>
where
    I: IntoIterator<Item = &'a Voucher>,
{
    vouchers
        .into_iter()
        .filter(|voucher| is_eligible(item, voucher))
        .collect()
}

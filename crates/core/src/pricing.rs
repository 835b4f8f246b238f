//! Price resolution
//!
//! Picks the single best voucher discount for a priced item and derives the
//! effective sell price. Vouchers never stack.

use serde::Serialize;

use crate::{discounts::compute_discount, items::PricedItem, vouchers::Voucher};

/// Effective price information for one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ResolvedPrice {
    /// List price in cents, absent when the item is unpriced
    pub list_price_cents: Option<u64>,

    /// Largest applicable discount in cents, never above the list price
    pub best_discount_cents: Option<u64>,

    /// List price less the best discount
    pub actual_sell_price_cents: Option<u64>,
}

/// Largest discount any eligible voucher gives on `item`, clamped to its list price.
///
/// Ineligible vouchers are skipped, so callers may pass every voucher they
/// know about. Returns `None` when the item is unpriced or nothing applies.
pub fn best_discount<'a, I>(item: &PricedItem, vouchers: I) -> Option<u64>
where
    I: IntoIterator<Item = &'a Voucher>,
{
    let list_price_cents = item.list_price_cents?;

    vouchers
        .into_iter()
        .filter_map(|voucher| compute_discount(item, voucher))
        .max()
        .map(|discount| discount.min(list_price_cents))
}

/// Resolves the list price, best discount and actual sell price of `item`.
pub fn resolve<'a, I>(item: &PricedItem, vouchers: I) -> ResolvedPrice
where
    I: IntoIterator<Item = &'a Voucher>,
{
    let Some(list_price_cents) = item.list_price_cents else {
        return ResolvedPrice::default();
    };

    let best_discount_cents = best_discount(item, vouchers);

    ResolvedPrice {
        list_price_cents: Some(list_price_cents),
        best_discount_cents,
        actual_sell_price_cents: Some(
            best_discount_cents.map_or(list_price_cents, |discount| {
                list_price_cents.saturating_sub(discount)
            }),
        ),
    }
}

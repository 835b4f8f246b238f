//! Pricebook
//!
//! Pricebook resolves the effective selling price of products listed across
//! several shops. Each shop runs its own vouchers; for every priced item the
//! single most valuable eligible voucher is applied and the resulting
//! discount is never allowed to exceed the list price.
//!
//! All money is held as integer cents and all percentages as integer basis
//! points (`10000` = 100%).

pub mod changes;
pub mod discounts;
pub mod eligibility;
pub mod ids;
pub mod items;
pub mod money;
pub mod prelude;
pub mod pricing;
pub mod sheet;
pub mod vouchers;

//! Money
//!
//! Conversion of operator-entered amounts into integer storage units, display
//! formatting, and normalisation of legacy float-valued columns.

use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use thiserror::Error;

use crate::vouchers::{DiscountTypeKey, VoucherDiscount};

/// Currency symbol prefixed to formatted amounts.
pub const CURRENCY_SYMBOL: &str = "$";

/// Placeholder shown when an amount is absent.
pub const UNAVAILABLE: &str = "N/A";

/// Errors converting operator input into storage units.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    /// Amount was negative, not finite, or too large to store.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
}

/// Converts a dollar amount (e.g. `12.34`) into cents, rounding half away from zero.
///
/// # Errors
///
/// Returns [`MoneyError::InvalidAmount`] for negative, non-finite or
/// unrepresentable amounts.
pub fn to_cents(amount: f64) -> Result<u64, MoneyError> {
    let decimal =
        Decimal::from_f64(amount).ok_or_else(|| MoneyError::InvalidAmount(amount.to_string()))?;

    scale_hundredths(decimal)
}

/// Converts a percentage (e.g. `12.5`) into basis points (`1250`).
///
/// # Errors
///
/// Returns [`MoneyError::InvalidAmount`] for negative, non-finite or
/// unrepresentable percentages.
pub fn to_basis_points(percent: f64) -> Result<u64, MoneyError> {
    let decimal =
        Decimal::from_f64(percent).ok_or_else(|| MoneyError::InvalidAmount(percent.to_string()))?;

    scale_hundredths(decimal)
}

/// Scales a decimal amount by 100 and rounds to an integer, turning dollars
/// into cents or percent into basis points.
///
/// # Errors
///
/// Returns [`MoneyError::InvalidAmount`] when the amount is negative or overflows.
pub fn scale_hundredths(amount: Decimal) -> Result<u64, MoneyError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(MoneyError::InvalidAmount(amount.to_string()));
    }

    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|scaled| scaled.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|scaled| scaled.to_u64())
        .ok_or_else(|| MoneyError::InvalidAmount(amount.to_string()))
}

/// Formats cents as `$12.34`, or `N/A` when absent.
#[must_use]
pub fn format_money(cents: Option<u64>) -> String {
    cents.map_or_else(
        || UNAVAILABLE.to_string(),
        |cents| format!("{CURRENCY_SYMBOL}{:.2}", hundredths(cents)),
    )
}

/// Formats basis points as a percentage, e.g. `2000` as `20.00%`.
#[must_use]
pub fn format_basis_points(basis_points: u64) -> String {
    format!("{:.2}%", hundredths(basis_points))
}

/// Formats a voucher discount in its own unit.
#[must_use]
pub fn format_discount(discount: VoucherDiscount) -> String {
    match discount {
        VoucherDiscount::Fixed(cents) => format_money(Some(cents)),
        VoucherDiscount::Percentage(basis_points) => format_basis_points(basis_points),
    }
}

fn hundredths(value: u64) -> Decimal {
    Decimal::from(value) / Decimal::ONE_HUNDRED
}

/// Normalises a legacy money value to cents.
///
/// Whole numbers are assumed to already be cents and pass through unchanged;
/// fractional values are dollars and are scaled by 100. Missing and non-finite
/// values normalise to `None`.
#[must_use]
pub fn normalize_legacy_money(value: Option<f64>) -> Option<i64> {
    let decimal = Decimal::from_f64(value?)?;

    if decimal.fract().is_zero() {
        return decimal.to_i64();
    }

    decimal
        .checked_mul(Decimal::ONE_HUNDRED)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

/// Normalises a legacy discount value for the given discount type.
///
/// Both units are stored in hundredths, so fixed and percentage discounts
/// share the [`normalize_legacy_money`] rule: fractional values are scaled by
/// 100 and whole values are already migrated.
#[must_use]
pub fn normalize_legacy_discount(value: Option<f64>, key: DiscountTypeKey) -> Option<i64> {
    match key {
        DiscountTypeKey::Fixed | DiscountTypeKey::Percentage => normalize_legacy_money(value),
    }
}

/// Whether writing `normalized` back would change a stored legacy value.
#[must_use]
pub fn needs_repair(original: f64, normalized: i64) -> bool {
    Decimal::from_f64(original) != Some(Decimal::from(normalized))
}

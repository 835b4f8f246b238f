//! Vouchers

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use serde::Serialize;
use thiserror::Error;

use crate::{changes::FieldCheck, ids::TypedId, items::ShopId};

/// Voucher Id
pub type VoucherId = TypedId<Voucher>;

/// Voucher category marker (e.g. "shop voucher", "platform voucher").
#[derive(Debug)]
pub struct VoucherType;

/// Voucher Type Id
pub type VoucherTypeId = TypedId<VoucherType>;

/// Voucher discount type key was not recognised.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown voucher discount type {0:?}")]
pub struct UnknownDiscountType(pub String);

/// Storage key naming the unit of a voucher's raw discount value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountTypeKey {
    /// Raw discount is in cents.
    Fixed,

    /// Raw discount is in basis points.
    Percentage,
}

impl DiscountTypeKey {
    /// The key as stored in `voucher_discount_types.key`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Percentage => "percentage",
        }
    }
}

impl Display for DiscountTypeKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscountTypeKey {
    type Err = UnknownDiscountType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "fixed" => Ok(Self::Fixed),
            "percentage" => Ok(Self::Percentage),
            other => Err(UnknownDiscountType(other.to_string())),
        }
    }
}

/// A voucher's discount, tagged with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoucherDiscount {
    /// Fixed amount off, in cents.
    Fixed(u64),

    /// Percentage off the list price, in basis points (10000 = 100%).
    Percentage(u64),
}

impl VoucherDiscount {
    /// Builds a discount from its storage representation.
    #[must_use]
    pub const fn from_raw(key: DiscountTypeKey, raw: u64) -> Self {
        match key {
            DiscountTypeKey::Fixed => Self::Fixed(raw),
            DiscountTypeKey::Percentage => Self::Percentage(raw),
        }
    }

    /// The discount type key.
    #[must_use]
    pub const fn key(self) -> DiscountTypeKey {
        match self {
            Self::Fixed(_) => DiscountTypeKey::Fixed,
            Self::Percentage(_) => DiscountTypeKey::Percentage,
        }
    }

    /// The raw value, in the unit implied by [`Self::key`].
    #[must_use]
    pub const fn raw(self) -> u64 {
        match self {
            Self::Fixed(raw) | Self::Percentage(raw) => raw,
        }
    }
}

/// A discount offer scoped to exactly one shop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voucher {
    /// Voucher Id
    pub id: VoucherId,

    /// Shop the voucher can be redeemed at
    pub shop_id: ShopId,

    /// Discount offered
    pub discount: VoucherDiscount,

    /// Minimum list price, in cents, for the voucher to apply
    pub min_spend_cents: u64,

    /// Upper bound on the computed discount, in cents
    pub max_discount_cents: Option<u64>,
}

impl Voucher {
    /// Creates a voucher with no minimum spend and no discount cap.
    #[must_use]
    pub const fn new(id: VoucherId, shop_id: ShopId, discount: VoucherDiscount) -> Self {
        Self {
            id,
            shop_id,
            discount,
            min_spend_cents: 0,
            max_discount_cents: None,
        }
    }

    /// Sets the minimum spend.
    #[must_use]
    pub const fn with_min_spend(mut self, cents: u64) -> Self {
        self.min_spend_cents = cents;
        self
    }

    /// Sets the discount cap.
    #[must_use]
    pub const fn with_max_discount(mut self, cents: u64) -> Self {
        self.max_discount_cents = Some(cents);
        self
    }

    /// The discount type key.
    #[must_use]
    pub const fn discount_type_key(&self) -> DiscountTypeKey {
        self.discount.key()
    }

    /// The raw discount value.
    #[must_use]
    pub const fn discount_raw(&self) -> u64 {
        self.discount.raw()
    }
}

/// Comparable view of a voucher's editable fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoucherSnapshot {
    /// Shop the voucher belongs to
    pub shop_id: ShopId,

    /// Voucher category
    pub voucher_type_id: Option<VoucherTypeId>,

    /// Discount offered
    pub discount: VoucherDiscount,

    /// Minimum spend in cents
    pub min_spend_cents: u64,

    /// Discount cap in cents
    pub max_discount_cents: Option<u64>,
}

type SnapshotCheck = FieldCheck<VoucherSnapshot>;

/// Fields compared when deciding whether a voucher update changes anything.
pub const VOUCHER_CHANGE_CHECKS: &[FieldCheck<VoucherSnapshot>] = &[
    SnapshotCheck::new("shop_id", |a, b| a.shop_id == b.shop_id),
    SnapshotCheck::new("voucher_type_id", |a, b| a.voucher_type_id == b.voucher_type_id),
    SnapshotCheck::new("discount_type", |a, b| a.discount.key() == b.discount.key()),
    SnapshotCheck::new("min_spend", |a, b| a.min_spend_cents == b.min_spend_cents),
    SnapshotCheck::new("discount", |a, b| a.discount.raw() == b.discount.raw()),
    SnapshotCheck::new("max_discount", |a, b| {
        a.max_discount_cents == b.max_discount_cents
    }),
];

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::changes::{changed_fields, has_changes};

    use super::*;

    fn snapshot() -> VoucherSnapshot {
        VoucherSnapshot {
            shop_id: ShopId::from_i64(1),
            voucher_type_id: Some(VoucherTypeId::from_i64(1)),
            discount: VoucherDiscount::Percentage(1000),
            min_spend_cents: 5000,
            max_discount_cents: None,
        }
    }

    #[test]
    fn discount_type_key_round_trips_through_storage_key() -> TestResult {
        assert_eq!("fixed".parse::<DiscountTypeKey>()?, DiscountTypeKey::Fixed);
        assert_eq!(
            " percentage ".parse::<DiscountTypeKey>()?,
            DiscountTypeKey::Percentage
        );
        assert_eq!(DiscountTypeKey::Percentage.to_string(), "percentage");

        Ok(())
    }

    #[test]
    fn unknown_discount_type_key_is_rejected() {
        let result = "bogo".parse::<DiscountTypeKey>();

        assert_eq!(result, Err(UnknownDiscountType("bogo".to_string())));
    }

    #[test]
    fn discount_from_raw_carries_unit() {
        let fixed = VoucherDiscount::from_raw(DiscountTypeKey::Fixed, 1500);
        let percentage = VoucherDiscount::from_raw(DiscountTypeKey::Percentage, 2000);

        assert_eq!(fixed, VoucherDiscount::Fixed(1500));
        assert_eq!(percentage.key(), DiscountTypeKey::Percentage);
        assert_eq!(percentage.raw(), 2000);
    }

    #[test]
    fn voucher_builder_sets_thresholds() {
        let voucher = Voucher::new(
            VoucherId::from_i64(7),
            ShopId::from_i64(2),
            VoucherDiscount::Fixed(300),
        )
        .with_min_spend(1000)
        .with_max_discount(250);

        assert_eq!(voucher.min_spend_cents, 1000);
        assert_eq!(voucher.max_discount_cents, Some(250));
        assert_eq!(voucher.discount_type_key(), DiscountTypeKey::Fixed);
        assert_eq!(voucher.discount_raw(), 300);
    }

    #[test]
    fn identical_snapshots_have_no_changes() {
        assert!(!has_changes(&snapshot(), &snapshot(), VOUCHER_CHANGE_CHECKS));
    }

    #[test]
    fn switching_discount_type_with_same_raw_value_is_a_change() {
        let incoming = VoucherSnapshot {
            discount: VoucherDiscount::Fixed(1000),
            ..snapshot()
        };

        assert_eq!(
            changed_fields(&snapshot(), &incoming, VOUCHER_CHANGE_CHECKS),
            vec!["discount_type"]
        );
    }

    #[test]
    fn clearing_max_discount_is_a_change() {
        let existing = VoucherSnapshot {
            max_discount_cents: Some(500),
            ..snapshot()
        };

        assert_eq!(
            changed_fields(&existing, &snapshot(), VOUCHER_CHANGE_CHECKS),
            vec!["max_discount"]
        );
    }
}

//! Pricebook prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    changes::{FieldCheck, case_insensitive, changed_fields, has_changes},
    discounts::{BASIS_POINTS_SCALE, compute_discount},
    eligibility::{eligible_vouchers, is_eligible},
    ids::TypedId,
    items::{PricedItem, Shop, ShopId, Sku},
    money::{MoneyError, format_discount, format_money, to_basis_points, to_cents},
    pricing::{ResolvedPrice, best_discount, resolve},
    sheet::{PriceSheet, PriceSheetError, PriceSheetRow},
    vouchers::{
        DiscountTypeKey, UnknownDiscountType, VOUCHER_CHANGE_CHECKS, Voucher, VoucherDiscount,
        VoucherId, VoucherSnapshot, VoucherType, VoucherTypeId,
    },
};

//! Price sheet
//!
//! Resolves a batch of items against every known voucher and renders the
//! result as a table with one row per item.

use std::io;

use rustc_hash::FxHashMap;
use serde::{Serialize, Serializer, ser::SerializeStruct};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    items::{PricedItem, ShopId},
    money::format_money,
    pricing::{ResolvedPrice, resolve},
    vouchers::Voucher,
};

/// Shown when a shop id has no known display name.
pub const UNKNOWN_SHOP: &str = "Unknown shop";

/// Errors that can occur when rendering a price sheet.
#[derive(Debug, Error)]
pub enum PriceSheetError {
    /// Writing the rendered table failed.
    #[error("failed to write price sheet")]
    Io(#[from] io::Error),
}

/// One item and its resolved prices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceSheetRow {
    /// Item
    pub item: PricedItem,

    /// Resolved prices
    pub resolved: ResolvedPrice,
}

impl Serialize for PriceSheetRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut row = serializer.serialize_struct("PriceSheetRow", 8)?;

        row.serialize_field("sku", &self.item.sku)?;
        row.serialize_field("shop_id", &self.item.shop_id)?;
        row.serialize_field("moq", &self.item.moq)?;
        row.serialize_field("competitor_price_cents", &self.item.competitor_price_cents)?;
        row.serialize_field("competitor_link", &self.item.competitor_link)?;
        row.serialize_field("list_price_cents", &self.resolved.list_price_cents)?;
        row.serialize_field("best_discount_cents", &self.resolved.best_discount_cents)?;
        row.serialize_field(
            "actual_sell_price_cents",
            &self.resolved.actual_sell_price_cents,
        )?;

        row.end()
    }
}

/// Resolved prices for a batch of items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PriceSheet {
    rows: Vec<PriceSheetRow>,
}

impl PriceSheet {
    /// Resolves every item against the vouchers of its own shop.
    ///
    /// Rows keep the order of `items`.
    pub fn resolve<'a, V>(items: Vec<PricedItem>, vouchers: V) -> Self
    where
        V: IntoIterator<Item = &'a Voucher>,
    {
        let mut by_shop: FxHashMap<ShopId, Vec<&Voucher>> = FxHashMap::default();

        for voucher in vouchers {
            by_shop.entry(voucher.shop_id).or_default().push(voucher);
        }

        let rows = items
            .into_iter()
            .map(|item| {
                let shop_vouchers = by_shop.get(&item.shop_id).map_or(&[][..], Vec::as_slice);
                let resolved = resolve(&item, shop_vouchers.iter().copied());

                PriceSheetRow { item, resolved }
            })
            .collect();

        Self { rows }
    }

    /// Rows in input order.
    #[must_use]
    pub fn rows(&self) -> &[PriceSheetRow] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the sheet has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Renders the sheet as a table.
    ///
    /// `shop_names` maps shop ids to display names; unmapped shops are shown
    /// as [`UNKNOWN_SHOP`].
    ///
    /// # Errors
    ///
    /// Returns [`PriceSheetError::Io`] if writing to `out` fails.
    pub fn write_to(
        &self,
        out: &mut impl io::Write,
        shop_names: &FxHashMap<ShopId, String>,
    ) -> Result<(), PriceSheetError> {
        let mut builder = Builder::default();

        builder.push_record(["SKU", "Shop", "List Price", "Savings", "Actual Sell Price"]);

        for row in &self.rows {
            let shop = shop_names
                .get(&row.item.shop_id)
                .map_or(UNKNOWN_SHOP, String::as_str);

            builder.push_record([
                row.item.sku.to_string(),
                shop.to_string(),
                format_money(row.resolved.list_price_cents),
                format_money(row.resolved.best_discount_cents),
                format_money(row.resolved.actual_sell_price_cents),
            ]);
        }

        let mut table = builder.build();

        table.with(Theme::from(Style::modern_rounded()));
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(2..5), Alignment::right());

        writeln!(out, "{table}")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::vouchers::{VoucherDiscount, VoucherId};

    use super::*;

    fn sheet() -> PriceSheet {
        let items = vec![
            PricedItem::new("B-2", ShopId::from_i64(2), Some(2000)),
            PricedItem::new("A-1", ShopId::from_i64(1), Some(10_000)),
            PricedItem::new("C-3", ShopId::from_i64(1), None),
        ];

        let vouchers = [
            Voucher::new(
                VoucherId::from_i64(1),
                ShopId::from_i64(1),
                VoucherDiscount::Fixed(1500),
            ),
            Voucher::new(
                VoucherId::from_i64(2),
                ShopId::from_i64(3),
                VoucherDiscount::Fixed(9000),
            ),
        ];

        PriceSheet::resolve(items, &vouchers)
    }

    #[test]
    fn rows_keep_input_order_and_use_own_shop_vouchers() {
        let sheet = sheet();
        let skus: Vec<&str> = sheet.rows().iter().map(|row| row.item.sku.as_str()).collect();

        assert_eq!(skus, vec!["B-2", "A-1", "C-3"]);
        assert_eq!(sheet.len(), 3);

        let resolved: Vec<ResolvedPrice> = sheet.rows().iter().map(|row| row.resolved).collect();

        assert_eq!(
            resolved,
            vec![
                ResolvedPrice {
                    list_price_cents: Some(2000),
                    best_discount_cents: None,
                    actual_sell_price_cents: Some(2000),
                },
                ResolvedPrice {
                    list_price_cents: Some(10_000),
                    best_discount_cents: Some(1500),
                    actual_sell_price_cents: Some(8500),
                },
                ResolvedPrice::default(),
            ]
        );
    }

    #[test]
    fn empty_sheet_has_no_rows() {
        let sheet = PriceSheet::resolve(Vec::new(), std::iter::empty());

        assert!(sheet.is_empty());
    }

    #[test]
    fn renders_formatted_money_and_shop_names() -> TestResult {
        let mut shop_names = FxHashMap::default();
        shop_names.insert(ShopId::from_i64(1), "Shopee".to_string());

        let mut out = Vec::new();
        sheet().write_to(&mut out, &shop_names)?;

        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("Actual Sell Price"));
        assert!(rendered.contains("Shopee"));
        assert!(rendered.contains(UNKNOWN_SHOP));
        assert!(rendered.contains("$85.00"));
        assert!(rendered.contains("$15.00"));
        assert!(rendered.contains("N/A"));

        Ok(())
    }

    #[test]
    fn serializes_rows_flat() -> TestResult {
        let json = serde_json::to_value(sheet())?;

        assert_eq!(json[1]["sku"], "A-1");
        assert_eq!(json[1]["shop_id"], 1);
        assert_eq!(json[1]["best_discount_cents"], 1500);
        assert_eq!(json[2]["actual_sell_price_cents"], serde_json::Value::Null);

        Ok(())
    }
}

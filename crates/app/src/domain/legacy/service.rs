//! Legacy money migration.

use pricebook::{
    money::{needs_repair, normalize_legacy_discount, normalize_legacy_money},
    vouchers::DiscountTypeKey,
};
use sqlx::{Sqlite, Transaction, query, query_as};
use tracing::{info, instrument, warn};

use crate::{database::Db, domain::legacy::errors::LegacyMigrationError};

const LIST_VOUCHER_DISCOUNTS_SQL: &str = include_str!("sql/list_voucher_discounts.sql");

/// Money columns holding cents, repaired with the plain money rule.
const MONEY_COLUMNS: &[(&str, &str)] = &[
    ("products", "cost"),
    ("product_pricing", "sell_price"),
    ("product_pricing", "competitor_price"),
    ("vouchers", "min_spend"),
    ("vouchers", "max_discount"),
];

/// Outcome for one repaired column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnReport {
    pub table: &'static str,
    pub column: &'static str,
    pub scanned: u64,
    pub updated: u64,
}

/// Outcome of a migration run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub columns: Vec<ColumnReport>,
}

impl MigrationReport {
    /// Rows rewritten across every column.
    #[must_use]
    pub fn total_updated(&self) -> u64 {
        self.columns.iter().map(|column| column.updated).sum()
    }

    /// Report for one column, if it was processed.
    #[must_use]
    pub fn column(&self, table: &str, column: &str) -> Option<&ColumnReport> {
        self.columns
            .iter()
            .find(|report| report.table == table && report.column == column)
    }
}

/// Rewrites legacy dollar-denominated values as integer cents.
///
/// Values with a fractional part are taken to be dollars; whole values are
/// left alone. A whole-dollar legacy amount is therefore indistinguishable
/// from an already converted cent amount and is never rewritten.
#[derive(Debug, Clone)]
pub struct LegacyMoneyMigration {
    db: Db,
}

impl LegacyMoneyMigration {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Runs the repair in a single transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if any read or write fails; nothing is committed then.
    #[instrument(name = "legacy.normalize_money", skip(self), err)]
    pub async fn run(&self) -> Result<MigrationReport, LegacyMigrationError> {
        let mut tx = self.db.begin().await?;
        let mut report = MigrationReport::default();

        for &(table, column) in MONEY_COLUMNS {
            report
                .columns
                .push(repair_money_column(&mut tx, table, column).await?);
        }

        report.columns.push(repair_voucher_discounts(&mut tx).await?);

        tx.commit().await?;

        info!(updated = report.total_updated(), "legacy money normalized");

        Ok(report)
    }
}

async fn repair_money_column(
    tx: &mut Transaction<'_, Sqlite>,
    table: &'static str,
    column: &'static str,
) -> Result<ColumnReport, sqlx::Error> {
    let select = format!(
        "SELECT id, CAST({column} AS REAL) AS value FROM {table} WHERE {column} IS NOT NULL"
    );
    let update = format!("UPDATE {table} SET {column} = ?1 WHERE id = ?2");

    let rows: Vec<(i64, Option<f64>)> = query_as(&select).fetch_all(&mut **tx).await?;

    let mut report = ColumnReport {
        table,
        column,
        scanned: 0,
        updated: 0,
    };

    for (id, value) in rows {
        report.scanned += 1;

        let Some(original) = value else {
            continue;
        };

        if let Some(normalized) = normalize_legacy_money(Some(original))
            && needs_repair(original, normalized)
        {
            query(&update)
                .bind(normalized)
                .bind(id)
                .execute(&mut **tx)
                .await?;

            report.updated += 1;
        }
    }

    info!(table, column, scanned = report.scanned, updated = report.updated, "column repaired");

    Ok(report)
}

async fn repair_voucher_discounts(
    tx: &mut Transaction<'_, Sqlite>,
) -> Result<ColumnReport, sqlx::Error> {
    let rows: Vec<(i64, Option<String>, Option<f64>)> = query_as(LIST_VOUCHER_DISCOUNTS_SQL)
        .fetch_all(&mut **tx)
        .await?;

    let mut report = ColumnReport {
        table: "vouchers",
        column: "discount",
        scanned: 0,
        updated: 0,
    };

    for (id, key, value) in rows {
        report.scanned += 1;

        let Some(original) = value else {
            continue;
        };

        let key = key
            .as_deref()
            .and_then(|key| key.parse().ok())
            .unwrap_or_else(|| {
                warn!(voucher_id = id, "unknown discount type, treating as fixed");
                DiscountTypeKey::Fixed
            });

        if let Some(normalized) = normalize_legacy_discount(Some(original), key)
            && needs_repair(original, normalized)
        {
            query("UPDATE vouchers SET discount = ?1 WHERE id = ?2")
                .bind(normalized)
                .bind(id)
                .execute(&mut **tx)
                .await?;

            report.updated += 1;
        }
    }

    info!(scanned = report.scanned, updated = report.updated, "voucher discounts repaired");

    Ok(report)
}

#[cfg(test)]
mod tests {
    use pricebook::vouchers::{VoucherDiscount, VoucherId};
    use sqlx::query_scalar;
    use testresult::TestResult;

    use crate::{
        domain::{
            pricing::PricingService,
            vouchers::{VouchersService, data::VoucherForm},
        },
        test::TestContext,
    };

    use super::*;

    async fn sell_price(ctx: &TestContext, sku: &str) -> Option<f64> {
        query_scalar("SELECT CAST(sell_price AS REAL) FROM product_pricing WHERE product_sku = ?1")
            .bind(sku)
            .fetch_one(ctx.pool())
            .await
            .expect("Failed to read sell price")
    }

    #[tokio::test]
    async fn fractional_prices_become_cents_and_whole_prices_stay() -> TestResult {
        let ctx = TestContext::new().await;
        let shop = ctx.create_shop("SHP", "Shopee").await;

        ctx.create_product("LEGACY").await;
        ctx.create_product("MIGRATED").await;
        ctx.create_product("UNPRICED").await;
        ctx.set_pricing("MIGRATED", shop, Some(1999)).await;
        ctx.set_pricing("UNPRICED", shop, None).await;

        query("INSERT INTO product_pricing (product_sku, shop_id, sell_price) VALUES (?1, ?2, ?3)")
            .bind("LEGACY")
            .bind(shop.into_i64())
            .bind(19.99_f64)
            .execute(ctx.pool())
            .await?;

        let report = ctx.legacy.run().await?;

        assert_eq!(sell_price(&ctx, "LEGACY").await, Some(1999.0));
        assert_eq!(sell_price(&ctx, "MIGRATED").await, Some(1999.0));
        assert_eq!(sell_price(&ctx, "UNPRICED").await, None);

        let column = report.column("product_pricing", "sell_price");

        assert_eq!(column.map(|column| column.scanned), Some(2));
        assert_eq!(column.map(|column| column.updated), Some(1));
        assert_eq!(report.total_updated(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn voucher_discounts_follow_their_type() -> TestResult {
        let ctx = TestContext::new().await;
        let shop = ctx.create_shop("SHP", "Shopee").await;

        let percent = ctx
            .insert_voucher(shop, DiscountTypeKey::Percentage, 0, 0, None)
            .await;
        let basis_points = ctx
            .insert_voucher(shop, DiscountTypeKey::Percentage, 1500, 0, None)
            .await;
        let fixed = ctx
            .insert_voucher(shop, DiscountTypeKey::Fixed, 500, 0, None)
            .await;

        query("UPDATE vouchers SET discount = ?1 WHERE id = ?2")
            .bind(12.5_f64)
            .bind(percent.into_i64())
            .execute(ctx.pool())
            .await?;

        query("UPDATE vouchers SET discount = ?1, min_spend = ?2, max_discount = ?3 WHERE id = ?4")
            .bind(2.5_f64)
            .bind(10.5_f64)
            .bind(7.25_f64)
            .bind(fixed.into_i64())
            .execute(ctx.pool())
            .await?;

        let report = ctx.legacy.run().await?;

        let vouchers = ctx.pricing.list_vouchers(Some(shop)).await?;
        let discount_of = |id: VoucherId| {
            vouchers
                .iter()
                .find(|voucher| voucher.id == id)
                .map(|voucher| voucher.discount)
        };

        assert_eq!(discount_of(percent), Some(VoucherDiscount::Percentage(1250)));
        assert_eq!(discount_of(basis_points), Some(VoucherDiscount::Percentage(1500)));
        assert_eq!(discount_of(fixed), Some(VoucherDiscount::Fixed(250)));

        let fixed_voucher = vouchers.iter().find(|voucher| voucher.id == fixed);

        assert_eq!(fixed_voucher.map(|voucher| voucher.min_spend_cents), Some(1050));
        assert_eq!(
            fixed_voucher.and_then(|voucher| voucher.max_discount_cents),
            Some(725)
        );

        assert_eq!(
            report.column("vouchers", "discount").map(|column| column.updated),
            Some(2)
        );

        Ok(())
    }

    #[tokio::test]
    async fn whole_basis_points_at_or_below_one_percent_stay_put() -> TestResult {
        let ctx = TestContext::new().await;
        let shop = ctx.create_shop("SHP", "Shopee").await;

        let voucher = ctx
            .vouchers
            .create_voucher(VoucherForm {
                shop_id: shop,
                voucher_type_id: None,
                discount_type: DiscountTypeKey::Percentage,
                discount: 0.5,
                min_spend: 50.0,
                max_discount: None,
            })
            .await?;

        assert_eq!(voucher.discount, VoucherDiscount::Percentage(50));

        let report = ctx.legacy.run().await?;
        let stored = ctx.vouchers.get_voucher(voucher.id).await?;

        assert_eq!(stored.discount, VoucherDiscount::Percentage(50));
        assert_eq!(
            report.column("vouchers", "discount").map(|column| column.updated),
            Some(0)
        );
        assert_eq!(report.total_updated(), 0);

        Ok(())
    }

    #[tokio::test]
    async fn running_twice_changes_nothing_the_second_time() -> TestResult {
        let ctx = TestContext::new().await;
        let shop = ctx.create_shop("SHP", "Shopee").await;

        ctx.create_product("LEGACY").await;

        query("INSERT INTO product_pricing (product_sku, shop_id, sell_price) VALUES (?1, ?2, ?3)")
            .bind("LEGACY")
            .bind(shop.into_i64())
            .bind(4.5_f64)
            .execute(ctx.pool())
            .await?;

        let first = ctx.legacy.run().await?;
        let second = ctx.legacy.run().await?;

        assert_eq!(first.total_updated(), 1);
        assert_eq!(second.total_updated(), 0);
        assert_eq!(second.columns.len(), 6);

        Ok(())
    }
}

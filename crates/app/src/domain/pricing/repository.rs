//! Pricing Repository

use pricebook::{
    items::{PricedItem, ShopId},
    vouchers::{DiscountTypeKey, Voucher},
};
use sqlx::{FromRow, Row, Sqlite, Transaction, query, query_as, sqlite::SqliteRow};
use tracing::warn;

use crate::{
    database::{to_sql_integer_opt, try_get_unsigned, try_get_unsigned_opt},
    domain::pricing::{
        data::PricingUpdate,
        records::{OfferRecord, PricingRecord, ShopRecord},
    },
};

const LIST_SHOPS_SQL: &str = include_str!("sql/list_shops.sql");
const LIST_PRICED_ITEMS_SQL: &str = include_str!("sql/list_priced_items.sql");
const LIST_OFFERS_SQL: &str = include_str!("sql/list_offers.sql");
const UPDATE_PRICING_SQL: &str = include_str!("sql/update_pricing.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqlitePricingRepository;

impl SqlitePricingRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_shops(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<Vec<ShopRecord>, sqlx::Error> {
        query_as::<Sqlite, ShopRecord>(LIST_SHOPS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_priced_items(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        shop: Option<ShopId>,
    ) -> Result<Vec<PricedItem>, sqlx::Error> {
        let records = query_as::<Sqlite, PricingRecord>(LIST_PRICED_ITEMS_SQL)
            .bind(shop.map(ShopId::into_i64))
            .fetch_all(&mut **tx)
            .await?;

        Ok(records.into_iter().map(PricedItem::from).collect())
    }

    pub(crate) async fn list_offers(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        shop: Option<ShopId>,
    ) -> Result<Vec<Voucher>, sqlx::Error> {
        let records = query_as::<Sqlite, OfferRecord>(LIST_OFFERS_SQL)
            .bind(shop.map(ShopId::into_i64))
            .fetch_all(&mut **tx)
            .await?;

        Ok(records.into_iter().map(Voucher::from).collect())
    }

    pub(crate) async fn update_pricing(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        update: &PricingUpdate,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_PRICING_SQL)
            .bind(update.sku.as_str())
            .bind(update.shop_id.into_i64())
            .bind(to_sql_integer_opt(update.sell_price_cents, "sell_price")?)
            .bind(update.moq.map(i64::from))
            .bind(to_sql_integer_opt(
                update.competitor_price_cents,
                "competitor_price",
            )?)
            .bind(update.competitor_link.as_deref())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, SqliteRow> for ShopRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: ShopId::from_i64(row.try_get("id")?),
            code: row.try_get("code")?,
            name: row.try_get("name")?,
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for PricingRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            sku: row.try_get("sku")?,
            shop_id: row.try_get("shop_id")?,
            sell_price: try_get_unsigned_opt(row, "sell_price")?,
            moq: try_get_unsigned_opt(row, "moq")?,
            competitor_price: try_get_unsigned_opt(row, "competitor_price")?,
            competitor_link: row.try_get("competitor_link")?,
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for OfferRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let id: i64 = row.try_get("id")?;
        let key: String = row.try_get("discount_type")?;

        let discount_type = key.parse().unwrap_or_else(|error| {
            warn!(voucher_id = id, %error, "treating voucher discount as fixed");
            DiscountTypeKey::Fixed
        });

        Ok(Self {
            id,
            shop_id: row.try_get("shop_id")?,
            discount_type,
            discount: try_get_unsigned(row, "discount")?,
            min_spend: try_get_unsigned(row, "min_spend")?,
            max_discount: try_get_unsigned_opt(row, "max_discount")?,
        })
    }
}

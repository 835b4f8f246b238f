//! Vouchers Repository

use jiff::Timestamp;
use pricebook::{
    items::ShopId,
    vouchers::{DiscountTypeKey, VoucherDiscount, VoucherId, VoucherSnapshot, VoucherTypeId},
};
use sqlx::{FromRow, Row, Sqlite, Transaction, query, query_as, query_scalar, sqlite::SqliteRow};
use tracing::warn;

use crate::{
    database::{to_sql_integer, to_sql_integer_opt, try_get_unsigned, try_get_unsigned_opt},
    domain::vouchers::records::VoucherRecord,
};

const LIST_VOUCHERS_SQL: &str = include_str!("sql/list_vouchers.sql");
const GET_VOUCHER_SQL: &str = include_str!("sql/get_voucher.sql");
const CREATE_VOUCHER_SQL: &str = include_str!("sql/create_voucher.sql");
const UPDATE_VOUCHER_SQL: &str = include_str!("sql/update_voucher.sql");
const DELETE_VOUCHER_SQL: &str = include_str!("sql/delete_voucher.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteVouchersRepository;

impl SqliteVouchersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_vouchers(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<Vec<VoucherRecord>, sqlx::Error> {
        query_as::<Sqlite, VoucherRecord>(LIST_VOUCHERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_voucher(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        voucher: VoucherId,
    ) -> Result<VoucherRecord, sqlx::Error> {
        query_as::<Sqlite, VoucherRecord>(GET_VOUCHER_SQL)
            .bind(voucher.into_i64())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_voucher(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        voucher: &VoucherSnapshot,
    ) -> Result<VoucherId, sqlx::Error> {
        let id: i64 = query_scalar(CREATE_VOUCHER_SQL)
            .bind(voucher.shop_id.into_i64())
            .bind(voucher.voucher_type_id.map(VoucherTypeId::into_i64))
            .bind(voucher.discount.key().as_str())
            .bind(to_sql_integer(voucher.discount.raw(), "discount")?)
            .bind(to_sql_integer(voucher.min_spend_cents, "min_spend")?)
            .bind(to_sql_integer_opt(voucher.max_discount_cents, "max_discount")?)
            .fetch_one(&mut **tx)
            .await?;

        Ok(VoucherId::from_i64(id))
    }

    pub(crate) async fn update_voucher(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        voucher: VoucherId,
        update: &VoucherSnapshot,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_VOUCHER_SQL)
            .bind(voucher.into_i64())
            .bind(update.shop_id.into_i64())
            .bind(update.voucher_type_id.map(VoucherTypeId::into_i64))
            .bind(update.discount.key().as_str())
            .bind(to_sql_integer(update.discount.raw(), "discount")?)
            .bind(to_sql_integer(update.min_spend_cents, "min_spend")?)
            .bind(to_sql_integer_opt(update.max_discount_cents, "max_discount")?)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_voucher(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        voucher: VoucherId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_VOUCHER_SQL)
            .bind(voucher.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, SqliteRow> for VoucherRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let id: i64 = row.try_get("id")?;
        let key: String = row.try_get("discount_type")?;

        let discount_type = key.parse().unwrap_or_else(|error| {
            warn!(voucher_id = id, %error, "treating voucher discount as fixed");
            DiscountTypeKey::Fixed
        });

        let created_at = Timestamp::from_second(row.try_get("created_at")?).map_err(|e| {
            sqlx::Error::ColumnDecode {
                index: "created_at".to_string(),
                source: Box::new(e),
            }
        })?;

        Ok(Self {
            id: VoucherId::from_i64(id),
            shop_id: ShopId::from_i64(row.try_get("shop_id")?),
            shop_name: row.try_get("shop_name")?,
            voucher_type_id: row
                .try_get::<Option<i64>, _>("voucher_type_id")?
                .map(VoucherTypeId::from_i64),
            voucher_type_name: row.try_get("voucher_type_name")?,
            discount: VoucherDiscount::from_raw(discount_type, try_get_unsigned(row, "discount")?),
            min_spend_cents: try_get_unsigned(row, "min_spend")?,
            max_discount_cents: try_get_unsigned_opt(row, "max_discount")?,
            created_at,
        })
    }
}

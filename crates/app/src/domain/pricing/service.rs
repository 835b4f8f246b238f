//! Pricing service.

use async_trait::async_trait;
use mockall::automock;
use pricebook::{
    items::{PricedItem, ShopId},
    sheet::PriceSheet,
    vouchers::Voucher,
};
use tracing::{debug, instrument};

use crate::{
    database::Db,
    domain::pricing::{
        data::PricingUpdate, errors::PricingServiceError, records::ShopRecord,
        repository::SqlitePricingRepository,
    },
};

#[derive(Debug, Clone)]
pub struct SqlitePricingService {
    db: Db,
    repository: SqlitePricingRepository,
}

impl SqlitePricingService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: SqlitePricingRepository::new(),
        }
    }
}

#[async_trait]
impl PricingService for SqlitePricingService {
    async fn list_shops(&self) -> Result<Vec<ShopRecord>, PricingServiceError> {
        let mut tx = self.db.begin().await?;

        let shops = self.repository.list_shops(&mut tx).await?;

        tx.commit().await?;

        Ok(shops)
    }

    async fn list_priced_items(
        &self,
        shop: Option<ShopId>,
    ) -> Result<Vec<PricedItem>, PricingServiceError> {
        let mut tx = self.db.begin().await?;

        let items = self.repository.list_priced_items(&mut tx, shop).await?;

        tx.commit().await?;

        Ok(items)
    }

    async fn list_vouchers(&self, shop: Option<ShopId>) -> Result<Vec<Voucher>, PricingServiceError> {
        let mut tx = self.db.begin().await?;

        let vouchers = self.repository.list_offers(&mut tx, shop).await?;

        tx.commit().await?;

        Ok(vouchers)
    }

    #[instrument(name = "pricing.price_sheet", skip(self), err)]
    async fn price_sheet(&self, shop: Option<ShopId>) -> Result<PriceSheet, PricingServiceError> {
        let mut tx = self.db.begin().await?;

        let items = self.repository.list_priced_items(&mut tx, shop).await?;
        let vouchers = self.repository.list_offers(&mut tx, shop).await?;

        tx.commit().await?;

        debug!(
            items = items.len(),
            vouchers = vouchers.len(),
            "resolving price sheet"
        );

        Ok(PriceSheet::resolve(items, &vouchers))
    }

    #[instrument(
        name = "pricing.update_pricing",
        skip(self, update),
        fields(sku = %update.sku, shop = %update.shop_id),
        err
    )]
    async fn update_pricing(&self, update: PricingUpdate) -> Result<(), PricingServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.update_pricing(&mut tx, &update).await?;

        if rows_affected == 0 {
            return Err(PricingServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait PricingService: Send + Sync {
    /// Retrieves all shops, ordered by name.
    async fn list_shops(&self) -> Result<Vec<ShopRecord>, PricingServiceError>;

    /// Retrieves the priced-item catalog, optionally for one shop.
    async fn list_priced_items(
        &self,
        shop: Option<ShopId>,
    ) -> Result<Vec<PricedItem>, PricingServiceError>;

    /// Retrieves every stored voucher as pricing input, optionally for one shop.
    async fn list_vouchers(&self, shop: Option<ShopId>) -> Result<Vec<Voucher>, PricingServiceError>;

    /// Resolves the current price sheet from a single consistent snapshot.
    async fn price_sheet(&self, shop: Option<ShopId>) -> Result<PriceSheet, PricingServiceError>;

    /// Updates the editable pricing fields of one product-shop row.
    async fn update_pricing(&self, update: PricingUpdate) -> Result<(), PricingServiceError>;
}

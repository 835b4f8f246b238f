//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        legacy::LegacyMoneyMigration,
        pricing::{PricingService, SqlitePricingService},
        vouchers::{SqliteVouchersService, VouchersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database: {0}")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub db: Db,
    pub pricing: Arc<dyn PricingService>,
    pub vouchers: Arc<dyn VouchersService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::new(Db::new(pool)))
    }

    /// Build application context around an existing storage handle.
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            pricing: Arc::new(SqlitePricingService::new(db.clone())),
            vouchers: Arc::new(SqliteVouchersService::new(db.clone())),
            db,
        }
    }

    /// The one-time legacy money repair pass.
    #[must_use]
    pub fn legacy_money_migration(&self) -> LegacyMoneyMigration {
        LegacyMoneyMigration::new(self.db.clone())
    }
}

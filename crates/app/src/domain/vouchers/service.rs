//! Vouchers service.

use async_trait::async_trait;
use mockall::automock;
use pricebook::{
    changes::{case_insensitive, changed_fields},
    vouchers::{VOUCHER_CHANGE_CHECKS, VoucherId},
};
use tracing::{info, instrument};

use crate::{
    database::Db,
    domain::vouchers::{
        data::{UpdateOutcome, VoucherForm},
        errors::VouchersServiceError,
        records::VoucherRecord,
        repository::SqliteVouchersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct SqliteVouchersService {
    db: Db,
    repository: SqliteVouchersRepository,
}

impl SqliteVouchersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: SqliteVouchersRepository::new(),
        }
    }
}

#[async_trait]
impl VouchersService for SqliteVouchersService {
    async fn list_vouchers(&self) -> Result<Vec<VoucherRecord>, VouchersServiceError> {
        let mut tx = self.db.begin().await?;

        let vouchers = self.repository.list_vouchers(&mut tx).await?;

        tx.commit().await?;

        Ok(vouchers)
    }

    async fn get_voucher(&self, voucher: VoucherId) -> Result<VoucherRecord, VouchersServiceError> {
        let mut tx = self.db.begin().await?;

        let voucher = self.repository.get_voucher(&mut tx, voucher).await?;

        tx.commit().await?;

        Ok(voucher)
    }

    #[instrument(name = "vouchers.create_voucher", skip(self, form), fields(shop = %form.shop_id), err)]
    async fn create_voucher(&self, form: VoucherForm) -> Result<VoucherRecord, VouchersServiceError> {
        let snapshot = form.normalize()?;

        let mut tx = self.db.begin().await?;

        let id = self.repository.create_voucher(&mut tx, &snapshot).await?;
        let created = self.repository.get_voucher(&mut tx, id).await?;

        tx.commit().await?;

        info!(voucher = %id, "voucher created");

        Ok(created)
    }

    #[instrument(name = "vouchers.update_voucher", skip(self, form), err)]
    async fn update_voucher(
        &self,
        voucher: VoucherId,
        form: VoucherForm,
    ) -> Result<UpdateOutcome, VouchersServiceError> {
        let incoming = form.normalize()?;

        let mut tx = self.db.begin().await?;

        let existing = self.repository.get_voucher(&mut tx, voucher).await?;
        let changed = changed_fields(&existing.snapshot(), &incoming, VOUCHER_CHANGE_CHECKS);

        if changed.is_empty() {
            tx.commit().await?;

            info!("no changes detected");

            return Ok(UpdateOutcome::Unchanged);
        }

        let rows_affected = self
            .repository
            .update_voucher(&mut tx, voucher, &incoming)
            .await?;

        if rows_affected == 0 {
            return Err(VouchersServiceError::NotFound);
        }

        let updated = self.repository.get_voucher(&mut tx, voucher).await?;

        tx.commit().await?;

        info!(?changed, "voucher updated");

        Ok(UpdateOutcome::Updated(updated))
    }

    #[instrument(name = "vouchers.delete_voucher_confirmed", skip(self, confirmation), err)]
    async fn delete_voucher_confirmed(
        &self,
        voucher: VoucherId,
        confirmation: String,
    ) -> Result<(), VouchersServiceError> {
        if confirmation.trim().is_empty() {
            return Err(VouchersServiceError::ConfirmationRequired);
        }

        let mut tx = self.db.begin().await?;

        let existing = self.repository.get_voucher(&mut tx, voucher).await?;
        let expected = existing.confirmation_text();

        if !case_insensitive(&expected, &confirmation) {
            return Err(VouchersServiceError::ConfirmationMismatch { expected });
        }

        let rows_affected = self.repository.delete_voucher(&mut tx, voucher).await?;

        if rows_affected == 0 {
            return Err(VouchersServiceError::NotFound);
        }

        tx.commit().await?;

        info!("voucher deleted");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait VouchersService: Send + Sync {
    /// Retrieves all vouchers, newest first.
    async fn list_vouchers(&self) -> Result<Vec<VoucherRecord>, VouchersServiceError>;

    /// Retrieve a single voucher.
    async fn get_voucher(&self, voucher: VoucherId) -> Result<VoucherRecord, VouchersServiceError>;

    /// Creates a voucher from user-facing form values.
    async fn create_voucher(&self, form: VoucherForm) -> Result<VoucherRecord, VouchersServiceError>;

    /// Updates a voucher, skipping the write when nothing changed.
    async fn update_voucher(
        &self,
        voucher: VoucherId,
        form: VoucherForm,
    ) -> Result<UpdateOutcome, VouchersServiceError>;

    /// Deletes a voucher once `confirmation` matches its shop and type names.
    async fn delete_voucher_confirmed(
        &self,
        voucher: VoucherId,
        confirmation: String,
    ) -> Result<(), VouchersServiceError>;
}

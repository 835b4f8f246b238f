//! Legacy migration errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LegacyMigrationError {
    #[error("storage error")]
    Sql(#[from] sqlx::Error),
}

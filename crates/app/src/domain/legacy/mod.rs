//! Legacy money repair
//!
//! One-time pass converting money columns written as fractional dollars
//! into integer cents, and percentage discounts into basis points.

mod errors;
mod service;

pub use errors::LegacyMigrationError;
pub use service::{ColumnReport, LegacyMoneyMigration, MigrationReport};

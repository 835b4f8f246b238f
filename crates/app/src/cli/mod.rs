use std::io;

use clap::{Parser, Subcommand};
use pricebook_app::context::AppContext;

use crate::config::{DatabaseConfig, LoggingConfig};

mod db;
mod prices;
mod vouchers;

#[derive(Debug, Parser)]
#[command(name = "pricebook", about = "Pricebook CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) logging: LoggingConfig,

    #[command(flatten)]
    database: DatabaseConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Schema and data maintenance
    Db(db::DbCommand),

    /// Print resolved prices
    Prices(prices::PricesArgs),

    /// Manage vouchers
    Vouchers(vouchers::VouchersCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        let context = AppContext::from_database_url(&self.database.database_url)
            .await
            .map_err(|error| error.to_string())?;

        let mut out = io::stdout();

        match self.command {
            Commands::Db(command) => db::run(command, &context, &mut out).await,
            Commands::Prices(args) => prices::run(args, context.pricing.as_ref(), &mut out).await,
            Commands::Vouchers(command) => {
                vouchers::run(command, context.vouchers.as_ref(), &mut out).await
            }
        }
    }
}

pub(crate) fn write_failed(error: io::Error) -> String {
    format!("failed to write output: {error}")
}

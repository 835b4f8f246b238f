use std::io::Write;

use clap::{Args, ValueEnum};
use pricebook::items::ShopId;
use pricebook_app::domain::pricing::PricingService;
use rustc_hash::FxHashMap;

use crate::cli::write_failed;

/// Output format for resolved prices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Terminal table.
    Table,

    /// JSON array, one object per priced item.
    Json,
}

#[derive(Debug, Args)]
pub(crate) struct PricesArgs {
    /// Only resolve prices for this shop id
    #[arg(long)]
    shop: Option<i64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

pub(crate) async fn run(
    args: PricesArgs,
    service: &dyn PricingService,
    out: &mut impl Write,
) -> Result<(), String> {
    let shop = args.shop.map(ShopId::from_i64);

    let sheet = service
        .price_sheet(shop)
        .await
        .map_err(|error| format!("failed to resolve prices: {error}"))?;

    match args.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &sheet)
                .map_err(|error| format!("failed to encode prices: {error}"))?;

            writeln!(out).map_err(write_failed)
        }
        OutputFormat::Table => {
            let shop_names: FxHashMap<ShopId, String> = service
                .list_shops()
                .await
                .map_err(|error| format!("failed to list shops: {error}"))?
                .into_iter()
                .map(|shop| (shop.id, shop.name))
                .collect();

            sheet
                .write_to(out, &shop_names)
                .map_err(|error| format!("failed to render prices: {error}"))
        }
    }
}

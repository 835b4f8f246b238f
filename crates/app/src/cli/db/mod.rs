use std::io::Write;

use clap::{Args, Subcommand};
use pricebook_app::context::AppContext;

mod migrate;
mod normalize_money;

#[derive(Debug, Args)]
pub(crate) struct DbCommand {
    #[command(subcommand)]
    command: DbSubcommand,
}

#[derive(Debug, Subcommand)]
enum DbSubcommand {
    /// Apply pending schema migrations
    Migrate,

    /// Convert legacy dollar amounts to cents and percentages to basis points
    NormalizeMoney,
}

pub(crate) async fn run(
    command: DbCommand,
    context: &AppContext,
    out: &mut impl Write,
) -> Result<(), String> {
    match command.command {
        DbSubcommand::Migrate => migrate::run(context, out).await,
        DbSubcommand::NormalizeMoney => normalize_money::run(context, out).await,
    }
}

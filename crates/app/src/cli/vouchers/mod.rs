use std::io::Write;

use clap::{Args, Subcommand};
use pricebook::{
    items::ShopId,
    vouchers::{DiscountTypeKey, VoucherTypeId},
};
use pricebook_app::domain::vouchers::{VouchersService, data::VoucherForm};

mod create;
mod delete;
mod list;
mod update;

#[derive(Debug, Args)]
pub(crate) struct VouchersCommand {
    #[command(subcommand)]
    command: VouchersSubcommand,
}

#[derive(Debug, Subcommand)]
enum VouchersSubcommand {
    /// List vouchers, newest first
    List,

    /// Create a voucher
    Create(create::CreateVoucherArgs),

    /// Update a voucher
    Update(update::UpdateVoucherArgs),

    /// Delete a voucher after confirming its shop and type
    Delete(delete::DeleteVoucherArgs),
}

/// Voucher fields in user-facing units.
#[derive(Debug, Args)]
pub(crate) struct VoucherFormArgs {
    /// Shop id the voucher belongs to
    #[arg(long)]
    shop: i64,

    /// Voucher type id
    #[arg(long = "type")]
    voucher_type: Option<i64>,

    /// Discount type (fixed, percentage)
    #[arg(long)]
    discount_type: DiscountTypeKey,

    /// Dollars off for fixed vouchers, percent off for percentage vouchers
    #[arg(long)]
    discount: f64,

    /// Minimum list price in dollars
    #[arg(long, default_value_t = 0.0)]
    min_spend: f64,

    /// Maximum discount in dollars
    #[arg(long)]
    max_discount: Option<f64>,
}

impl From<VoucherFormArgs> for VoucherForm {
    fn from(args: VoucherFormArgs) -> Self {
        Self {
            shop_id: ShopId::from_i64(args.shop),
            voucher_type_id: args.voucher_type.map(VoucherTypeId::from_i64),
            discount_type: args.discount_type,
            discount: args.discount,
            min_spend: args.min_spend,
            max_discount: args.max_discount,
        }
    }
}

pub(crate) async fn run(
    command: VouchersCommand,
    service: &dyn VouchersService,
    out: &mut impl Write,
) -> Result<(), String> {
    match command.command {
        VouchersSubcommand::List => list::run(service, out).await,
        VouchersSubcommand::Create(args) => create::run(args, service, out).await,
        VouchersSubcommand::Update(args) => update::run(args, service, out).await,
        VouchersSubcommand::Delete(args) => delete::run(args, service, out).await,
    }
}

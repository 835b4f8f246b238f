use std::io::Write;

use clap::Args;
use pricebook::money::format_discount;
use pricebook_app::domain::vouchers::VouchersService;

use crate::cli::{vouchers::VoucherFormArgs, write_failed};

#[derive(Debug, Args)]
pub(crate) struct CreateVoucherArgs {
    #[command(flatten)]
    form: VoucherFormArgs,
}

pub(crate) async fn run(
    args: CreateVoucherArgs,
    service: &dyn VouchersService,
    out: &mut impl Write,
) -> Result<(), String> {
    let voucher = service
        .create_voucher(args.form.into())
        .await
        .map_err(|error| format!("failed to create voucher: {error}"))?;

    writeln!(
        out,
        "created voucher {}: {} off at {}",
        voucher.id,
        format_discount(voucher.discount),
        voucher.shop_label()
    )
    .map_err(write_failed)
}

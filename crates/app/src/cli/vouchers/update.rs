use std::io::Write;

use clap::Args;
use pricebook::vouchers::VoucherId;
use pricebook_app::domain::vouchers::{VouchersService, data::UpdateOutcome};

use crate::cli::{vouchers::VoucherFormArgs, write_failed};

#[derive(Debug, Args)]
pub(crate) struct UpdateVoucherArgs {
    /// Voucher id
    id: i64,

    #[command(flatten)]
    form: VoucherFormArgs,
}

pub(crate) async fn run(
    args: UpdateVoucherArgs,
    service: &dyn VouchersService,
    out: &mut impl Write,
) -> Result<(), String> {
    let outcome = service
        .update_voucher(VoucherId::from_i64(args.id), args.form.into())
        .await
        .map_err(|error| format!("failed to update voucher: {error}"))?;

    let written = match outcome {
        UpdateOutcome::Unchanged => writeln!(out, "No changes detected."),
        UpdateOutcome::Updated(voucher) => writeln!(out, "updated voucher {}", voucher.id),
    };

    written.map_err(write_failed)
}

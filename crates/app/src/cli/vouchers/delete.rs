use std::io::Write;

use clap::Args;
use pricebook::vouchers::VoucherId;
use pricebook_app::domain::vouchers::VouchersService;

use crate::cli::write_failed;

#[derive(Debug, Args)]
pub(crate) struct DeleteVoucherArgs {
    /// Voucher id
    id: i64,

    /// Confirmation text, "<shop name> · <voucher type>"
    #[arg(long, default_value = "")]
    confirm: String,
}

pub(crate) async fn run(
    args: DeleteVoucherArgs,
    service: &dyn VouchersService,
    out: &mut impl Write,
) -> Result<(), String> {
    let voucher = VoucherId::from_i64(args.id);

    service
        .delete_voucher_confirmed(voucher, args.confirm)
        .await
        .map_err(|error| format!("failed to delete voucher: {error}"))?;

    writeln!(out, "deleted voucher {voucher}").map_err(write_failed)
}

#[cfg(test)]
mod tests {
    use pricebook_app::domain::vouchers::{MockVouchersService, VouchersServiceError};
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn forwards_confirmation() -> TestResult {
        let mut service = MockVouchersService::new();

        service
            .expect_delete_voucher_confirmed()
            .once()
            .withf(|id, confirmation| {
                *id == VoucherId::from_i64(5) && confirmation == "Shopee · Voucher"
            })
            .return_once(|_, _| Ok(()));

        let mut out = Vec::new();

        run(
            DeleteVoucherArgs {
                id: 5,
                confirm: "Shopee · Voucher".to_string(),
            },
            &service,
            &mut out,
        )
        .await?;

        assert_eq!(String::from_utf8(out)?, "deleted voucher 5\n");

        Ok(())
    }

    #[tokio::test]
    async fn mismatch_shows_expected_text() {
        let mut service = MockVouchersService::new();

        service
            .expect_delete_voucher_confirmed()
            .once()
            .return_once(|_, _| {
                Err(VouchersServiceError::ConfirmationMismatch {
                    expected: "Shopee · Voucher".to_string(),
                })
            });

        let result = run(
            DeleteVoucherArgs {
                id: 5,
                confirm: "nope".to_string(),
            },
            &service,
            &mut Vec::new(),
        )
        .await;

        assert_eq!(
            result,
            Err(
                "failed to delete voucher: confirmation did not match, expected \"Shopee · Voucher\""
                    .to_string()
            )
        );
    }
}

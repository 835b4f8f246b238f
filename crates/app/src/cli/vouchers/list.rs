use std::io::Write;

use pricebook::money::{format_discount, format_money};
use pricebook_app::domain::vouchers::{VouchersService, records::VoucherRecord};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

use crate::cli::write_failed;

pub(crate) async fn run(service: &dyn VouchersService, out: &mut impl Write) -> Result<(), String> {
    let vouchers = service
        .list_vouchers()
        .await
        .map_err(|error| format!("failed to list vouchers: {error}"))?;

    if vouchers.is_empty() {
        return writeln!(out, "no vouchers found").map_err(write_failed);
    }

    writeln!(out, "{}", render(&vouchers)).map_err(write_failed)
}

fn render(vouchers: &[VoucherRecord]) -> String {
    let mut builder = Builder::default();

    builder.push_record([
        "ID",
        "Shop",
        "Type",
        "Discount",
        "Min Spend",
        "Max Discount",
        "Created",
    ]);

    for voucher in vouchers {
        builder.push_record([
            voucher.id.to_string(),
            voucher.shop_label().to_string(),
            voucher.type_label().to_string(),
            format_discount(voucher.discount),
            format_money(Some(voucher.min_spend_cents)),
            format_money(voucher.max_discount_cents),
            voucher.created_at.strftime("%Y-%m-%d %H:%M").to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(3..6), Alignment::right());

    table.to_string()
}

#[cfg(test)]
mod tests {
    use pricebook_app::domain::vouchers::{MockVouchersService, VouchersServiceError};
    use testresult::TestResult;

    use crate::cli::vouchers::fixtures::voucher;

    use super::*;

    #[tokio::test]
    async fn lists_vouchers_with_formatted_amounts() -> TestResult {
        let mut service = MockVouchersService::new();

        service
            .expect_list_vouchers()
            .once()
            .return_once(|| Ok(vec![voucher(7)]));

        let mut out = Vec::new();
        run(&service, &mut out).await?;

        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("20.00%"), "percentage discount should be shown");
        assert!(rendered.contains("$50.00"), "min spend should be shown");
        assert!(rendered.contains("$10.00"), "max discount should be shown");
        assert!(rendered.contains("Shopee"), "shop should be shown");
        assert!(rendered.contains("1970-01-01 00:00"), "created date should be shown");

        Ok(())
    }

    #[tokio::test]
    async fn empty_list_says_so() -> TestResult {
        let mut service = MockVouchersService::new();

        service
            .expect_list_vouchers()
            .once()
            .return_once(|| Ok(vec![]));

        let mut out = Vec::new();
        run(&service, &mut out).await?;

        assert_eq!(String::from_utf8(out)?, "no vouchers found\n");

        Ok(())
    }

    #[tokio::test]
    async fn service_error_is_reported() {
        let mut service = MockVouchersService::new();

        service
            .expect_list_vouchers()
            .once()
            .return_once(|| Err(VouchersServiceError::InvalidData));

        let result = run(&service, &mut Vec::new()).await;

        assert_eq!(result, Err("failed to list vouchers: invalid data".to_string()));
    }
}

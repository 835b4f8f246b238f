use std::io::Write;

use pricebook_app::{context::AppContext, domain::legacy::MigrationReport};

use crate::cli::write_failed;

pub(crate) async fn run(context: &AppContext, out: &mut impl Write) -> Result<(), String> {
    let report = context
        .legacy_money_migration()
        .run()
        .await
        .map_err(|error| format!("failed to normalize money: {error}"))?;

    write_report(out, &report).map_err(write_failed)
}

fn write_report(out: &mut impl Write, report: &MigrationReport) -> std::io::Result<()> {
    for column in &report.columns {
        writeln!(
            out,
            "{}.{}: {} of {} rows updated",
            column.table, column.column, column.updated, column.scanned
        )?;
    }

    writeln!(out, "total rows updated: {}", report.total_updated())
}

#[cfg(test)]
mod tests {
    use pricebook_app::domain::legacy::ColumnReport;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn report_lists_every_column_and_total() -> TestResult {
        let report = MigrationReport {
            columns: vec![
                ColumnReport {
                    table: "product_pricing",
                    column: "sell_price",
                    scanned: 4,
                    updated: 3,
                },
                ColumnReport {
                    table: "vouchers",
                    column: "discount",
                    scanned: 2,
                    updated: 0,
                },
            ],
        };

        let mut out = Vec::new();
        write_report(&mut out, &report)?;

        assert_eq!(
            String::from_utf8(out)?,
            "product_pricing.sell_price: 3 of 4 rows updated\n\
             vouchers.discount: 0 of 2 rows updated\n\
             total rows updated: 3\n"
        );

        Ok(())
    }
}

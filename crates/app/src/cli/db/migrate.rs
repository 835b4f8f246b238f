use std::io::Write;

use pricebook_app::{context::AppContext, database};

use crate::cli::write_failed;

pub(crate) async fn run(context: &AppContext, out: &mut impl Write) -> Result<(), String> {
    database::migrate(context.db.pool())
        .await
        .map_err(|error| format!("failed to apply migrations: {error}"))?;

    writeln!(out, "migrations applied").map_err(write_failed)
}

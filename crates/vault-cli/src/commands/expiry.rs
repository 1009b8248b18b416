//! Manual trigger for the expiry sweep.

use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use vault_core::config::AppConfig;
use vault_core::error::AppError;
use vault_core::traits::{Clock, SystemClock};
use vault_database::Stores;
use vault_service::ExpirySweep;
use vault_service::delivery::build_sender;

/// Arguments for check-expiry
#[derive(Debug, Args)]
pub struct CheckExpiryArgs {
    /// Reference date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Tabled)]
struct SweepRow {
    date: NaiveDate,
    scanned: u64,
    created: u64,
    emailed: u64,
    failures: u64,
}

/// Execute the sweep against the configured database and email channel.
pub async fn execute(args: &CheckExpiryArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let db = super::connect(config).await?;
    let stores = Stores::postgres(db.pool());
    let email = build_sender(&config.email)?;
    let sweep = ExpirySweep::new(stores.warranties, stores.notifications, stores.users, email);

    let date = args.date.unwrap_or_else(|| SystemClock.today());
    tracing::info!(%date, email = %config.email.provider, "Running expiry sweep");
    let report = sweep.run_sweep(date).await?;
    db.close().await;

    let row = SweepRow {
        date,
        scanned: report.warranties_scanned,
        created: report.notifications_created,
        emailed: report.emails_sent,
        failures: report.failures,
    };
    output::print_list(&[row], format);
    if report.failures > 0 {
        output::print_warning(&format!("{} warranties could not be processed", report.failures));
    }
    Ok(())
}

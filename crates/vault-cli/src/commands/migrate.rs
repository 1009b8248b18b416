//! Database migration management commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use vault_core::config::AppConfig;
use vault_core::error::AppError;
use vault_database::migration;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
    /// List the migrations bundled into this binary
    List,
}

#[derive(Debug, Serialize, Tabled)]
struct MigrationRow {
    version: i64,
    description: String,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        MigrateCommand::Run => {
            let db = super::connect(config).await?;
            println!("Running database migrations...");
            migration::run_migrations(db.pool()).await?;
            db.close().await;
            output::print_success("All migrations applied successfully.");
        }
        MigrateCommand::List => {
            let rows: Vec<MigrationRow> = migration::embedded()
                .into_iter()
                .map(|(version, description)| MigrationRow { version, description })
                .collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}

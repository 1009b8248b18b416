//! Configuration inspection CLI commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use vault_core::config::AppConfig;
use vault_core::error::AppError;
use vault_database::connection::mask_password;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration with secrets masked
    Show,
    /// Summarize the configuration and flag risky settings
    Validate,
}

/// Execute config commands
pub fn execute(
    args: &ConfigArgs,
    config: &AppConfig,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            output::print_item(&redacted(config), format);
        }
        ConfigCommand::Validate => {
            output::print_success(&format!("Configuration '{config_path}' loaded"));
            output::print_kv("Server", &format!("{}:{}", config.server.host, config.server.port));
            output::print_kv("Database", &mask_password(&config.database.url));
            output::print_kv("Email provider", &config.email.provider);
            output::print_kv("OCR enabled", &config.ocr.enabled.to_string());
            output::print_kv("Worker enabled", &config.worker.enabled.to_string());
            if config.cron.secret.as_deref().is_none_or(str::is_empty) {
                output::print_warning("cron.secret is not set; /api/cron/check-expiry is open");
            }
            if config.auth.jwt_secret.len() < 32 {
                output::print_warning("auth.jwt_secret is shorter than 32 bytes");
            }
        }
    }

    Ok(())
}

fn redacted(config: &AppConfig) -> AppConfig {
    let mut config = config.clone();
    config.database.url = mask_password(&config.database.url);
    config.auth.jwt_secret = "****".to_string();
    if !config.email.http.api_key.is_empty() {
        config.email.http.api_key = "****".to_string();
    }
    if !config.ocr.api_key.is_empty() {
        config.ocr.api_key = "****".to_string();
    }
    if config.cron.secret.is_some() {
        config.cron.secret = Some("****".to_string());
    }
    config
}

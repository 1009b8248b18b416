//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! `config/default.toml`, an optional environment overlay and `VAULT__*`
//! environment variables. Every field carries a serde default so the server
//! can start without any file present.

pub mod app;
pub mod auth;
pub mod database;
pub mod email;
pub mod logging;
pub mod ocr;
pub mod storage;
pub mod worker;

use serde::{Deserialize, Serialize};

use self::app::ServerConfig;
use self::auth::AuthConfig;
use self::database::DatabaseConfig;
use self::email::EmailConfig;
use self::logging::LoggingConfig;
use self::ocr::OcrConfig;
use self::storage::StorageConfig;
use self::worker::{CronConfig, WorkerConfig};

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Token and password settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Receipt file storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Outbound email settings.
    #[serde(default)]
    pub email: EmailConfig,
    /// Receipt OCR settings.
    #[serde(default)]
    pub ocr: OcrConfig,
    /// External sweep trigger settings.
    #[serde(default)]
    pub cron: CronConfig,
    /// In-process scheduler settings.
    #[serde(default)]
    pub worker: WorkerConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration for the named environment.
    ///
    /// Sources, lowest precedence first: `config/default`, `config/{env}`,
    /// then environment variables such as `VAULT__DATABASE__URL`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from("config/default", env)
    }

    /// Load configuration with an explicit base file path (without extension).
    pub fn load_from(base: &str, env: &str) -> Result<Self, AppError> {
        let overlay = match base.rsplit_once('/') {
            Some((dir, _)) => format!("{dir}/{env}"),
            None => env.to_string(),
        };

        let config = config::Config::builder()
            .add_source(config::File::with_name(base).required(false))
            .add_source(config::File::with_name(&overlay).required(false))
            .add_source(
                config::Environment::with_prefix("VAULT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable_without_files() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.auth.access_token_ttl_minutes, 24 * 60);
        assert_eq!(cfg.auth.refresh_token_ttl_days, 7);
        assert_eq!(cfg.auth.password_min_length, 8);
        assert!(!cfg.worker.enabled);
        assert!(cfg.cron.secret.is_none());
        assert_eq!(cfg.email.provider, "log");
    }

    #[test]
    fn missing_files_fall_back_to_defaults() {
        let cfg = AppConfig::load_from("does/not/exist/default", "test").expect("load");
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.storage.data_root, "./data");
    }
}

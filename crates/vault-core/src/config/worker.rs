//! Sweep scheduling configuration.

use serde::{Deserialize, Serialize};

/// In-process cron scheduler. Disabled by default; the usual deployment
/// triggers the sweep externally through `/api/cron/check-expiry`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the in-process scheduler runs.
    #[serde(default)]
    pub enabled: bool,
    /// Six-field cron expression (with seconds) for the daily expiry sweep.
    #[serde(default = "default_expiry_cron")]
    pub expiry_check_cron: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            expiry_check_cron: default_expiry_cron(),
        }
    }
}

/// External trigger endpoint settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CronConfig {
    /// Shared secret expected in the `X-Cron-Secret` header. When unset the
    /// endpoint is open.
    #[serde(default)]
    pub secret: Option<String>,
}

fn default_expiry_cron() -> String {
    "0 0 8 * * *".to_string()
}

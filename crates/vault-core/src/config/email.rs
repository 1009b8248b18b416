//! Outbound email configuration.

use serde::{Deserialize, Serialize};

/// Email delivery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Delivery provider: `"log"`, `"http"` or `"disabled"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Sender address, e.g. `Warranty Vault <noreply@example.com>`.
    #[serde(default = "default_from")]
    pub from_address: String,
    /// HTTP relay settings, used when `provider = "http"`.
    #[serde(default)]
    pub http: HttpEmailConfig,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            from_address: default_from(),
            http: HttpEmailConfig::default(),
        }
    }
}

/// JSON-over-HTTP mail relay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpEmailConfig {
    /// Relay endpoint receiving `{from, to, subject, text, html}`.
    #[serde(default)]
    pub endpoint: String,
    /// Bearer API key for the relay.
    #[serde(default)]
    pub api_key: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for HttpEmailConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_provider() -> String {
    "log".to_string()
}

fn default_from() -> String {
    "Warranty Vault <noreply@warrantyvault.local>".to_string()
}

fn default_timeout() -> u64 {
    10
}

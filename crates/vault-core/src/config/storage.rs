//! Receipt storage configuration.

use serde::{Deserialize, Serialize};

/// Local filesystem storage for uploaded receipt documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory for all runtime data. Receipts live under
    /// `<data_root>/receipts/YYYY/MM/`.
    #[serde(default = "default_data_root")]
    pub data_root: String,
    /// Maximum accepted receipt size in bytes.
    #[serde(default = "default_max_receipt")]
    pub max_receipt_size_bytes: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_root: default_data_root(),
            max_receipt_size_bytes: default_max_receipt(),
        }
    }
}

fn default_data_root() -> String {
    "./data".to_string()
}

fn default_max_receipt() -> usize {
    10 * 1024 * 1024
}

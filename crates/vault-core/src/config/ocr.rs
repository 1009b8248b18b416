//! Receipt OCR configuration.

use serde::{Deserialize, Serialize};

/// Text extraction backend for receipt scanning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrConfig {
    /// Whether receipt scanning is available.
    #[serde(default)]
    pub enabled: bool,
    /// OCR.space compatible endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// API key for the OCR endpoint.
    #[serde(default)]
    pub api_key: String,
    /// OCR language code.
    #[serde(default = "default_language")]
    pub language: String,
    /// Engine number passed to the OCR endpoint.
    #[serde(default = "default_engine")]
    pub engine: u8,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_endpoint(),
            api_key: String::new(),
            language: default_language(),
            engine: default_engine(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_endpoint() -> String {
    "https://api.ocr.space/parse/image".to_string()
}

fn default_language() -> String {
    "eng".to_string()
}

fn default_engine() -> u8 {
    2
}

fn default_timeout() -> u64 {
    30
}

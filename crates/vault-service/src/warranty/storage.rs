//! Receipt documents on the local filesystem.

use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use tokio::fs;
use tracing::{debug, warn};
use uuid::Uuid;

use vault_core::config::storage::StorageConfig;
use vault_core::error::{AppError, ErrorKind};
use vault_core::result::AppResult;

/// Directory under the data root holding receipts.
pub const RECEIPTS_DIR: &str = "receipts";

/// Writes receipts to `<data_root>/receipts/YYYY/MM/<uuid>.<ext>` and hands
/// back the path relative to the data root.
#[derive(Debug, Clone)]
pub struct ReceiptStorage {
    root: PathBuf,
    max_size_bytes: usize,
}

impl ReceiptStorage {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            root: PathBuf::from(&config.data_root),
            max_size_bytes: config.max_receipt_size_bytes,
        }
    }

    /// Directory served under `/media`.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn max_size_bytes(&self) -> usize {
        self.max_size_bytes
    }

    /// Store `bytes` as a new receipt uploaded on `day`.
    pub async fn save(&self, extension: &str, bytes: &[u8], day: NaiveDate) -> AppResult<String> {
        if bytes.is_empty() {
            return Err(AppError::validation("Receipt file is empty"));
        }
        if bytes.len() > self.max_size_bytes {
            return Err(AppError::validation(format!(
                "Receipt file exceeds the {} byte limit",
                self.max_size_bytes
            )));
        }

        let relative = format!(
            "{RECEIPTS_DIR}/{:04}/{:02}/{}.{extension}",
            day.year(),
            day.month(),
            Uuid::new_v4()
        );
        let full = self.root.join(&relative);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create receipt directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        fs::write(&full, bytes).await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, format!("Failed to write receipt: {relative}"), e)
        })?;

        debug!(path = %relative, bytes = bytes.len(), "Stored receipt");
        Ok(relative)
    }

    /// Best-effort delete; failures are only logged.
    pub async fn remove(&self, relative: &str) {
        if relative.split('/').any(|part| part == "..") {
            warn!(path = relative, "Refusing to delete path outside the data root");
            return;
        }
        let full = self.root.join(relative);
        match fs::remove_file(&full).await {
            Ok(()) => debug!(path = relative, "Removed receipt"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = relative, error = %e, "Failed to remove receipt"),
        }
    }
}

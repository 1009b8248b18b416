//! Receipt scanning: text extraction plus field heuristics.
//!
//! A scan only suggests values. Nothing is stored; the client submits the
//! fields through the normal warranty create path.

pub mod extractor;
pub mod parser;

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use vault_core::error::AppError;
use vault_core::result::AppResult;
use vault_core::traits::Clock;
use vault_entity::warranty::WarrantyCategory;

pub use extractor::{DisabledExtractor, OcrSpaceExtractor, TextExtractor, build_extractor};

/// File extensions accepted for scanning and receipt upload.
pub const ALLOWED_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "pdf", "bmp", "tiff"];

/// Lowercased extension of `filename` if it is on the allow-list.
pub fn receipt_extension(filename: &str) -> AppResult<String> {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    if ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(AppError::validation(format!(
            "Unsupported file type. Allowed types: {}",
            ALLOWED_EXTENSIONS.join(", ")
        )))
    }
}

/// Suggested warranty fields read from a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptScan {
    pub product_name: String,
    pub brand: String,
    pub purchase_date: NaiveDate,
    /// Months.
    pub warranty_period: u32,
    pub category: WarrantyCategory,
    /// 0 to 100.
    pub confidence: u8,
    /// Leading part of the raw extracted text.
    pub extracted_text: String,
}

/// Extracts text with the configured backend and applies the heuristics.
#[derive(Clone)]
pub struct ReceiptScanner {
    extractor: Arc<dyn TextExtractor>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for ReceiptScanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReceiptScanner")
            .field("extractor", &self.extractor.name())
            .finish_non_exhaustive()
    }
}

impl ReceiptScanner {
    pub fn new(extractor: Arc<dyn TextExtractor>, clock: Arc<dyn Clock>) -> Self {
        Self { extractor, clock }
    }

    /// Scan an uploaded document. `extension` must come from
    /// [`receipt_extension`].
    pub async fn extract(&self, bytes: &[u8], extension: &str) -> AppResult<ReceiptScan> {
        if !ALLOWED_EXTENSIONS.contains(&extension) {
            return Err(AppError::validation(format!("Unsupported file type: {extension}")));
        }
        let text = self.extractor.extract_text(bytes, extension).await?;
        let scan = parser::parse_receipt(&text, self.clock.today());
        info!(
            extractor = self.extractor.name(),
            confidence = scan.confidence,
            category = %scan.category,
            "Receipt scanned"
        );
        Ok(scan)
    }
}

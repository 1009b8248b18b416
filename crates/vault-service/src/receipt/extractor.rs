//! Text extraction backends for receipt scanning.

use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::ImageFormat;
use serde::Deserialize;
use tracing::{debug, warn};

use vault_core::config::ocr::OcrConfig;
use vault_core::error::{AppError, ErrorKind};
use vault_core::result::AppResult;

/// Turns an uploaded document into plain text.
#[async_trait]
pub trait TextExtractor: Send + Sync + 'static {
    /// `extension` is already lowercased and on the allow-list.
    async fn extract_text(&self, bytes: &[u8], extension: &str) -> AppResult<String>;

    fn name(&self) -> &'static str;
}

/// Pick the extractor for the configured OCR settings.
pub fn build_extractor(config: &OcrConfig) -> AppResult<Arc<dyn TextExtractor>> {
    if !config.enabled {
        return Ok(Arc::new(DisabledExtractor));
    }
    Ok(Arc::new(OcrSpaceExtractor::new(config)?))
}

/// Used when OCR is switched off; every call fails with 503.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledExtractor;

#[async_trait]
impl TextExtractor for DisabledExtractor {
    async fn extract_text(&self, _bytes: &[u8], _extension: &str) -> AppResult<String> {
        Err(AppError::service_unavailable(
            "Receipt scanning is not configured. Set ocr.enabled and ocr.api_key to turn it on.",
        ))
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}

/// Client for an OCR.space compatible `parse/image` endpoint.
#[derive(Clone)]
pub struct OcrSpaceExtractor {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    language: String,
    engine: u8,
}

impl std::fmt::Debug for OcrSpaceExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OcrSpaceExtractor")
            .field("endpoint", &self.endpoint)
            .field("language", &self.language)
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OcrSpaceResponse {
    #[serde(default)]
    parsed_results: Vec<ParsedResult>,
    #[serde(default)]
    is_errored_on_processing: bool,
    #[serde(default)]
    error_message: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ParsedResult {
    #[serde(default)]
    parsed_text: String,
}

impl OcrSpaceExtractor {
    pub fn new(config: &OcrConfig) -> AppResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(AppError::configuration(
                "ocr.api_key must be set when ocr.enabled = true",
            ));
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            language: config.language.clone(),
            engine: config.engine,
        })
    }
}

#[async_trait]
impl TextExtractor for OcrSpaceExtractor {
    async fn extract_text(&self, bytes: &[u8], extension: &str) -> AppResult<String> {
        let payload = encode_document(bytes, extension);
        let engine = self.engine.to_string();
        let form = [
            ("apikey", self.api_key.as_str()),
            ("base64Image", payload.as_str()),
            ("language", self.language.as_str()),
            ("OCREngine", engine.as_str()),
            ("isOverlayRequired", "false"),
            ("detectOrientation", "true"),
            ("scale", "true"),
        ];

        let response = self
            .client
            .post(&self.endpoint)
            .form(&form)
            .send()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::ExternalService, "OCR service unreachable", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::external(format!("OCR service returned status {status}")));
        }

        let body: OcrSpaceResponse = response.json().await.map_err(|e| {
            AppError::with_source(ErrorKind::ExternalService, "OCR service sent an unreadable response", e)
        })?;

        if body.is_errored_on_processing {
            let detail = body
                .error_message
                .as_ref()
                .map(render_error_message)
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(AppError::external(format!("OCR error: {detail}")));
        }

        let text = body
            .parsed_results
            .into_iter()
            .next()
            .map(|r| r.parsed_text)
            .ok_or_else(|| AppError::external("No text extracted from document"))?;
        debug!(chars = text.len(), "OCR text extracted");
        Ok(text)
    }

    fn name(&self) -> &'static str {
        "ocr_space"
    }
}

/// Data URL for the upload. Images are re-encoded as grayscale PNG; PDFs
/// and undecodable images go out untouched.
fn encode_document(bytes: &[u8], extension: &str) -> String {
    if extension == "pdf" {
        return format!("data:application/pdf;base64,{}", STANDARD.encode(bytes));
    }
    match grayscale_png(bytes) {
        Ok(png) => format!("data:image/png;base64,{}", STANDARD.encode(png)),
        Err(e) => {
            warn!(error = %e, extension, "Image normalisation failed; sending original bytes");
            let mime = match extension {
                "jpg" | "jpeg" => "image/jpeg",
                "bmp" => "image/bmp",
                "tiff" => "image/tiff",
                _ => "image/png",
            };
            format!("data:{mime};base64,{}", STANDARD.encode(bytes))
        }
    }
}

fn grayscale_png(bytes: &[u8]) -> Result<Vec<u8>, image::ImageError> {
    let gray = image::load_from_memory(bytes)?.grayscale();
    let mut out = Vec::new();
    gray.write_to(&mut Cursor::new(&mut out), ImageFormat::Png)?;
    Ok(out)
}

fn render_error_message(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Array(items) => items
            .iter()
            .filter_map(serde_json::Value::as_str)
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_string(),
    }
}

//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::NaiveDate;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use vault_api::{AppState, build_app};
use vault_core::config::AppConfig;
use vault_core::result::AppResult;
use vault_core::traits::FixedClock;
use vault_database::{MemoryStore, Stores};
use vault_service::delivery::{EmailSender, OutgoingEmail};
use vault_service::receipt::TextExtractor;

pub const PASSWORD: &str = "Sturdy-Pass-2026";

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Default reference date for tests.
pub fn today() -> NaiveDate {
    date(2026, 3, 1)
}

/// Email sender that keeps every message it is given.
#[derive(Debug, Default)]
pub struct RecordingEmail {
    pub sent: Mutex<Vec<OutgoingEmail>>,
}

impl RecordingEmail {
    pub fn count(&self) -> usize {
        self.sent.lock().expect("lock").len()
    }
}

#[async_trait]
impl EmailSender for RecordingEmail {
    async fn send(&self, email: &OutgoingEmail) -> AppResult<()> {
        self.sent.lock().expect("lock").push(email.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// Extractor that returns canned text for any document.
#[derive(Debug, Clone)]
pub struct CannedText(pub String);

#[async_trait]
impl TextExtractor for CannedText {
    async fn extract_text(&self, _bytes: &[u8], _extension: &str) -> AppResult<String> {
        Ok(self.0.clone())
    }

    fn name(&self) -> &'static str {
        "canned"
    }
}

pub const RECEIPT_TEXT: &str = "Galaxy Tab S9 Tablet\n\
BRAND: Samsung\n\
Date: 03/15/2025\n\
Warranty: 2 years\n\
Total: 799.00";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared in-memory storage
    pub store: MemoryStore,
    /// Emails handed to the delivery channel
    pub email: Arc<RecordingEmail>,
    /// Application config
    pub config: AppConfig,
    /// Receipt storage root, removed on drop
    data: Arc<TempDir>,
}

impl TestApp {
    /// Fresh store pinned to [`today`].
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let data = Arc::new(tempfile::tempdir().expect("tempdir"));
        Self::build(MemoryStore::new(), today(), config, Arc::new(RecordingEmail::default()), data)
    }

    /// Same store, email recorder and files, viewed on another day.
    pub fn on(&self, day: NaiveDate) -> Self {
        Self::build(
            self.store.clone(),
            day,
            self.config.clone(),
            Arc::clone(&self.email),
            Arc::clone(&self.data),
        )
    }

    fn build(
        store: MemoryStore,
        day: NaiveDate,
        mut config: AppConfig,
        email: Arc<RecordingEmail>,
        data: Arc<TempDir>,
    ) -> Self {
        config.storage.data_root = data.path().to_string_lossy().into_owned();
        config.auth.jwt_secret = "integration-test-secret-with-enough-bytes".to_string();

        let state = AppState::new(
            config.clone(),
            Arc::new(FixedClock::new(day)),
            Stores::memory(&store),
            Arc::clone(&email) as Arc<dyn EmailSender>,
            Arc::new(CannedText(RECEIPT_TEXT.to_string())),
        );

        Self {
            router: build_app(state),
            store,
            email,
            config,
            data,
        }
    }

    /// Register an account and return its access token.
    pub async fn register(&self, email: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/register",
                Some(serde_json::json!({
                    "email": email,
                    "name": "Test User",
                    "password": PASSWORD,
                    "password2": PASSWORD,
                })),
                None,
            )
            .await;

        assert_eq!(response.status, StatusCode::CREATED, "Register failed: {:?}", response.body);
        response.str("access").to_string()
    }

    /// Create a warranty and return its JSON body.
    pub async fn create_warranty(&self, token: &str, body: Value) -> Value {
        let response = self.request("POST", "/api/warranties", Some(body), Some(token)).await;
        assert_eq!(response.status, StatusCode::CREATED, "Create failed: {:?}", response.body);
        response.body
    }

    /// Make an HTTP request to the test app
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>, token: Option<&str>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req.body(Body::from(body_str)).expect("Failed to build request");
        self.send(req).await
    }

    /// Upload `bytes` as the multipart field `file`.
    pub async fn upload(&self, path: &str, filename: &str, bytes: &[u8], token: &str) -> TestResponse {
        let boundary = "vault-test-boundary";
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", format!("multipart/form-data; boundary={boundary}"))
            .header("Authorization", format!("Bearer {}", token))
            .body(Body::from(body))
            .expect("Failed to build request");
        self.send(req).await
    }

    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(req).await.expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    pub fn str(&self, key: &str) -> &str {
        self.body
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_else(|| panic!("missing string '{key}' in {:?}", self.body))
    }
}

//! Integration tests for the external expiry trigger and health probe.

mod helpers;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use helpers::TestApp;
use vault_core::config::AppConfig;

const SECRET: &str = "cron-trigger-secret";

fn guarded() -> TestApp {
    let mut config = AppConfig::default();
    config.cron.secret = Some(SECRET.to_string());
    TestApp::with_config(config)
}

fn trigger(method: &str, secret: Option<&str>) -> Request<Body> {
    let mut req = Request::builder().method(method).uri("/api/cron/check-expiry");
    if let Some(secret) = secret {
        req = req.header("X-Cron-Secret", secret);
    }
    req.body(Body::empty()).expect("request")
}

#[tokio::test]
async fn missing_secret_is_rejected() {
    let app = guarded();
    let response = app.send(trigger("POST", None)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn wrong_secret_is_rejected() {
    let app = guarded();
    let response = app.send(trigger("GET", Some("guess"))).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn correct_secret_runs_sweep() {
    let app = guarded();
    for method in ["GET", "POST"] {
        let response = app.send(trigger(method, Some(SECRET))).await;
        assert_eq!(response.status, StatusCode::OK, "{method}: {:?}", response.body);
        assert_eq!(response.body["status"], "success");
        assert_eq!(response.body["notifications_created"], 0);
        assert_eq!(response.body["emails_sent"], 0);
        assert_eq!(response.body["failures"], 0);
        assert!(response.body["message"].is_string());
    }
}

#[tokio::test]
async fn open_when_no_secret_configured() {
    let app = TestApp::new();
    let response = app.send(trigger("GET", None)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn health_reports_version() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert!(response.body["version"].is_string());
}

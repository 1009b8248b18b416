//! Integration tests for the account flow.

mod helpers;

use axum::http::StatusCode;
use helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn register_returns_user_and_tokens() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "Owner@Example.com",
                "name": "Owner",
                "password": PASSWORD,
                "password2": PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["user"]["email"], "owner@example.com");
    assert!(response.body["user"].get("password_hash").is_none());
    assert!(!response.str("access").is_empty());
    assert!(!response.str("refresh").is_empty());
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let app = TestApp::new();
    app.register("dup@example.com").await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "DUP@example.com",
                "name": "Again",
                "password": PASSWORD,
                "password2": PASSWORD,
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn mismatched_confirmation_is_rejected() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "a@example.com",
                "name": "A",
                "password": PASSWORD,
                "password2": "something-else-2026",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn invalid_email_reports_field_details() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "not-an-email",
                "name": "A",
                "password": PASSWORD,
                "password2": PASSWORD,
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["details"]["email"].is_array());
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let app = TestApp::new();
    app.register("known@example.com").await;

    let wrong_password = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({"email": "known@example.com", "password": "wrong-password"})),
            None,
        )
        .await;
    let unknown_user = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({"email": "nobody@example.com", "password": PASSWORD})),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, unknown_user.body);
    assert_eq!(wrong_password.body["message"], "Invalid credentials");
}

#[tokio::test]
async fn login_succeeds_with_correct_password() {
    let app = TestApp::new();
    app.register("me@example.com").await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({"email": " ME@example.com ", "password": PASSWORD})),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user"]["email"], "me@example.com");
}

#[tokio::test]
async fn refresh_rotates_tokens() {
    let app = TestApp::new();
    let login = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "r@example.com",
                "name": "R",
                "password": PASSWORD,
                "password2": PASSWORD,
            })),
            None,
        )
        .await;
    let refresh = login.str("refresh").to_string();

    let response = app
        .request(
            "POST",
            "/api/auth/token/refresh",
            Some(serde_json::json!({"refresh": refresh})),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(!response.str("access").is_empty());
    assert!(!response.str("refresh").is_empty());
}

#[tokio::test]
async fn refresh_requires_a_token() {
    let app = TestApp::new();
    let missing = app
        .request("POST", "/api/auth/token/refresh", Some(serde_json::json!({})), None)
        .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);

    let invalid = app
        .request(
            "POST",
            "/api/auth/token/refresh",
            Some(serde_json::json!({"refresh": "garbage"})),
            None,
        )
        .await;
    assert_eq!(invalid.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn access_token_is_not_a_refresh_token() {
    let app = TestApp::new();
    let access = app.register("mixup@example.com").await;
    let response = app
        .request(
            "POST",
            "/api/auth/token/refresh",
            Some(serde_json::json!({"refresh": access})),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn profile_requires_authentication() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/auth/profile", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request("GET", "/api/auth/profile", None, Some("not-a-jwt"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn profile_can_be_updated() {
    let app = TestApp::new();
    let token = app.register("p@example.com").await;

    let response = app
        .request(
            "PATCH",
            "/api/auth/profile",
            Some(serde_json::json!({"name": "Renamed", "avatar": "https://img.example.com/a.png"})),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["name"], "Renamed");
    assert_eq!(response.body["avatar"], "https://img.example.com/a.png");

    let cleared = app
        .request(
            "PATCH",
            "/api/auth/profile",
            Some(serde_json::json!({"avatar": null})),
            Some(&token),
        )
        .await;
    assert_eq!(cleared.status, StatusCode::OK);
    assert_eq!(cleared.body["avatar"], serde_json::Value::Null);
    assert_eq!(cleared.body["name"], "Renamed");
}

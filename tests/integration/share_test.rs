//! Integration tests for the public share view.

mod helpers;

use axum::http::StatusCode;
use helpers::TestApp;
use serde_json::json;

async fn shared(app: &TestApp) -> String {
    let token = app.register("sharer@example.com").await;
    let body = app
        .create_warranty(
            &token,
            json!({
                "product_name": "Espresso Machine",
                "brand": "Crema",
                "category": "Home Appliances",
                "purchase_date": "2025-09-01",
                "warranty_period": 2,
                "warranty_period_unit": "years",
                "notes": "kept under the counter",
            }),
        )
        .await;
    body["share_token"].as_str().expect("share_token").to_string()
}

#[tokio::test]
async fn share_view_is_public() {
    let app = TestApp::new();
    let token = shared(&app).await;

    let response = app.request("GET", &format!("/api/share/{token}"), None, None).await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["product_name"], "Espresso Machine");
    assert_eq!(response.body["brand"], "Crema");
    assert_eq!(response.body["expiry_date"], "2027-09-01");
    assert_eq!(response.body["status"], "Active");
    assert_eq!(response.body["warranty_period_unit"], "years");
}

#[tokio::test]
async fn share_view_hides_private_fields() {
    let app = TestApp::new();
    let token = shared(&app).await;

    let response = app.request("GET", &format!("/api/share/{token}"), None, None).await;
    let body = response.body.as_object().expect("object");
    for hidden in ["id", "user_id", "user_email", "share_token", "notes"] {
        assert!(!body.contains_key(hidden), "leaked {hidden}");
    }
}

#[tokio::test]
async fn both_share_routes_agree() {
    let app = TestApp::new();
    let token = shared(&app).await;

    let a = app.request("GET", &format!("/api/share/{token}"), None, None).await;
    let b = app.request("GET", &format!("/api/warranty/{token}"), None, None).await;
    assert_eq!(b.status, StatusCode::OK);
    assert_eq!(a.body, b.body);
}

#[tokio::test]
async fn unknown_or_malformed_token_is_not_found() {
    let app = TestApp::new();
    shared(&app).await;

    let unknown = app
        .request("GET", "/api/share/5b0c3f5e-2d1a-4c1e-9f3b-7a6d8e9f0a1b", None, None)
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown.body["error"], "NOT_FOUND");

    let malformed = app.request("GET", "/api/share/not-a-token", None, None).await;
    assert_eq!(malformed.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleted_warranty_is_no_longer_shared() {
    let app = TestApp::new();
    let owner = app.register("gone@example.com").await;
    let body = app
        .create_warranty(
            &owner,
            json!({
                "product_name": "Router",
                "brand": "Netly",
                "purchase_date": "2025-12-01",
            }),
        )
        .await;
    let id = body["id"].as_str().expect("id");
    let token = body["share_token"].as_str().expect("share_token");

    let deleted = app
        .request("DELETE", &format!("/api/warranties/{id}"), None, Some(&owner))
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let response = app.request("GET", &format!("/api/share/{token}"), None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

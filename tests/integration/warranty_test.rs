//! Integration tests for warranty records.

mod helpers;

use axum::http::StatusCode;
use helpers::{TestApp, date};
use serde_json::json;

fn laptop() -> serde_json::Value {
    json!({
        "product_name": "ThinkPad X1",
        "brand": "Lenovo",
        "category": "Electronics",
        "purchase_date": "2025-06-15",
        "warranty_period": 12,
    })
}

#[tokio::test]
async fn create_computes_expiry_and_status() {
    let app = TestApp::new();
    let token = app.register("w@example.com").await;

    let body = app.create_warranty(&token, laptop()).await;
    assert_eq!(body["expiry_date"], "2026-06-15");
    assert_eq!(body["warranty_period_unit"], "months");
    assert_eq!(body["status"], "Active");
    assert_eq!(body["days_remaining"], 106);
    assert_eq!(body["user_email"], "w@example.com");
    assert_eq!(body["notes"], "");
    assert!(body["share_token"].is_string());
    assert_eq!(body["receipt_file_url"], serde_json::Value::Null);
}

#[tokio::test]
async fn month_end_purchase_clamps() {
    let app = TestApp::new();
    let token = app.register("clamp@example.com").await;

    let body = app
        .create_warranty(
            &token,
            json!({
                "product_name": "Blender",
                "brand": "Vitamix",
                "purchase_date": "2024-01-31",
                "warranty_period": 1,
            }),
        )
        .await;
    assert_eq!(body["expiry_date"], "2024-02-29");
    assert_eq!(body["status"], "Expired");
    assert_eq!(body["days_remaining"], 0);
    assert_eq!(body["category"], "Other");
}

#[tokio::test]
async fn day_unit_counts_calendar_days() {
    let app = TestApp::new();
    let token = app.register("days@example.com").await;

    let body = app
        .create_warranty(
            &token,
            json!({
                "product_name": "Kettle",
                "brand": "Breville",
                "category": "Home Appliances",
                "purchase_date": "2026-02-20",
                "warranty_period": 30,
                "warranty_period_unit": "days",
            }),
        )
        .await;
    assert_eq!(body["expiry_date"], "2026-03-22");
    assert_eq!(body["status"], "Expiring Soon");
    assert_eq!(body["days_remaining"], 21);
    assert_eq!(body["category"], "Home Appliances");
}

#[tokio::test]
async fn explicit_expiry_is_kept() {
    let app = TestApp::new();
    let token = app.register("explicit@example.com").await;

    let mut req = laptop();
    req["expiry_date"] = json!("2027-01-01");
    let body = app.create_warranty(&token, req).await;
    assert_eq!(body["expiry_date"], "2027-01-01");
}

#[tokio::test]
async fn invalid_payloads_are_rejected() {
    let app = TestApp::new();
    let token = app.register("bad@example.com").await;

    let mut zero = laptop();
    zero["warranty_period"] = json!(0);
    let response = app.request("POST", "/api/warranties", Some(zero), Some(&token)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["details"]["warranty_period"].is_array());

    let mut category = laptop();
    category["category"] = json!("Groceries");
    let response = app
        .request("POST", "/api/warranties", Some(category), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let mut long_name = laptop();
    long_name["product_name"] = json!("x".repeat(201));
    let response = app
        .request("POST", "/api/warranties", Some(long_name), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_is_newest_first_and_owner_scoped() {
    let app = TestApp::new();
    let alice = app.register("alice@example.com").await;
    let bob = app.register("bob@example.com").await;

    let mut first = laptop();
    first["product_name"] = json!("First");
    app.create_warranty(&alice, first).await;
    let mut second = laptop();
    second["product_name"] = json!("Second");
    app.create_warranty(&alice, second).await;
    app.create_warranty(&bob, laptop()).await;

    let response = app.request("GET", "/api/warranties", None, Some(&alice)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["total_items"], 2);
    let items = response.body["items"].as_array().expect("items");
    assert_eq!(items[0]["product_name"], "Second");
    assert_eq!(items[1]["product_name"], "First");
    assert!(items[0].get("notes").is_none());
    assert!(items[0]["share_token"].is_string());
}

#[tokio::test]
async fn other_users_records_are_not_found() {
    let app = TestApp::new();
    let alice = app.register("a1@example.com").await;
    let bob = app.register("b1@example.com").await;

    let body = app.create_warranty(&alice, laptop()).await;
    let path = format!("/api/warranties/{}", body["id"].as_str().expect("id"));

    assert_eq!(app.request("GET", &path, None, Some(&bob)).await.status, StatusCode::NOT_FOUND);
    assert_eq!(app.request("DELETE", &path, None, Some(&bob)).await.status, StatusCode::NOT_FOUND);
    assert_eq!(app.request("GET", &path, None, Some(&alice)).await.status, StatusCode::OK);
}

#[tokio::test]
async fn changing_period_recomputes_unless_overridden() {
    let app = TestApp::new();
    let token = app.register("upd@example.com").await;
    let body = app.create_warranty(&token, laptop()).await;
    let path = format!("/api/warranties/{}", body["id"].as_str().expect("id"));

    // Period change carrying the stale calculated expiry recomputes.
    let response = app
        .request(
            "PATCH",
            &path,
            Some(json!({"warranty_period": 24, "expiry_date": "2026-06-15"})),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["expiry_date"], "2027-06-15");

    // A manual expiry alongside a period change wins.
    let response = app
        .request(
            "PATCH",
            &path,
            Some(json!({"warranty_period": 36, "expiry_date": "2027-12-31"})),
            Some(&token),
        )
        .await;
    assert_eq!(response.body["expiry_date"], "2027-12-31");

    // The override survives edits that don't touch the inputs.
    let response = app
        .request("PATCH", &path, Some(json!({"notes": "under the desk"})), Some(&token))
        .await;
    assert_eq!(response.body["expiry_date"], "2027-12-31");
    assert_eq!(response.body["notes"], "under the desk");
}

#[tokio::test]
async fn full_replace_without_expiry_recomputes() {
    let app = TestApp::new();
    let token = app.register("put@example.com").await;
    let body = app.create_warranty(&token, laptop()).await;
    let path = format!("/api/warranties/{}", body["id"].as_str().expect("id"));

    let response = app
        .request(
            "PUT",
            &path,
            Some(json!({
                "product_name": "ThinkPad X1 Carbon",
                "brand": "Lenovo",
                "category": "Electronics",
                "purchase_date": "2025-06-15",
                "warranty_period": 18,
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["product_name"], "ThinkPad X1 Carbon");
    assert_eq!(response.body["expiry_date"], "2026-12-15");
}

#[tokio::test]
async fn delete_returns_no_content() {
    let app = TestApp::new();
    let token = app.register("del@example.com").await;
    let body = app.create_warranty(&token, laptop()).await;
    let path = format!("/api/warranties/{}", body["id"].as_str().expect("id"));

    assert_eq!(app.request("DELETE", &path, None, Some(&token)).await.status, StatusCode::NO_CONTENT);
    assert_eq!(app.request("GET", &path, None, Some(&token)).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stats_bucket_by_status() {
    let app = TestApp::new();
    let token = app.register("stats@example.com").await;

    for (purchase, period) in [("2025-06-15", 12), ("2025-03-10", 12), ("2024-01-01", 12)] {
        app.create_warranty(
            &token,
            json!({
                "product_name": "Item",
                "brand": "Brand",
                "purchase_date": purchase,
                "warranty_period": period,
            }),
        )
        .await;
    }

    let response = app.request("GET", "/api/warranties/stats", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["total_warranties"], 3);
    assert_eq!(response.body["active_warranties"], 1);
    assert_eq!(response.body["expiring_soon"], 1);
    assert_eq!(response.body["expired_warranties"], 1);
}

#[tokio::test]
async fn status_boundaries_follow_the_clock() {
    let app = TestApp::new();
    let token = app.register("edge@example.com").await;
    // Expires exactly 30 days after the test date.
    let body = app
        .create_warranty(
            &token,
            json!({
                "product_name": "Edge",
                "brand": "Case",
                "purchase_date": "2025-03-31",
                "warranty_period": 12,
            }),
        )
        .await;
    assert_eq!(body["expiry_date"], "2026-03-31");
    assert_eq!(body["status"], "Expiring Soon");
    assert_eq!(body["days_remaining"], 30);

    let path = format!("/api/warranties/{}", body["id"].as_str().expect("id"));
    let later = app.on(date(2026, 3, 31));
    let same_day = later.request("GET", &path, None, Some(&token)).await;
    assert_eq!(same_day.body["status"], "Expiring Soon");
    assert_eq!(same_day.body["days_remaining"], 0);

    let after = app.on(date(2026, 4, 1));
    let expired = after.request("GET", &path, None, Some(&token)).await;
    assert_eq!(expired.body["status"], "Expired");
    assert_eq!(expired.body["days_remaining"], 0);
}

#[tokio::test]
async fn scan_receipt_suggests_fields() {
    let app = TestApp::new();
    let token = app.register("scan@example.com").await;

    let response = app
        .upload("/api/warranties/scan_receipt", "receipt.pdf", b"%PDF-1.4 stub", &token)
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["brand"], "Samsung");
    assert_eq!(response.body["data"]["purchase_date"], "2025-03-15");
    assert_eq!(response.body["data"]["warranty_period"], 24);
    assert_eq!(response.body["data"]["category"], "Electronics");
    assert_eq!(response.body["confidence"], 100);
}

#[tokio::test]
async fn scan_receipt_rejects_unsupported_type() {
    let app = TestApp::new();
    let token = app.register("scan2@example.com").await;

    let response = app
        .upload("/api/warranties/scan_receipt", "notes.txt", b"hello", &token)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.body["data"], json!({}));
    assert!(response.body["error"].as_str().expect("error").contains("Unsupported"));
}

#[tokio::test]
async fn receipt_upload_is_served_from_media() {
    let app = TestApp::new();
    let token = app.register("rcpt@example.com").await;
    let body = app.create_warranty(&token, laptop()).await;
    let id = body["id"].as_str().expect("id");

    let response = app
        .upload(&format!("/api/warranties/{id}/receipt"), "receipt.pdf", b"%PDF-1.4 stub", &token)
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let receipt = response.body["receipt_file"].as_str().expect("receipt path");
    assert!(receipt.starts_with("receipts/2026/03/"));
    assert!(receipt.ends_with(".pdf"));
    let url = response.body["receipt_file_url"].as_str().expect("url");
    assert_eq!(url, format!("http://localhost:8000/media/{receipt}"));

    let media = app
        .send(
            axum::http::Request::builder()
                .uri(format!("/media/{receipt}"))
                .body(axum::body::Body::empty())
                .expect("request"),
        )
        .await;
    assert_eq!(media.status, StatusCode::OK);
}

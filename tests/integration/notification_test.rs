//! Integration tests for the expiry sweep and the notification inbox.

mod helpers;

use axum::http::StatusCode;
use helpers::{TestApp, date};
use serde_json::json;

/// Purchased a year before 2026-03-31, so it expires 30 days after the default test day.
fn kettle() -> serde_json::Value {
    json!({
        "product_name": "Smart Kettle",
        "brand": "Boilr",
        "category": "Home Appliances",
        "purchase_date": "2025-03-31",
        "warranty_period": 12,
    })
}

async fn sweep(app: &TestApp) -> serde_json::Value {
    let response = app.request("POST", "/api/cron/check-expiry", None, None).await;
    assert_eq!(response.status, StatusCode::OK, "Sweep failed: {:?}", response.body);
    response.body
}

#[tokio::test]
async fn sweep_raises_each_tier_once() {
    let app = TestApp::new();
    let token = app.register("tiers@example.com").await;
    app.create_warranty(&token, kettle()).await;

    let first = sweep(&app).await;
    assert_eq!(first["status"], "success");
    assert_eq!(first["notifications_created"], 1);
    assert_eq!(first["emails_sent"], 1);
    assert_eq!(first["failures"], 0);

    let again = sweep(&app).await;
    assert_eq!(again["notifications_created"], 0);
    assert_eq!(app.email.count(), 1);

    // 2026-03-11 is 20 days out
    let later = app.on(date(2026, 3, 11));
    assert_eq!(sweep(&later).await["notifications_created"], 1);

    let list = app.request("GET", "/api/notifications", None, Some(&token)).await;
    assert_eq!(list.status, StatusCode::OK);
    let items = list.body["items"].as_array().expect("items");
    assert_eq!(items.len(), 2);

    let mut tiers: Vec<&str> = items
        .iter()
        .map(|n| n["notification_type"].as_str().expect("tier"))
        .collect();
    tiers.sort_unstable();
    assert_eq!(tiers, vec!["20_days", "30_days"]);

    for item in items {
        assert_eq!(item["warranty_product_name"], "Smart Kettle");
        assert_eq!(item["warranty_brand"], "Boilr");
        assert_eq!(item["is_read"], false);
        assert_eq!(item["email_sent"], true);
        assert_eq!(item["time_ago"], "just now");
    }

    let sent = app.email.sent.lock().expect("lock");
    assert!(sent.iter().all(|e| e.to == "tiers@example.com"));
}

#[tokio::test]
async fn off_threshold_days_raise_nothing() {
    let app = TestApp::new();
    let token = app.register("quiet@example.com").await;
    app.create_warranty(&token, kettle()).await;

    // 15 and 29 days out
    for day in [date(2026, 3, 16), date(2026, 3, 2)] {
        let body = sweep(&app.on(day)).await;
        assert_eq!(body["notifications_created"], 0, "on {day}");
    }
    assert_eq!(app.email.count(), 0);
}

#[tokio::test]
async fn expiry_day_raises_expired_tier() {
    let app = TestApp::new();
    let token = app.register("expired@example.com").await;
    app.create_warranty(&token, kettle()).await;

    let on_expiry = app.on(date(2026, 3, 31));
    assert_eq!(sweep(&on_expiry).await["notifications_created"], 1);

    // Already past expiry: no longer a candidate
    let after = app.on(date(2026, 4, 1));
    assert_eq!(sweep(&after).await["notifications_created"], 0);

    let list = app.request("GET", "/api/notifications", None, Some(&token)).await;
    assert_eq!(list.body["items"][0]["notification_type"], "expired");
}

#[tokio::test]
async fn read_state_and_counts() {
    let app = TestApp::new();
    let token = app.register("inbox@example.com").await;
    app.create_warranty(&token, kettle()).await;
    sweep(&app).await;
    sweep(&app.on(date(2026, 3, 11))).await;
    sweep(&app.on(date(2026, 3, 21))).await;

    let count = app.request("GET", "/api/notifications/unread_count", None, Some(&token)).await;
    assert_eq!(count.body["count"], 3);

    let list = app.request("GET", "/api/notifications", None, Some(&token)).await;
    let id = list.body["items"][0]["id"].as_str().expect("id").to_string();

    let read = app
        .request("PATCH", &format!("/api/notifications/{id}/mark_read"), None, Some(&token))
        .await;
    assert_eq!(read.status, StatusCode::OK);
    assert_eq!(read.body["is_read"], true);

    let count = app.request("GET", "/api/notifications/unread_count", None, Some(&token)).await;
    assert_eq!(count.body["count"], 2);

    let unread = app
        .request("PATCH", &format!("/api/notifications/{id}/mark_unread"), None, Some(&token))
        .await;
    assert_eq!(unread.body["is_read"], false);

    let all = app
        .request("POST", "/api/notifications/mark_all_read", None, Some(&token))
        .await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(all.body["count"], 3);

    let count = app.request("GET", "/api/notifications/unread_count", None, Some(&token)).await;
    assert_eq!(count.body["count"], 0);
}

#[tokio::test]
async fn clear_all_removes_only_read() {
    let app = TestApp::new();
    let token = app.register("clear@example.com").await;
    app.create_warranty(&token, kettle()).await;
    sweep(&app).await;
    sweep(&app.on(date(2026, 3, 11))).await;

    let list = app.request("GET", "/api/notifications", None, Some(&token)).await;
    let id = list.body["items"][0]["id"].as_str().expect("id").to_string();
    app.request("PATCH", &format!("/api/notifications/{id}/mark_read"), None, Some(&token))
        .await;

    let cleared = app
        .request("DELETE", "/api/notifications/clear_all", None, Some(&token))
        .await;
    assert_eq!(cleared.status, StatusCode::OK);
    assert_eq!(cleared.body["count"], 1);

    let list = app.request("GET", "/api/notifications", None, Some(&token)).await;
    let items = list.body["items"].as_array().expect("items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["is_read"], false);
    assert_ne!(items[0]["id"], id.as_str());
}

#[tokio::test]
async fn delete_and_owner_scoping() {
    let app = TestApp::new();
    let owner = app.register("owner@example.com").await;
    let other = app.register("other@example.com").await;
    app.create_warranty(&owner, kettle()).await;
    sweep(&app).await;

    let list = app.request("GET", "/api/notifications", None, Some(&owner)).await;
    let id = list.body["items"][0]["id"].as_str().expect("id").to_string();

    let theirs = app.request("GET", "/api/notifications", None, Some(&other)).await;
    assert_eq!(theirs.body["items"].as_array().map(Vec::len), Some(0));

    let foreign = app
        .request("PATCH", &format!("/api/notifications/{id}/mark_read"), None, Some(&other))
        .await;
    assert_eq!(foreign.status, StatusCode::NOT_FOUND);

    let foreign = app
        .request("DELETE", &format!("/api/notifications/{id}"), None, Some(&other))
        .await;
    assert_eq!(foreign.status, StatusCode::NOT_FOUND);

    let deleted = app
        .request("DELETE", &format!("/api/notifications/{id}"), None, Some(&owner))
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let count = app.request("GET", "/api/notifications/unread_count", None, Some(&owner)).await;
    assert_eq!(count.body["count"], 0);
}

#[tokio::test]
async fn inbox_requires_auth() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/notifications", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

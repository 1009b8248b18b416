//! Notification handlers.

use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::Utc;
use uuid::Uuid;

use vault_core::types::pagination::PageResponse;
use vault_core::types::{NotificationId, WarrantyId};
use vault_entity::notification::Notification;
use vault_entity::warranty::Warranty;

use crate::dto::response::{CountResponse, NotificationResponse, StatusResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

async fn to_response(state: &AppState, auth: &AuthUser, notification: Notification) -> NotificationResponse {
    let warranty = state.warranties.get(auth, notification.warranty_id).await.ok();
    NotificationResponse::new(notification, warranty.as_ref(), Utc::now())
}

/// GET /api/notifications
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<PageResponse<NotificationResponse>>> {
    let page = state
        .notifications
        .list(&auth, &params.into_page_request())
        .await?;

    let mut products: HashMap<WarrantyId, Option<Warranty>> = HashMap::new();
    for n in &page.items {
        if !products.contains_key(&n.warranty_id) {
            let warranty = state.warranties.get(&auth, n.warranty_id).await.ok();
            products.insert(n.warranty_id, warranty);
        }
    }

    let now = Utc::now();
    Ok(Json(page.map(|n| {
        let warranty = products.get(&n.warranty_id).and_then(Option::as_ref);
        NotificationResponse::new(n, warranty, now)
    })))
}

/// GET /api/notifications/unread_count
pub async fn unread_count(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<CountResponse>> {
    let count = state.notifications.unread_count(&auth).await?;
    Ok(Json(CountResponse { count }))
}

/// PATCH /api/notifications/{id}/mark_read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<NotificationResponse>> {
    let notification = state
        .notifications
        .mark_read(&auth, NotificationId::from_uuid(id))
        .await?;
    Ok(Json(to_response(&state, &auth, notification).await))
}

/// PATCH /api/notifications/{id}/mark_unread
pub async fn mark_unread(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<NotificationResponse>> {
    let notification = state
        .notifications
        .mark_unread(&auth, NotificationId::from_uuid(id))
        .await?;
    Ok(Json(to_response(&state, &auth, notification).await))
}

/// POST /api/notifications/mark_all_read
pub async fn mark_all_read(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<StatusResponse>> {
    let count = state.notifications.mark_all_read(&auth).await?;
    Ok(Json(StatusResponse::with_count("all marked as read", count)))
}

/// DELETE /api/notifications/clear_all
///
/// Removes read notifications only.
pub async fn clear_all(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<StatusResponse>> {
    let count = state.notifications.clear_read(&auth).await?;
    Ok(Json(StatusResponse::with_count("cleared", count)))
}

/// DELETE /api/notifications/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state
        .notifications
        .delete(&auth, NotificationId::from_uuid(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

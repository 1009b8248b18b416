//! Route definitions for the Warranty Vault HTTP API.
//!
//! JSON routes are mounted under `/api`; stored receipts are served
//! read-only under `/media`.

use axum::Router;
use axum::routing::{delete, get, patch, post};
use tower_http::services::ServeDir;

use crate::handlers;
use crate::state::AppState;

/// Build the router with every route, threading `state` through.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(warranty_routes())
        .merge(share_routes())
        .merge(notification_routes())
        .merge(cron_routes())
        .merge(health_routes());

    let media = ServeDir::new(state.warranties.receipts().root());

    Router::new()
        .nest("/api", api_routes)
        .nest_service("/media", media)
        .with_state(state)
}

/// Register, login, refresh, profile
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/token/refresh", post(handlers::auth::refresh))
        .route(
            "/auth/profile",
            get(handlers::auth::profile).patch(handlers::auth::update_profile),
        )
}

/// Warranty CRUD, stats, receipts
fn warranty_routes() -> Router<AppState> {
    use handlers::warranty;

    Router::new()
        .route("/warranties", get(warranty::list).post(warranty::create))
        .route("/warranties/stats", get(warranty::stats))
        .route("/warranties/scan_receipt", post(warranty::scan_receipt))
        .route(
            "/warranties/{id}",
            get(warranty::get)
                .put(warranty::replace)
                .patch(warranty::patch)
                .delete(warranty::delete),
        )
        .route("/warranties/{id}/receipt", post(warranty::upload_receipt))
}

/// Public read-only access by share token
fn share_routes() -> Router<AppState> {
    Router::new()
        .route("/share/{share_token}", get(handlers::share::shared_warranty))
        .route("/warranty/{share_token}", get(handlers::share::shared_warranty))
}

/// In-app notifications
fn notification_routes() -> Router<AppState> {
    use handlers::notification;

    Router::new()
        .route("/notifications", get(notification::list))
        .route("/notifications/unread_count", get(notification::unread_count))
        .route("/notifications/mark_all_read", post(notification::mark_all_read))
        .route("/notifications/clear_all", delete(notification::clear_all))
        .route("/notifications/{id}", delete(notification::delete))
        .route("/notifications/{id}/mark_read", patch(notification::mark_read))
        .route("/notifications/{id}/mark_unread", patch(notification::mark_unread))
}

/// External scheduler trigger
fn cron_routes() -> Router<AppState> {
    Router::new().route(
        "/cron/check-expiry",
        get(handlers::cron::check_expiry).post(handlers::cron::check_expiry),
    )
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

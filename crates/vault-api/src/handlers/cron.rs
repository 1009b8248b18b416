//! Externally triggered expiry sweep.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use subtle::ConstantTimeEq;
use tracing::{error, info, warn};

use vault_core::error::AppError;

use crate::dto::response::CronResponse;
use crate::error::ApiResult;
use crate::state::AppState;

/// Header carrying the shared trigger secret.
pub const CRON_SECRET_HEADER: &str = "x-cron-secret";

/// GET|POST /api/cron/check-expiry
///
/// Runs one sweep for the current day and waits for it to finish.
pub async fn check_expiry(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<(StatusCode, Json<CronResponse>)> {
    if let Some(expected) = state.config.cron.secret.as_deref().filter(|s| !s.is_empty()) {
        let provided = headers
            .get(CRON_SECRET_HEADER)
            .map(|v| v.as_bytes())
            .unwrap_or_default();
        if !secret_matches(provided, expected) {
            warn!("Rejected expiry check trigger with missing or wrong secret");
            return Err(AppError::authentication("Invalid cron secret").into());
        }
    }

    let today = state.clock.today();
    match state.sweep.run_sweep(today).await {
        Ok(report) => {
            info!(
                %today,
                created = report.notifications_created,
                emails = report.emails_sent,
                failures = report.failures,
                "Expiry check triggered"
            );
            Ok((StatusCode::OK, Json(CronResponse::success(report))))
        }
        Err(e) => {
            error!(%today, error = %e, "Expiry check failed");
            Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(CronResponse::error(e.message)),
            ))
        }
    }
}

/// Compare in constant time so response timing does not leak the secret.
fn secret_matches(provided: &[u8], expected: &str) -> bool {
    provided.ct_eq(expected.as_bytes()).into()
}

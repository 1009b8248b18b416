//! Warranty handlers: CRUD, stats, receipt scanning and upload.

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::warn;
use uuid::Uuid;

use vault_core::error::AppError;
use vault_core::types::WarrantyId;
use vault_core::types::pagination::PageResponse;
use vault_service::WarrantyStats;
use vault_service::receipt::receipt_extension;

use crate::dto::request::{WarrantyPatchRequest, WarrantyRequest};
use crate::dto::response::{ScanFailureResponse, ScanReceiptResponse, WarrantyDetail, WarrantyListItem};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, PaginationParams, ValidJson};
use crate::state::AppState;

/// An uploaded document from the `file` multipart field.
struct UploadedFile {
    filename: String,
    bytes: Vec<u8>,
}

async fn read_file_field(multipart: &mut Multipart) -> Result<Option<UploadedFile>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
        return Ok(Some(UploadedFile {
            filename,
            bytes: bytes.to_vec(),
        }));
    }
    Ok(None)
}

/// GET /api/warranties
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<PageResponse<WarrantyListItem>>> {
    let today = state.clock.today();
    let page = state.warranties.list(&auth, &params.into_page_request()).await?;
    Ok(Json(page.map(|w| WarrantyListItem::new(w, today))))
}

/// POST /api/warranties
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(req): ValidJson<WarrantyRequest>,
) -> ApiResult<(StatusCode, Json<WarrantyDetail>)> {
    let warranty = state.warranties.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(WarrantyDetail::new(&state, warranty, &auth.email))))
}

/// GET /api/warranties/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<WarrantyDetail>> {
    let warranty = state.warranties.get(&auth, WarrantyId::from_uuid(id)).await?;
    Ok(Json(WarrantyDetail::new(&state, warranty, &auth.email)))
}

/// PUT /api/warranties/{id}
pub async fn replace(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidJson(req): ValidJson<WarrantyRequest>,
) -> ApiResult<Json<WarrantyDetail>> {
    let warranty = state
        .warranties
        .update(&auth, WarrantyId::from_uuid(id), req.into_changes())
        .await?;
    Ok(Json(WarrantyDetail::new(&state, warranty, &auth.email)))
}

/// PATCH /api/warranties/{id}
pub async fn patch(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidJson(req): ValidJson<WarrantyPatchRequest>,
) -> ApiResult<Json<WarrantyDetail>> {
    let warranty = state
        .warranties
        .update(&auth, WarrantyId::from_uuid(id), req.into())
        .await?;
    Ok(Json(WarrantyDetail::new(&state, warranty, &auth.email)))
}

/// DELETE /api/warranties/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.warranties.delete(&auth, WarrantyId::from_uuid(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/warranties/stats
pub async fn stats(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<WarrantyStats>> {
    Ok(Json(state.warranties.stats(&auth).await?))
}

/// POST /api/warranties/scan_receipt
///
/// Failures use the scan response shape rather than the standard error
/// body so the form can show them inline.
pub async fn scan_receipt(State(state): State<AppState>, auth: AuthUser, mut multipart: Multipart) -> Response {
    let file = match read_file_field(&mut multipart).await {
        Ok(Some(file)) => file,
        Ok(None) => return scan_failure("No file provided"),
        Err(e) => return scan_failure(e.message),
    };
    let extension = match receipt_extension(&file.filename) {
        Ok(ext) => ext,
        Err(e) => return scan_failure(e.message),
    };

    match state.scanner.extract(&file.bytes, &extension).await {
        Ok(scan) => Json(ScanReceiptResponse::from(scan)).into_response(),
        Err(e) => {
            warn!(user_id = %auth.user_id, error = %e, "Receipt scan failed");
            scan_failure(format!("Failed to process receipt: {}", e.message))
        }
    }
}

fn scan_failure(error: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, Json(ScanFailureResponse::new(error))).into_response()
}

/// POST /api/warranties/{id}/receipt
pub async fn upload_receipt(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> ApiResult<Json<WarrantyDetail>> {
    let file = read_file_field(&mut multipart)
        .await?
        .ok_or_else(|| AppError::validation("No file provided"))?;
    let warranty = state
        .warranties
        .attach_receipt(&auth, WarrantyId::from_uuid(id), &file.filename, &file.bytes)
        .await?;
    Ok(Json(WarrantyDetail::new(&state, warranty, &auth.email)))
}

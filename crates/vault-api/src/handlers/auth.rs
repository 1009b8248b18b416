//! Account handlers: register, login, refresh, profile.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use vault_core::error::AppError;
use vault_service::AuthSession;

use crate::dto::request::{LoginRequest, RefreshRequest, RegisterRequest, UpdateProfileRequest};
use crate::dto::response::{AuthResponse, TokenResponse, UserResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidJson};
use crate::state::AppState;

fn session_response(session: AuthSession) -> AuthResponse {
    AuthResponse {
        user: session.user.into(),
        access: session.tokens.access,
        refresh: session.tokens.refresh,
    }
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let session = state.accounts.register(req.into()).await?;
    Ok((StatusCode::CREATED, Json(session_response(session))))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let session = state.accounts.login(&req.email, &req.password).await?;
    Ok(Json(session_response(session)))
}

/// POST /api/auth/token/refresh
pub async fn refresh(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<RefreshRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let token = req
        .refresh
        .ok_or_else(|| AppError::validation("Refresh token is required"))?;
    let tokens = state.accounts.refresh(&token).await?;
    Ok(Json(tokens.into()))
}

/// GET /api/auth/profile
pub async fn profile(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<UserResponse>> {
    let user = state.accounts.profile(&auth).await?;
    Ok(Json(user.into()))
}

/// PATCH /api/auth/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(req): ValidJson<UpdateProfileRequest>,
) -> ApiResult<Json<UserResponse>> {
    let user = state.accounts.update_profile(&auth, req.into()).await?;
    Ok(Json(user.into()))
}

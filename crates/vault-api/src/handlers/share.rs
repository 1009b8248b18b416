//! Public share view, resolved by share token without authentication.

use axum::Json;
use axum::extract::{Path, State};

use crate::dto::response::PublicWarranty;
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/share/{share_token}
/// GET /api/warranty/{share_token}
pub async fn shared_warranty(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> ApiResult<Json<PublicWarranty>> {
    let warranty = state.warranties.shared(&token).await?;
    Ok(Json(PublicWarranty::new(&state, warranty)))
}

// DELETE /api/places/:pid

use axum::extract::{Path, State};
use axum::Extension;
use serde_json::json;
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, AuthUser};
use crate::services::place_service;
use crate::state::AppState;

pub async fn place_delete(
    State(state): State<AppState>,
    Path(place_id): Path<Uuid>,
    Extension(auth): Extension<AuthUser>,
) -> Result<ApiResponse<serde_json::Value>, ApiError> {
    place_service::delete_place(
        state.store.as_ref(),
        state.files.as_ref(),
        place_id,
        auth.user_id,
    )
    .await?;

    Ok(ApiResponse::success(json!({ "message": "Place successfully deleted." })))
}

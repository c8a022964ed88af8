// GET /api/places/user/:uid

use axum::extract::{Path, State};
use serde_json::json;
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::ApiResponse;
use crate::services::place_service;
use crate::state::AppState;

/// A user with no places gets an empty list, not a 404.
pub async fn places_by_user_get(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<ApiResponse<serde_json::Value>, ApiError> {
    let places = place_service::get_places_by_user(state.store.as_ref(), user_id).await?;
    Ok(ApiResponse::success(json!({ "places": places })))
}

// GET /api/places

use axum::extract::State;
use serde_json::json;

use crate::error::ApiError;
use crate::middleware::ApiResponse;
use crate::services::place_service;
use crate::state::AppState;

pub async fn places_get(
    State(state): State<AppState>,
) -> Result<ApiResponse<serde_json::Value>, ApiError> {
    let places = place_service::get_all_places(state.store.as_ref()).await?;
    Ok(ApiResponse::success(json!({ "places": places })))
}

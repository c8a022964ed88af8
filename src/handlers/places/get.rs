// GET /api/places/place/:pid

use axum::extract::{Path, State};
use serde_json::json;
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::ApiResponse;
use crate::services::place_service;
use crate::state::AppState;

pub async fn place_get(
    State(state): State<AppState>,
    Path(place_id): Path<Uuid>,
) -> Result<ApiResponse<serde_json::Value>, ApiError> {
    let place = place_service::get_place_by_id(state.store.as_ref(), place_id).await?;
    Ok(ApiResponse::success(json!({ "place": place })))
}

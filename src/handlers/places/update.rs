// PATCH /api/places/:pid

use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::error::ApiError;
use crate::handlers::validate;
use crate::middleware::{ApiResponse, AuthUser};
use crate::services::place_service::{self, PlaceUpdate};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdatePlaceRequest {
    pub title: String,
    pub description: String,
    pub address: String,
}

pub async fn place_patch(
    State(state): State<AppState>,
    Path(place_id): Path<Uuid>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<UpdatePlaceRequest>,
) -> Result<ApiResponse<serde_json::Value>, ApiError> {
    if !validate::non_empty(&body.title)
        || !validate::min_len(&body.description, 5)
        || !validate::non_empty(&body.address)
    {
        return Err(ApiError::validation(validate::INVALID_INPUT));
    }

    let place = place_service::update_place(
        state.store.as_ref(),
        state.geocoder.as_ref(),
        place_id,
        PlaceUpdate {
            title: body.title,
            description: body.description,
            address: body.address,
        },
        auth.user_id,
    )
    .await?;

    Ok(ApiResponse::success(json!({ "place": place })))
}

// POST /api/places

use axum::extract::State;
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;
use crate::handlers::validate;
use crate::middleware::{ApiResponse, AuthUser};
use crate::services::place_service::{self, PlaceInput};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreatePlaceRequest {
    pub title: String,
    pub description: String,
    pub address: String,
    #[serde(default)]
    pub image: String,
}

/// The creator is always the authenticated principal; a creator field in
/// the body is ignored.
pub async fn place_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<CreatePlaceRequest>,
) -> Result<ApiResponse<serde_json::Value>, ApiError> {
    if !validate::non_empty(&body.title)
        || !validate::min_len(&body.description, 5)
        || !validate::non_empty(&body.address)
    {
        return Err(ApiError::validation(validate::INVALID_INPUT));
    }

    let place = place_service::create_place(
        state.store.as_ref(),
        state.geocoder.as_ref(),
        PlaceInput {
            title: body.title,
            description: body.description,
            address: body.address,
            image: body.image,
        },
        auth.user_id,
    )
    .await?;

    Ok(ApiResponse::created(json!({ "place": place })))
}

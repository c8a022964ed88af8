// GET /api/users

use axum::extract::State;
use serde_json::json;

use crate::error::ApiError;
use crate::middleware::ApiResponse;
use crate::services::user_service;
use crate::state::AppState;

pub async fn users_get(
    State(state): State<AppState>,
) -> Result<ApiResponse<serde_json::Value>, ApiError> {
    let users = user_service::list_users(state.store.as_ref()).await?;
    Ok(ApiResponse::success(json!({ "users": users })))
}

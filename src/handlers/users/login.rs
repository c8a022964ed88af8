// POST /api/users/login

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::error::ApiError;
use crate::middleware::ApiResponse;
use crate::services::user_service::{self, AuthPayload};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn login_post(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiResponse<AuthPayload>, ApiError> {
    let email = body.email.trim().to_lowercase();
    let payload = user_service::login_user(state.store.as_ref(), &email, &body.password).await?;
    Ok(ApiResponse::success(payload))
}

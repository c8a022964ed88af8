// POST /api/users/signup

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::error::ApiError;
use crate::handlers::validate;
use crate::middleware::ApiResponse;
use crate::services::user_service::{self, AuthPayload, RegisterInput};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub image: Option<String>,
}

const INVALID_SIGNUP: &str = "Invalid input: username must be included, e-mail must be a valid \
     e-mail address, password must be at least 5 characters long";

pub async fn signup_post(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<ApiResponse<AuthPayload>, ApiError> {
    let Some(email) = validate::normalize_email(&body.email) else {
        return Err(ApiError::validation(INVALID_SIGNUP));
    };
    if !validate::non_empty(&body.username) || !validate::min_len(&body.password, 5) {
        return Err(ApiError::validation(INVALID_SIGNUP));
    }

    let payload = user_service::register_user(
        state.store.as_ref(),
        RegisterInput {
            username: body.username.trim().to_string(),
            email,
            password: body.password,
            image: body.image,
        },
    )
    .await?;

    Ok(ApiResponse::created(payload))
}

// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::services::geocoding::GeocodeError;
use crate::store::StoreError;

/// HTTP API error with appropriate status codes and client-friendly messages.
///
/// Status assignments follow the original wire contract: uniqueness conflicts
/// are reported as 422, failed credentials and bad tokens as 403, and wrong
/// ownership as 401.
#[derive(Debug)]
pub enum ApiError {
    // 422 Unprocessable Entity (input shape / derived data)
    Validation(String),

    // 422 Unprocessable Entity (uniqueness violation)
    Conflict(String),

    // 403 Forbidden (bad credentials or bad/missing token)
    Authentication(String),

    // 401 Unauthorized (authenticated, but not the owner)
    Authorization(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Validation(_) => 422,
            ApiError::Conflict(_) => 422,
            ApiError::Authentication(_) => 403,
            ApiError::Authorization(_) => 401,
            ApiError::NotFound(_) => 404,
            ApiError::Internal(_) => 500,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::Validation(msg)
            | ApiError::Conflict(msg)
            | ApiError::Authentication(msg)
            | ApiError::Authorization(msg)
            | ApiError::NotFound(msg)
            | ApiError::Internal(msg) => msg,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::Authentication(_) => "AUTHENTICATION_FAILED",
            ApiError::Authorization(_) => "NOT_AUTHORIZED",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "error": true,
            "message": self.message(),
            "code": self.error_code(),
        })
    }
}

// Static constructor methods
impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        ApiError::Authentication(message.into())
    }

    pub fn authorization(message: impl Into<String>) -> Self {
        ApiError::Authorization(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

// Convert lower-level error types to ApiError at the service boundary.
// Internal detail is logged here and never returned to the caller.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => ApiError::not_found(format!("{} not found.", what)),
            StoreError::UniqueViolation { field } if field == "email" => {
                ApiError::conflict("This email is already in use. You can log in instead.")
            }
            StoreError::UniqueViolation { field } if field == "username" => {
                ApiError::conflict("This username is already in use. Choose another one.")
            }
            StoreError::UniqueViolation { field } => {
                ApiError::conflict(format!("This {} is already in use.", field))
            }
            StoreError::Database(e) => {
                tracing::error!("store error: {}", e);
                ApiError::internal("Something went wrong, please try again later.")
            }
        }
    }
}

impl From<GeocodeError> for ApiError {
    fn from(err: GeocodeError) -> Self {
        match err {
            GeocodeError::NotFound(_) => {
                ApiError::validation("Could not find location for the specified address.")
            }
            GeocodeError::Provider(detail) => {
                tracing::error!("geocoding provider error: {}", detail);
                ApiError::internal("Could not resolve the address, please try again later.")
            }
        }
    }
}

impl From<crate::auth::JwtError> for ApiError {
    fn from(err: crate::auth::JwtError) -> Self {
        tracing::error!("token error: {}", err);
        ApiError::internal("Something went wrong, please try again later.")
    }
}

impl From<crate::auth::password::HashError> for ApiError {
    fn from(err: crate::auth::password::HashError) -> Self {
        tracing::error!("password hashing error: {}", err);
        ApiError::internal("Something went wrong, please try again later.")
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

use axum::{
    extract::Request,
    http::{HeaderMap, Method},
    middleware::Next,
    response::Response,
};

use crate::auth::{verify_jwt, Claims};
use crate::config::config;
use crate::error::ApiError;

/// Authenticated principal extracted from a verified bearer token.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: uuid::Uuid,
    pub email: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self { user_id: claims.user_id, email: claims.email }
    }
}

/// Bearer-token gate for mutating place routes.
///
/// Every failure mode collapses into one 403 response so a probing client
/// cannot distinguish a missing header from an expired token.
pub async fn jwt_auth_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // CORS preflights carry no credentials.
    if request.method() == Method::OPTIONS {
        return Ok(next.run(request).await);
    }

    let token = extract_bearer_token(&headers)
        .ok_or_else(|| ApiError::authentication("Authentication failed!"))?;

    let claims = verify_jwt(token, &config().security.jwt_secret)
        .map_err(|_| ApiError::authentication("Authentication failed!"))?;

    request.extensions_mut().insert(AuthUser::from(claims));
    Ok(next.run(request).await)
}

/// Pull the token out of `Authorization: Bearer <token>`.
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get("authorization")?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

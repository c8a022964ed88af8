//! Registration and login.
//!
//! Uniqueness pre-checks here are a fast path for friendly errors; the
//! store's unique indexes are the authoritative guard, and a violation
//! raced past the pre-check maps to the same conflict response.

use serde::Serialize;
use uuid::Uuid;

use crate::auth::{self, password, Claims};
use crate::config::config;
use crate::database::models::{NewUser, User};
use crate::error::ApiError;
use crate::store::{EntityStore, StoreError};

#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub image: Option<String>,
}

/// Issued on successful signup or login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    pub user_id: Uuid,
    pub email: String,
    pub token: String,
}

fn issue_token(user_id: Uuid, email: &str) -> Result<String, ApiError> {
    let security = &config().security;
    let claims = Claims::new(user_id, email.to_string(), security.jwt_expiry_secs);
    Ok(auth::generate_jwt(&claims, &security.jwt_secret)?)
}

fn registration_failed(err: StoreError) -> ApiError {
    match err {
        unique @ StoreError::UniqueViolation { .. } => unique.into(),
        other => {
            tracing::error!("registration store error: {}", other);
            ApiError::internal("Registration failed, please try again later.")
        }
    }
}

/// Create an account and return a fresh bearer token.
///
/// Input shape (non-empty username, email format, password length) is
/// validated upstream and assumed here.
pub async fn register_user(
    store: &dyn EntityStore,
    input: RegisterInput,
) -> Result<AuthPayload, ApiError> {
    if store
        .find_user_by_email(&input.email)
        .await
        .map_err(registration_failed)?
        .is_some()
    {
        return Err(ApiError::conflict(
            "This email is already in use. You can log in instead.",
        ));
    }
    if store
        .find_user_by_username(&input.username)
        .await
        .map_err(registration_failed)?
        .is_some()
    {
        return Err(ApiError::conflict(
            "This username is already in use. Choose another one.",
        ));
    }

    let hashed = password::hash(&input.password)?;

    let user = store
        .insert_user(NewUser {
            username: input.username,
            email: input.email,
            password: hashed,
            image: input.image,
        })
        .await
        .map_err(registration_failed)?;

    let token = issue_token(user.id, &user.email)?;
    Ok(AuthPayload { user_id: user.id, email: user.email, token })
}

/// Verify credentials and return a fresh bearer token.
///
/// An unknown email and a wrong password both come back as 403; the
/// message distinguishes them but the status class does not.
pub async fn login_user(
    store: &dyn EntityStore,
    email: &str,
    plaintext: &str,
) -> Result<AuthPayload, ApiError> {
    let user = store
        .find_user_by_email(email)
        .await
        .map_err(|e| {
            tracing::error!("login store error: {}", e);
            ApiError::internal("Login failed, please, try again later.")
        })?
        .ok_or_else(|| ApiError::authentication("Invalid e-mail address, could not log in."))?;

    let matches = password::verify(plaintext, &user.password).map_err(|e| {
        tracing::error!("password verification error: {}", e);
        ApiError::internal("Could not log in, please check your data and try again")
    })?;
    if !matches {
        return Err(ApiError::authentication("Invalid password, could not log in."));
    }

    let token = issue_token(user.id, &user.email)?;
    Ok(AuthPayload { user_id: user.id, email: user.email, token })
}

/// All registered users, password hashes excluded by serialization.
pub async fn list_users(store: &dyn EntityStore) -> Result<Vec<User>, ApiError> {
    let users = store.list_users().await.map_err(|e| {
        tracing::error!("listing users failed: {}", e);
        ApiError::internal("Something went wrong, could not find users.")
    })?;

    if users.is_empty() {
        return Err(ApiError::not_found("No users found"));
    }
    Ok(users)
}

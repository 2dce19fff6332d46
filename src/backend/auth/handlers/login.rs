/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /api/auth.
 *
 * # Authentication Process
 *
 * 1. Look up user by email
 * 2. Verify password using bcrypt
 * 3. Generate JWT token and record it as active
 * 4. Return user and token
 *
 * # Security
 *
 * - An unknown email and a wrong password return the identical
 *   `400 {"errors": [{"msg": "Invalid Credentials"}]}`
 * - Both cases pay for one bcrypt computation at the configured cost
 * - Passwords are never logged or returned in responses
 */

use axum::{extract::State, response::Json};
use bcrypt::{hash, verify, BcryptError};

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::auth::users::{add_token, get_user_by_email};
use crate::backend::error::BackendError;
use crate::backend::extract::JsonBody;
use crate::backend::server::state::AppState;

/// Message returned for every failed login
pub const INVALID_CREDENTIALS_MSG: &str = "Invalid Credentials";

/// Compare a password against the stored hash, if there is one
///
/// Without a stored hash the password is hashed at `cost` anyway and the
/// result discarded, so a missing account takes as long as a wrong password.
fn password_matches(password: &str, stored_hash: Option<&str>, cost: u32) -> Result<bool, BcryptError> {
    match stored_hash {
        Some(stored_hash) => verify(password, stored_hash),
        None => {
            hash(password, cost)?;
            Ok(false)
        }
    }
}

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - Field validation failed or credentials are invalid
/// * `500 Internal Server Error` - Database, hashing or token failure
pub async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    let credentials = request.validate()?;
    tracing::info!("Login request for: {}", credentials.email);

    let user = get_user_by_email(&state.db_pool, &credentials.email).await?;
    let stored_hash = user.as_ref().map(|u| u.password_hash.as_str());

    if !password_matches(&credentials.password, stored_hash, state.bcrypt_cost)? {
        tracing::warn!("Invalid credentials for: {}", credentials.email);
        return Err(BackendError::conflict(INVALID_CREDENTIALS_MSG));
    }
    let Some(user) = user else {
        return Err(BackendError::conflict(INVALID_CREDENTIALS_MSG));
    };

    let token = state.sessions.create_token(user.id)?;
    add_token(&state.db_pool, user.id, &token).await?;

    tracing::info!("User logged in successfully: {} ({})", user.name, user.email);

    Ok(Json(AuthResponse {
        user: user.into(),
        token,
    }))
}

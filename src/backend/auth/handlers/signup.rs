/**
 * Signup Handler
 *
 * This module implements the user registration handler for POST /api/users.
 *
 * # Registration Process
 *
 * 1. Validate name, email format and password length
 * 2. Check if a user with the email already exists
 * 3. Derive the avatar from the email
 * 4. Hash password using bcrypt
 * 5. Create user in database
 * 6. Generate JWT token and record it as active
 * 7. Return user and token
 */

use axum::{extract::State, response::Json};
use bcrypt::hash;

use crate::backend::auth::avatar::gravatar_url;
use crate::backend::auth::handlers::types::{AuthResponse, SignupRequest};
use crate::backend::auth::users::{add_token, create_user, get_user_by_email};
use crate::backend::error::BackendError;
use crate::backend::extract::JsonBody;
use crate::backend::server::state::AppState;

/// Message returned when the email is already registered
pub const USER_EXISTS_MSG: &str = "User already exists";

/// Sign up handler
///
/// # Errors
///
/// * `400 Bad Request` - Field validation failed, or the email is taken
///   (`{"errors": [{"msg": "User already exists"}]}`)
/// * `500 Internal Server Error` - Hashing, database or token failure
///
/// # Example Request
///
/// ```http
/// POST /api/users HTTP/1.1
/// Content-Type: application/json
///
/// {"name": "A", "email": "a@x.com", "password": "secret1"}
/// ```
pub async fn signup(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<SignupRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    let account = request.validate()?;
    tracing::info!("Signup request for email: {}", account.email);

    if get_user_by_email(&state.db_pool, &account.email).await?.is_some() {
        tracing::warn!("Email already exists: {}", account.email);
        return Err(BackendError::conflict(USER_EXISTS_MSG));
    }

    let avatar = gravatar_url(&account.email);
    let password_hash = hash(&account.password, state.bcrypt_cost)?;

    let user = create_user(
        &state.db_pool,
        &account.name,
        &account.email,
        &password_hash,
        &avatar,
    )
    .await
    .map_err(|e| {
        // Lost a race with a concurrent registration of the same email
        if matches!(&e, sqlx::Error::Database(db) if db.is_unique_violation()) {
            tracing::warn!("Email registered concurrently: {}", account.email);
            BackendError::conflict(USER_EXISTS_MSG)
        } else {
            BackendError::from(e)
        }
    })?;

    let token = state.sessions.create_token(user.id)?;
    add_token(&state.db_pool, user.id, &token).await?;

    tracing::info!("User created successfully: {} ({})", user.name, user.email);

    Ok(Json(AuthResponse {
        user: user.into(),
        token,
    }))
}

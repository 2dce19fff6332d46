/**
 * Logout Handlers
 *
 * POST /api/auth/logout revokes the token used for the request.
 * POST /api/auth/logout/all revokes every token of the user, signing them
 * out on all devices.
 */

use axum::{extract::State, response::Json};
use sqlx::SqlitePool;

use crate::backend::auth::users::{revoke_all_tokens, revoke_token};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::shared::MessageResponse;

/// Revoke the presented token
pub async fn logout(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
) -> Result<Json<MessageResponse>, BackendError> {
    revoke_token(&pool, auth.user.id, &auth.token).await?;
    tracing::info!("User logged out: {}", auth.user.email);
    Ok(Json(MessageResponse::new("Logged out")))
}

/// Revoke every active token of the user
pub async fn logout_all(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
) -> Result<Json<MessageResponse>, BackendError> {
    let revoked = revoke_all_tokens(&pool, auth.user.id).await?;
    tracing::info!("Revoked {} token(s) for user: {}", revoked, auth.user.email);
    Ok(Json(MessageResponse::new("Logged out of all sessions")))
}

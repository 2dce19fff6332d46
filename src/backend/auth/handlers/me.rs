/**
 * Get Current User Handler
 *
 * GET /api/auth returns the user the bearer token belongs to. The auth
 * middleware has already resolved the token, so this handler never touches
 * the database.
 */

use axum::response::Json;

use crate::backend::auth::handlers::types::UserResponse;
use crate::backend::middleware::AuthUser;

/// Get current user handler
pub async fn get_me(AuthUser(auth): AuthUser) -> Json<UserResponse> {
    Json(auth.user.into())
}

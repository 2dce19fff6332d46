/**
 * API Route Table
 *
 * # Public Routes
 * - `GET /` - Liveness text
 * - `POST /api/users` - Register
 * - `POST /api/auth` - Login
 * - `GET /api/profile` - All profiles
 * - `GET /api/profile/user/{user_id}` - Profile by user id
 *
 * # Protected Routes (bearer token)
 * - `GET /api/auth` - Current user
 * - `POST /api/auth/logout`, `POST /api/auth/logout/all` - Revoke tokens
 * - `GET /api/profile/me`, `POST /api/profile`, `DELETE /api/profile`
 * - `PATCH /api/profile/experience`, `DELETE /api/profile/experience/{exp_id}`
 * - `PATCH /api/profile/education`, `DELETE /api/profile/education/{edu_id}`
 * - `POST|GET /api/posts`, `GET|DELETE /api/posts/{id}`
 * - `PATCH /api/posts/like/{id}`, `PATCH /api/posts/unlike/{id}`
 * - `POST /api/posts/comment/{id}`, `DELETE /api/posts/comment/{p_id}/{comment_id}`
 */

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::backend::auth::{get_me, login, logout, logout_all, signup};
use crate::backend::posts::{
    add_comment, create_post, delete_comment, delete_post, get_post, like_post, list_posts,
    unlike_post,
};
use crate::backend::profile::{
    add_education, add_experience, delete_account, delete_education, delete_experience,
    get_my_profile, get_profile_by_user, list_profiles, upsert_profile,
};
use crate::backend::server::state::AppState;

/// Liveness text for `GET /`
pub const API_WORKING: &str = "API Working!";

/// Routes reachable without a token
///
/// # Arguments
///
/// * `router` - The router to add routes to
///
/// # Returns
///
/// Router with public routes configured
pub fn configure_public_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/", get(|| async { API_WORKING }))
        .route("/api/users", post(signup))
        .route("/api/auth", post(login))
        .route("/api/profile", get(list_profiles))
        .route("/api/profile/user/{user_id}", get(get_profile_by_user))
}

/// Routes that require `auth_middleware`
///
/// The caller is responsible for applying the middleware.
pub fn configure_protected_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Authentication endpoints
        .route("/api/auth", get(get_me))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/logout/all", post(logout_all))
        // Profile endpoints
        .route("/api/profile", post(upsert_profile).delete(delete_account))
        .route("/api/profile/me", get(get_my_profile))
        .route("/api/profile/experience", patch(add_experience))
        .route("/api/profile/experience/{exp_id}", delete(delete_experience))
        .route("/api/profile/education", patch(add_education))
        .route("/api/profile/education/{edu_id}", delete(delete_education))
        // Post endpoints
        .route("/api/posts", post(create_post).get(list_posts))
        .route("/api/posts/{id}", get(get_post).delete(delete_post))
        .route("/api/posts/like/{id}", patch(like_post))
        .route("/api/posts/unlike/{id}", patch(unlike_post))
        .route("/api/posts/comment/{id}", post(add_comment))
        .route("/api/posts/comment/{p_id}/{comment_id}", delete(delete_comment))
}

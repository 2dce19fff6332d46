//! Profile HTTP Handlers
//!
//! Reads are public except `GET /api/profile/me`; every mutation acts on
//! the authenticated user's own profile.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::db;
use crate::backend::auth::handlers::UserResponse;
use crate::backend::auth::users::delete_user;
use crate::backend::error::BackendError;
use crate::backend::extract::{parse_id, JsonBody};
use crate::backend::middleware::AuthUser;
use crate::shared::profile::{EducationRequest, ExperienceRequest, Profile, ProfileRequest};

pub const NO_PROFILE_MSG: &str = "There is no profile for this user";
pub const PROFILE_NOT_FOUND_MSG: &str = "Profile not found";
pub const EXPERIENCE_NOT_FOUND_MSG: &str = "Experience not found";
pub const EDUCATION_NOT_FOUND_MSG: &str = "Education not found";

async fn own_profile(pool: &SqlitePool, user_id: Uuid) -> Result<Profile, BackendError> {
    db::get_profile_by_user(pool, user_id)
        .await?
        .ok_or_else(|| BackendError::not_found(NO_PROFILE_MSG))
}

async fn own_profile_id(pool: &SqlitePool, user_id: Uuid) -> Result<Uuid, BackendError> {
    db::get_profile_id(pool, user_id)
        .await?
        .ok_or_else(|| BackendError::not_found(NO_PROFILE_MSG))
}

/// GET /api/profile/me
pub async fn get_my_profile(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
) -> Result<Json<Profile>, BackendError> {
    Ok(Json(own_profile(&pool, auth.user.id).await?))
}

/// POST /api/profile
///
/// # Returns
/// `201 Created` with the new profile on first submission, `200 OK` with the
/// updated profile afterwards
pub async fn upsert_profile(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    JsonBody(request): JsonBody<ProfileRequest>,
) -> Result<(StatusCode, Json<Profile>), BackendError> {
    let fields = request.validate()?;
    let (profile, created) = db::upsert_profile(&pool, auth.user.id, &fields).await?;

    let status = if created {
        tracing::info!("Profile created for user: {}", auth.user.id);
        StatusCode::CREATED
    } else {
        tracing::info!("Profile updated for user: {}", auth.user.id);
        StatusCode::OK
    };

    Ok((status, Json(profile)))
}

/// GET /api/profile
pub async fn list_profiles(State(pool): State<SqlitePool>) -> Result<Json<Vec<Profile>>, BackendError> {
    Ok(Json(db::list_profiles(&pool).await?))
}

/// GET /api/profile/user/{user_id}
pub async fn get_profile_by_user(
    State(pool): State<SqlitePool>,
    Path(user_id): Path<String>,
) -> Result<Json<Profile>, BackendError> {
    let user_id = parse_id(&user_id, PROFILE_NOT_FOUND_MSG)?;

    db::get_profile_by_user(&pool, user_id)
        .await?
        .map(Json)
        .ok_or_else(|| BackendError::not_found(PROFILE_NOT_FOUND_MSG))
}

/// PATCH /api/profile/experience
pub async fn add_experience(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    JsonBody(request): JsonBody<ExperienceRequest>,
) -> Result<Json<Profile>, BackendError> {
    let entry = request.validate()?;
    let profile_id = own_profile_id(&pool, auth.user.id).await?;

    let id = db::add_experience(&pool, profile_id, &entry).await?;
    tracing::info!("Experience {} added to profile {}", id, profile_id);

    Ok(Json(own_profile(&pool, auth.user.id).await?))
}

/// DELETE /api/profile/experience/{exp_id}
pub async fn delete_experience(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Path(exp_id): Path<String>,
) -> Result<Json<Profile>, BackendError> {
    let entry_id = parse_id(&exp_id, EXPERIENCE_NOT_FOUND_MSG)?;
    let profile_id = own_profile_id(&pool, auth.user.id).await?;

    if !db::remove_experience(&pool, profile_id, entry_id).await? {
        tracing::warn!("Experience {} not on profile {}", entry_id, profile_id);
        return Err(BackendError::not_found(EXPERIENCE_NOT_FOUND_MSG));
    }

    Ok(Json(own_profile(&pool, auth.user.id).await?))
}

/// PATCH /api/profile/education
pub async fn add_education(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    JsonBody(request): JsonBody<EducationRequest>,
) -> Result<Json<Profile>, BackendError> {
    let entry = request.validate()?;
    let profile_id = own_profile_id(&pool, auth.user.id).await?;

    let id = db::add_education(&pool, profile_id, &entry).await?;
    tracing::info!("Education {} added to profile {}", id, profile_id);

    Ok(Json(own_profile(&pool, auth.user.id).await?))
}

/// DELETE /api/profile/education/{edu_id}
pub async fn delete_education(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Path(edu_id): Path<String>,
) -> Result<Json<Profile>, BackendError> {
    let entry_id = parse_id(&edu_id, EDUCATION_NOT_FOUND_MSG)?;
    let profile_id = own_profile_id(&pool, auth.user.id).await?;

    if !db::remove_education(&pool, profile_id, entry_id).await? {
        tracing::warn!("Education {} not on profile {}", entry_id, profile_id);
        return Err(BackendError::not_found(EDUCATION_NOT_FOUND_MSG));
    }

    Ok(Json(own_profile(&pool, auth.user.id).await?))
}

/// DELETE /api/profile
///
/// Deletes the account. Tokens and profile go with it; posts, likes and
/// comments stay.
pub async fn delete_account(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
) -> Result<Json<UserResponse>, BackendError> {
    delete_user(&pool, auth.user.id).await?;
    tracing::info!("Account deleted: {}", auth.user.email);

    Ok(Json(auth.user.into()))
}

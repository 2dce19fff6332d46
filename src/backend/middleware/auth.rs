/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require
 * user authentication. It extracts and verifies the bearer token from the
 * Authorization header, then checks that the token is still on the
 * user's list of active tokens.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::backend::auth::sessions::SessionKeys;
use crate::backend::auth::users::{find_user_by_token, User};
use crate::backend::error::BackendError;

/// Authenticated user and the token that proved it
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user: User,
    pub token: String,
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the bearer token from the Authorization header
/// 2. Verifies its signature and expiry
/// 3. Loads the user named in the token, provided the token is still active
/// 4. Attaches user and token to request extensions for use in handlers
///
/// Every failure yields the same `401 {"msg": "Please Authenticate"}`.
pub async fn auth_middleware(
    State(sessions): State<Arc<SessionKeys>>,
    State(pool): State<SqlitePool>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let authenticated = authenticate(&sessions, &pool, request.headers()).await?;
    request.extensions_mut().insert(authenticated);

    Ok(next.run(request).await)
}

async fn authenticate(
    sessions: &SessionKeys,
    pool: &SqlitePool,
    headers: &HeaderMap,
) -> Result<AuthenticatedUser, BackendError> {
    let token = bearer_token(headers).ok_or(BackendError::Unauthenticated)?;

    let user_id = sessions.get_user_id_from_token(token).map_err(|e| {
        tracing::warn!("Invalid token: {}", e);
        BackendError::Unauthenticated
    })?;

    let user = find_user_by_token(pool, user_id, token)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Token not active for user: {}", user_id);
            BackendError::Unauthenticated
        })?;

    Ok(AuthenticatedUser {
        user,
        token: token.to_string(),
    })
}

/// Token from an `Authorization: Bearer <token>` header
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let Some(auth_header) = headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok()) else {
        tracing::warn!("Missing Authorization header");
        return None;
    };

    match auth_header.strip_prefix("Bearer ").map(str::trim) {
        Some(token) if !token.is_empty() => Some(token),
        _ => {
            tracing::warn!("Invalid Authorization header format");
            None
        }
    }
}

/// Axum extractor for authenticated user
///
/// This can be used as a parameter in handlers behind `auth_middleware`
/// to get the user it resolved.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::Unauthenticated
            })?;

        Ok(AuthUser(user))
    }
}

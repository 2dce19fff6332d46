/**
 * Backend Error Types
 *
 * This module defines the single error type used by HTTP handlers.
 *
 * # Error Categories
 *
 * ## Client Errors
 *
 * - Validation failures on the request body (400, per-field messages)
 * - Conflicts such as a duplicate email (400)
 * - Rejected operations such as liking a post twice (400)
 * - Missing or invalid bearer token (401, undifferentiated)
 * - Acting on another user's post or comment (401)
 * - Unknown or malformed identifiers (404)
 *
 * ## Internal Errors
 *
 * Database, password hashing, token signing and serialization failures.
 * These all map to 500 and never expose their details to the client.
 */

use axum::http::StatusCode;
use serde_json::{json, Value};
use thiserror::Error;

use crate::shared::{FieldError, SharedError};

/// Message returned for every internal failure
pub const SERVER_ERROR_MSG: &str = "Server Error";

/// Message returned for every authentication failure
pub const UNAUTHENTICATED_MSG: &str = "Please Authenticate";

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use devconnect::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::not_found("Post not found");
/// assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
///
/// let err = BackendError::conflict("User already exists");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Request body failed validation
    #[error(transparent)]
    Validation(#[from] SharedError),

    /// The request collides with existing state (e.g. duplicate email)
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// The request is well-formed but cannot be applied (e.g. double like)
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Missing, malformed, expired or revoked bearer token
    #[error("Authentication required")]
    Unauthenticated,

    /// Authenticated user may not act on this resource
    #[error("Not authorized: {message}")]
    Unauthorized { message: String },

    /// Resource does not exist or its identifier is malformed
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Database failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing failure
    #[error("Password hashing error: {0}")]
    Password(#[from] bcrypt::BcryptError),

    /// Token signing failure
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

impl BackendError {
    /// Create a conflict error, reported like a validation failure
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Create an authorization error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `Validation`, `Conflict`, `BadRequest` - 400 Bad Request
    /// - `Unauthenticated`, `Unauthorized` - 401 Unauthorized
    /// - `NotFound` - 404 Not Found
    /// - everything else - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Conflict { .. } | Self::BadRequest { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::Unauthenticated | Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Password(_) | Self::Token(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Whether the error is a server-side fault rather than a client mistake
    pub fn is_internal(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// JSON body sent to the client
    pub fn body(&self) -> Value {
        match self {
            Self::Validation(err) => json!({ "errors": err.field_errors() }),
            Self::Conflict { message } => json!({ "errors": [FieldError::general(message.clone())] }),
            Self::BadRequest { message }
            | Self::Unauthorized { message }
            | Self::NotFound { message } => json!({ "msg": message }),
            Self::Unauthenticated => json!({ "msg": UNAUTHENTICATED_MSG }),
            Self::Database(_) | Self::Password(_) | Self::Token(_) => {
                json!({ "msg": SERVER_ERROR_MSG })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            BackendError::conflict("User already exists").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            BackendError::bad_request("Post already liked").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(BackendError::Unauthenticated.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            BackendError::unauthorized("User not authorized").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            BackendError::not_found("Post not found").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            BackendError::Database(sqlx::Error::RowNotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_conflict_body_uses_errors_list() {
        let body = BackendError::conflict("User already exists").body();
        assert_eq!(body, json!({ "errors": [{ "msg": "User already exists" }] }));
    }

    #[test]
    fn test_validation_body_lists_fields() {
        let err: BackendError =
            SharedError::validation(vec![FieldError::new("text", "Text is required")]).into();
        assert_eq!(
            err.body(),
            json!({ "errors": [{ "msg": "Text is required", "param": "text" }] })
        );
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let err = BackendError::Database(sqlx::Error::PoolTimedOut);
        assert!(err.is_internal());
        assert_eq!(err.body(), json!({ "msg": "Server Error" }));
        assert!(err.to_string().contains("Database error"));
    }

    #[test]
    fn test_unauthenticated_body() {
        assert_eq!(
            BackendError::Unauthenticated.body(),
            json!({ "msg": "Please Authenticate" })
        );
    }
}

/**
 * Error Conversion
 *
 * This module converts backend errors into HTTP responses and adapts
 * framework rejections into backend errors.
 *
 * # HTTP Response Conversion
 *
 * `BackendError` implements `IntoResponse`, so handlers return it directly.
 * Internal errors are logged here with their full detail; the client only
 * ever sees the generic body produced by `BackendError::body`.
 */

use axum::{
    extract::rejection::JsonRejection,
    response::{IntoResponse, Json, Response},
};

use crate::backend::error::types::BackendError;
use crate::shared::SharedError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if self.is_internal() {
            tracing::error!("Request failed with internal error: {}", self);
        }

        (status, Json(self.body())).into_response()
    }
}

impl From<JsonRejection> for BackendError {
    /// Bodies that are not valid JSON, or not JSON at all, become a
    /// validation error instead of axum's plain-text rejection.
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!("Rejected request body: {}", rejection.body_text());
        BackendError::Validation(SharedError::malformed(rejection.body_text()))
    }
}

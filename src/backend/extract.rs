/**
 * Request Extractors
 *
 * `JsonBody` behaves like `axum::Json` but rejects with a `BackendError`,
 * so a malformed body gets the same `{"errors": [...]}` shape as a failed
 * field check.
 */

use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::backend::error::BackendError;

/// JSON request body with API-shaped rejections
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(request, state).await?;
        Ok(JsonBody(value))
    }
}

/// Parse a path identifier, treating a malformed id the same as a missing resource
pub fn parse_id(raw: &str, not_found_msg: &str) -> Result<Uuid, BackendError> {
    Uuid::parse_str(raw).map_err(|_| {
        tracing::warn!("Malformed identifier in path: {}", raw);
        BackendError::not_found(not_found_msg)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_parse_id_accepts_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string(), "Post not found").unwrap(), id);
    }

    #[test]
    fn test_parse_id_malformed_is_not_found() {
        let err = parse_id("5d7a-not-an-id", "Post not found").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.body(), serde_json::json!({ "msg": "Post not found" }));
    }
}

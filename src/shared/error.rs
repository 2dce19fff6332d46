//! Shared Error Types
//!
//! Errors produced while checking request bodies before any handler logic
//! runs. Each failure is reported per field so clients can highlight the
//! offending input.
//!
//! # Usage
//!
//! ```rust
//! use devconnect::shared::error::{FieldError, SharedError};
//!
//! let error = SharedError::validation(vec![FieldError::new("email", "Please include a valid email")]);
//! assert_eq!(error.field_errors().len(), 1);
//! ```
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single failed check on a request field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Human-readable message shown to the user
    pub msg: String,
    /// Name of the offending field, absent for whole-request failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
}

impl FieldError {
    /// Error attached to a named field
    pub fn new(param: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            param: Some(param.into()),
        }
    }

    /// Error that is not tied to any one field
    pub fn general(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            param: None,
        }
    }
}

/// Errors raised while validating client input
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// One or more fields failed validation
    #[error("Validation failed on {} field(s)", errors.len())]
    ValidationError {
        /// Every failed check, in field declaration order
        errors: Vec<FieldError>,
    },

    /// The body could not be parsed as the expected JSON shape
    #[error("Malformed request body: {message}")]
    MalformedBody {
        /// Parser message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::ValidationError { errors }
    }

    /// Create a new malformed-body error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedBody {
            message: message.into(),
        }
    }

    /// Flatten into the list of field errors sent to the client
    pub fn field_errors(&self) -> Vec<FieldError> {
        match self {
            Self::ValidationError { errors } => errors.clone(),
            Self::MalformedBody { message } => vec![FieldError::general(message.clone())],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let error = SharedError::validation(vec![FieldError::new("email", "Invalid email")]);
        match error {
            SharedError::ValidationError { errors } => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].param.as_deref(), Some("email"));
                assert_eq!(errors[0].msg, "Invalid email");
            }
            _ => panic!("Expected ValidationError"),
        }
    }

    #[test]
    fn test_malformed_body_has_no_param() {
        let error = SharedError::malformed("expected value at line 1");
        let errors = error.field_errors();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].param.is_none());
    }

    #[test]
    fn test_field_error_serialization_skips_missing_param() {
        let json = serde_json::to_value(FieldError::general("User already exists")).unwrap();
        assert_eq!(json, serde_json::json!({ "msg": "User already exists" }));
    }

    #[test]
    fn test_error_display() {
        let error = SharedError::validation(vec![
            FieldError::new("name", "Name is required"),
            FieldError::new("email", "Please enter a valid email!"),
        ]);
        assert!(error.to_string().contains("2 field(s)"));
    }
}

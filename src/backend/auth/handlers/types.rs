/**
 * Authentication Handler Types
 *
 * This module defines the request and response types used by authentication handlers.
 * These types are shared across signup, login, me and profile deletion.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::auth::users::User;
use crate::shared::validation::{is_valid_email, Checks};
use crate::shared::SharedError;

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 6;

/// Sign up request
///
/// Contains the name, email and password for user registration.
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct SignupRequest {
    /// Display name
    pub name: Option<String>,
    /// User's email address
    pub email: Option<String>,
    /// User's password (will be hashed before storage)
    pub password: Option<String>,
}

/// Validated registration data
#[derive(Debug)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl SignupRequest {
    pub fn validate(self) -> Result<NewAccount, SharedError> {
        let email = self.email.as_deref().map(str::trim).unwrap_or_default();
        let password = self.password.as_deref().unwrap_or_default();

        Checks::new()
            .require("name", self.name.as_deref(), "Name is required")
            .check(is_valid_email(email), "email", "Please enter a valid email!")
            .check(
                password.chars().count() >= MIN_PASSWORD_LEN,
                "password",
                "Please enter a password with 6 or more characters",
            )
            .finish()?;

        Ok(NewAccount {
            name: self.name.unwrap_or_default().trim().to_string(),
            email: email.to_string(),
            password: password.to_string(),
        })
    }
}

/// Login request
///
/// Contains the email and password for user authentication.
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct LoginRequest {
    /// User's email address
    pub email: Option<String>,
    /// User's password (will be verified against stored hash)
    pub password: Option<String>,
}

/// Validated login credentials
#[derive(Debug)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(self) -> Result<Credentials, SharedError> {
        let email = self.email.as_deref().map(str::trim).unwrap_or_default();

        Checks::new()
            .check(is_valid_email(email), "email", "Please include a valid email")
            .check(self.password.is_some(), "password", "Password is required")
            .finish()?;

        Ok(Credentials {
            email: email.to_string(),
            password: self.password.unwrap_or_default(),
        })
    }
}

/// Auth response
///
/// Returned by signup and login handlers. Contains the JWT token
/// and user information for immediate authentication.
#[derive(Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    /// User information (without sensitive data)
    pub user: UserResponse,
    /// JWT token for authentication
    pub token: String,
}

/// User response (without sensitive data)
///
/// Does not include the password hash or the list of active tokens.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            avatar: user.avatar,
            created_at: user.created_at,
        }
    }
}

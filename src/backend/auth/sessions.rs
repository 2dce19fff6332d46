/**
 * Session Management and JWT Tokens
 *
 * This module handles JWT token generation and validation for user sessions.
 * A token only proves who signed in; whether it is still usable is decided
 * by the user's list of active tokens (see `users::find_user_by_token`).
 */

use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Unique token ID, keeps two tokens issued in the same second distinct
    pub jti: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

/// Signing keys and token lifetime, shared through application state
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: u64,
}

impl std::fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionKeys")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

impl SessionKeys {
    /// Build keys from an HMAC secret
    ///
    /// # Arguments
    /// * `secret` - HS256 signing secret
    /// * `ttl_secs` - Lifetime written into each token's `exp` claim
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    /// Create a JWT token for a user
    ///
    /// # Arguments
    /// * `user_id` - User ID (UUID)
    ///
    /// # Returns
    /// JWT token string
    pub fn create_token(&self, user_id: Uuid) -> Result<String, jsonwebtoken::errors::Error> {
        let now = jsonwebtoken::get_current_timestamp();

        let claims = Claims {
            sub: user_id.to_string(),
            jti: Uuid::new_v4().to_string(),
            exp: now.saturating_add(self.ttl_secs),
            iat: now,
        };

        self.sign(&claims)
    }

    fn sign(&self, claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
        encode(&Header::default(), claims, &self.encoding)
    }

    /// Verify and decode a JWT token
    ///
    /// # Returns
    /// Decoded claims, or an error for a bad signature, malformed token or
    /// expired `exp` claim
    pub fn verify_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let token_data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(token_data.claims)
    }

    /// Extract user ID from token
    ///
    /// A verified token whose `sub` is not a UUID fails with
    /// `ErrorKind::InvalidSubject`.
    pub fn get_user_id_from_token(&self, token: &str) -> Result<Uuid, jsonwebtoken::errors::Error> {
        let claims = self.verify_token(token)?;
        Uuid::parse_str(&claims.sub).map_err(|_| ErrorKind::InvalidSubject.into())
    }
}

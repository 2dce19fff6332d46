//! Gravatar URLs derived from a user's email.

use sha2::{Digest, Sha256};

const GRAVATAR_BASE: &str = "https://www.gravatar.com/avatar";

/// 200px, PG-rated Gravatar with the "retro" fallback image
pub fn gravatar_url(email: &str) -> String {
    let normalized = email.trim().to_lowercase();
    let hash = hex::encode(Sha256::digest(normalized.as_bytes()));
    format!("{}/{}?s=200&r=pg&d=retro", GRAVATAR_BASE, hash)
}

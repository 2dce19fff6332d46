/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # State Extraction
 *
 * The `FromRef` implementations allow handlers to extract just the pool or
 * just the session keys without taking the whole `AppState`.
 *
 * ```rust
 * use axum::extract::State;
 * use sqlx::SqlitePool;
 *
 * async fn handler(State(pool): State<SqlitePool>) {
 *     // Use pool
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::auth::sessions::SessionKeys;
use crate::backend::server::config::AppConfig;

/// Application state shared by every handler
///
/// # Fields
///
/// * `db_pool` - SQLite connection pool
/// * `sessions` - Token signing and verification keys
/// * `bcrypt_cost` - Work factor for password hashing
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub sessions: Arc<SessionKeys>,
    pub bcrypt_cost: u32,
}

impl AppState {
    /// Build the state from an open pool and the loaded configuration
    pub fn new(db_pool: SqlitePool, config: &AppConfig) -> Self {
        Self {
            db_pool,
            sessions: Arc::new(SessionKeys::new(&config.jwt_secret, config.token_ttl_secs)),
            bcrypt_cost: config.bcrypt_cost,
        }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for Arc<SessionKeys> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.sessions.clone()
    }
}

/// Fresh in-memory state with a cheap hashing cost
#[cfg(test)]
pub(crate) async fn test_state() -> AppState {
    let pool = crate::backend::server::config::connect_database("sqlite::memory:", 1)
        .await
        .expect("in-memory database");
    let config = AppConfig {
        jwt_secret: "test-secret".to_string(),
        bcrypt_cost: 4,
        ..AppConfig::default()
    };
    AppState::new(pool, &config)
}

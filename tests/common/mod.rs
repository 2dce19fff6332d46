//! Common test utilities and helpers
//!
//! - In-memory application fixture driven through `axum-test`
//! - Account helpers for authenticated requests

#![allow(dead_code)]

pub mod auth_helpers;

pub use auth_helpers::*;

use axum_test::TestServer;
use sqlx::SqlitePool;

use devconnect::backend::server::{
    config::{connect_database, AppConfig},
    init::build_app,
    state::AppState,
};

/// Running app on a private in-memory database
pub struct TestApp {
    pub server: TestServer,
    pub pool: SqlitePool,
}

/// Build the full router (middleware and layers included) over a fresh database
pub async fn spawn_app() -> TestApp {
    let config = AppConfig {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "integration-test-secret".to_string(),
        bcrypt_cost: 4,
        ..AppConfig::default()
    };

    let pool = connect_database(&config.database_url, 1)
        .await
        .expect("Failed to open test database");
    let app = build_app(AppState::new(pool.clone(), &config));
    let server = TestServer::new(app).expect("Failed to start test server");

    TestApp { server, pool }
}

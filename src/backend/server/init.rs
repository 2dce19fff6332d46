/**
 * Server Initialization
 *
 * This module opens the database, builds the application state and hands
 * it to the router.
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::{connect_database, AppConfig};
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// # Arguments
///
/// * `config` - Loaded server configuration
///
/// # Returns
///
/// Router ready to serve requests, or the error from opening the database
/// or running migrations
pub async fn create_app(config: &AppConfig) -> Result<Router, sqlx::Error> {
    tracing::info!("Initializing devconnect backend server");

    let db_pool = connect_database(&config.database_url, config.db_max_connections).await?;
    let app_state = AppState::new(db_pool, config);

    Ok(build_app(app_state))
}

/// Router over an already-built state
///
/// Integration tests use this to run the app on an in-memory database.
pub fn build_app(app_state: AppState) -> Router {
    let app = create_router(app_state);
    tracing::info!("Router configured");
    app
}

/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Layers
 *
 * Outermost first:
 * 1. `TraceLayer` - one span per request
 * 2. `CorsLayer` - any origin, method and header
 * 3. `auth_middleware` - protected routes only (`route_layer`)
 */

use axum::{middleware, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::backend::error::BackendError;
use crate::backend::middleware::auth_middleware;
use crate::backend::routes::api_routes::{configure_protected_routes, configure_public_routes};
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state (pool, token keys, hashing cost)
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let public = configure_public_routes(Router::new());

    // Unmatched paths still reach the fallback without a token
    let protected = configure_protected_routes(Router::new()).route_layer(
        middleware::from_fn_with_state(app_state.clone(), auth_middleware),
    );

    public
        .merge(protected)
        .fallback(not_found)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn not_found() -> BackendError {
    BackendError::not_found("Not found")
}

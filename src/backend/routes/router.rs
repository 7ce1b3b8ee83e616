/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. Health check
 * 2. API routes (registration, users, groups)
 *
 * Unknown paths get axum's empty 404 and known paths with the wrong method
 * get 405. Every request is wrapped in a `TraceLayer` span.
 */

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Liveness check body
pub const HEALTH_MESSAGE: &str = "Server is running!";

async fn health() -> &'static str {
    HEALTH_MESSAGE
}

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Directories and coordinator shared by every handler
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new().route("/health", get(health));

    let router = configure_api_routes(router);

    router
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/**
 * Server Initialization
 *
 * This module brings the store up and assembles the router.
 *
 * # Initialization Process
 *
 * 1. Connect to PostgreSQL (bounded by the connect timeout)
 * 2. Ping to verify the connection
 * 3. Run migrations
 * 4. Build `AppState` over the store and create the router
 *
 * Any failure in 1-3 aborts startup; there is no degraded mode without a
 * store.
 */

use std::sync::Arc;

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::ServerConfig;
use crate::backend::server::state::AppState;
use crate::backend::store::{PgStore, Store, StoreError};

/// Connect, ping and migrate
///
/// # Returns
///
/// A ready store, or the first error encountered
pub async fn connect_store(config: &ServerConfig) -> Result<Arc<dyn Store>, StoreError> {
    let store = PgStore::connect(
        &config.database_url,
        &config.database_name,
        &config.store_options(),
    )
    .await?;

    store.ping().await?;
    tracing::info!("Database ping succeeded");

    store.migrate().await?;

    Ok(Arc::new(store))
}

/// Create and configure the Axum application
///
/// # Arguments
///
/// * `store` - A ready store
/// * `config` - Hashing cost and join deadline come from here
pub fn create_app(store: Arc<dyn Store>, config: &ServerConfig) -> Router<()> {
    let app_state = AppState::new(store, config.bcrypt_cost, config.transaction_timeout);

    let app = create_router(app_state);
    tracing::info!("Router configured");

    app
}

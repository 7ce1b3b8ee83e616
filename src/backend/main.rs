/**
 * Cribb Server Entry Point
 *
 * Loads configuration, brings the store up and serves the HTTP API until
 * SIGTERM or SIGINT, then drains requests and closes the store.
 */

use cribb::backend::server::{connect_store, create_app, shutdown_signal, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .init();

    tracing::info!("Server initialization started");

    let config = ServerConfig::from_env()?;
    tracing::info!("Loaded configuration: {:?}", config);

    let store = connect_store(&config).await?;
    let app = create_app(store.clone(), &config);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    tracing::info!("Store closed, server stopped");

    Ok(())
}

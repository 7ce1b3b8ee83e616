//! Shutdown signal handling
//!
//! Resolves on the first SIGTERM or SIGINT (Ctrl+C elsewhere). Passed to
//! `axum::serve(..).with_graceful_shutdown` so in-flight requests drain
//! before the store is closed.

/// Wait for a termination signal
pub async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => tracing::info!("Received SIGTERM"),
                    _ = sigint.recv() => tracing::info!("Received SIGINT"),
                }
            }
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!("Failed to install unix signal handlers: {}; falling back to Ctrl+C", e);
                wait_for_ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    wait_for_ctrl_c().await;

    tracing::info!("Shutdown requested, draining in-flight requests");
}

async fn wait_for_ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}

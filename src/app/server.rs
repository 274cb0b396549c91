use crate::error::HookError;
use axum::Router;
use tokio::signal;
use tracing::info;

/// Bind `host:port` and serve until SIGINT/SIGTERM.
pub async fn serve(app: Router, host: &str, port: u16) -> Result<(), HookError> {
    let bind_addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind((host, port))
        .await
        .map_err(|e| HookError::Bind {
            address: bind_addr,
            source: e,
        })?;
    info!("Listening on {}", listener.local_addr()?);
    info!("  - GET  /health  (health check)");
    info!("  - POST /api     (log hook)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Wait for SIGTERM or SIGINT (Ctrl+C) for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received SIGINT, initiating graceful shutdown"),
        () = terminate => info!("Received SIGTERM, initiating graceful shutdown"),
    }
}

use tracing::debug;

/// Handler for GET /health
pub async fn health_handler() -> &'static str {
    debug!("Health check requested");
    "Healthy"
}

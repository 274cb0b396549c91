use super::state::AppState;
use crate::handler::health::health_handler;
use crate::handler::hook::hook_handler;
use axum::Router;
use axum::routing::{get, post};

/// Build the HTTP router (health + log hook).
pub fn router(state: AppState) -> Router {
    let health_router = Router::new().route("/health", get(health_handler));

    let hook_router = Router::new()
        .route("/api", post(hook_handler))
        .with_state(state);

    Router::new().merge(health_router).merge(hook_router)
}

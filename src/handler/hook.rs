use crate::auth::Identity;
use crate::relay::LogRelay;
use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

/// Body posted by Fluentd's http output.
#[derive(Debug, Deserialize)]
pub struct HookRequest {
    pub log: String,
}

/// Handler for POST /api
///
/// Always answers `"Ok"` once the caller is authenticated; what happens to
/// the notifications stays in the logs.
pub async fn hook_handler(
    State(relay): State<Arc<LogRelay>>,
    identity: Identity,
    Json(body): Json<HookRequest>,
) -> Json<&'static str> {
    debug!(subject = %identity.subject, "Authenticated log shipper");
    relay.relay(&body.log).await;
    Json("Ok")
}

use crate::auth::TokenValidator;
use crate::config::Settings;
use crate::error::HookError;
use crate::notifier::{Notifier, WebhookNotifier};
use crate::relay::LogRelay;
use crate::time::TimeNormalizer;
use axum::extract::FromRef;
use std::sync::Arc;

/// Shared, read-only request state.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub validator: Arc<TokenValidator>,
    pub relay: Arc<LogRelay>,
}

impl AppState {
    pub fn new(validator: TokenValidator, relay: LogRelay) -> Self {
        Self {
            validator: Arc::new(validator),
            relay: Arc::new(relay),
        }
    }

    /// Build the production state: HS256 validator and Discord webhook notifier.
    pub fn from_settings(settings: &Settings) -> Result<Self, HookError> {
        let notifier: Arc<dyn Notifier> = Arc::new(WebhookNotifier::new(
            settings.discord_webhook_url.clone(),
            settings.delivery_timeout,
        )?);
        let normalizer = TimeNormalizer::new(
            settings.minecraft_server_timezone,
            settings.notification_timezone,
        );

        Ok(Self::new(
            TokenValidator::new(&settings.jwt_secret_key),
            LogRelay::new(normalizer, notifier),
        ))
    }
}

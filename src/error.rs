use crate::auth::AuthError;
use crate::healthcheck::HealthcheckError;
use crate::notifier::DeliveryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HookError {
    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to bind to address {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),

    #[error("Token error: {0}")]
    Token(#[from] AuthError),

    #[error("Failed to build webhook client: {0}")]
    Client(#[from] DeliveryError),

    #[error("Healthcheck failed: {0}")]
    Healthcheck(#[from] HealthcheckError),
}

/// Startup configuration problems. All of them are fatal.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required setting: {flag} (or {env})")]
    Missing {
        flag: &'static str,
        env: &'static str,
    },

    #[error("Unknown timezone for {setting}: {value}")]
    InvalidTimezone { setting: &'static str, value: String },

    #[error("Invalid webhook URL '{value}': {reason}")]
    InvalidUrl { value: String, reason: String },

    #[error("Port cannot be 0")]
    InvalidPort,

    #[error("Host cannot be empty")]
    EmptyHost,

    #[error("JWT secret key cannot be empty")]
    EmptySecret,

    #[error("Delivery timeout must be greater than 0")]
    InvalidTimeout,

    #[error("Failed to read {env}: {source}")]
    SecretFile {
        env: String,
        #[source]
        source: std::io::Error,
    },
}

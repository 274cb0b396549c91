//! Outbound delivery of notification messages.

pub mod webhook;

use crate::domain::NotificationMessage;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;
use tracing::{debug, error};

pub use webhook::WebhookNotifier;

#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("Webhook request timed out after {0:?}")]
    Timeout(std::time::Duration),
    #[error("Webhook responded with HTTP {status}")]
    Status { status: u16 },
    #[error("Webhook transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Invalid client configuration: {0}")]
    Client(String),
}

/// Delivery backend for notifications (Discord webhook, test doubles).
///
/// This trait is dyn-compatible by using boxed futures instead of `impl Future`.
pub trait Notifier: Send + Sync {
    fn deliver<'a>(
        &'a self,
        message: &'a NotificationMessage,
    ) -> Pin<Box<dyn Future<Output = Result<(), DeliveryError>> + Send + 'a>>;
}

/// Best-effort delivery: failures are logged and swallowed.
///
/// Returns whether the message was accepted, for bookkeeping only.
pub async fn notify(notifier: &dyn Notifier, message: &NotificationMessage) -> bool {
    match notifier.deliver(message).await {
        Ok(()) => {
            debug!("Delivered notification: {message}");
            true
        }
        Err(e) => {
            error!(error = ?e, "Failed to deliver notification '{message}': {e}");
            false
        }
    }
}

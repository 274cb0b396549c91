use super::{DeliveryError, Notifier};
use crate::domain::NotificationMessage;
use reqwest::Client;
use serde::Serialize;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!("minecraft-log-hook/", env!("CARGO_PKG_VERSION"));

#[derive(Serialize)]
struct WebhookPayload<'a> {
    content: &'a str,
}

/// Posts `{"content": ...}` to a Discord-compatible webhook URL.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: Client,
    url: Url,
    timeout: Duration,
}

impl WebhookNotifier {
    pub fn new(url: Url, timeout: Duration) -> Result<Self, DeliveryError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| DeliveryError::Client(e.to_string()))?;

        Ok(Self {
            client,
            url,
            timeout,
        })
    }

    async fn post(&self, message: &NotificationMessage) -> Result<(), DeliveryError> {
        let payload = WebhookPayload {
            content: message.as_str(),
        };

        let response = self
            .client
            .post(self.url.clone())
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DeliveryError::Timeout(self.timeout)
                } else {
                    DeliveryError::Transport(e)
                }
            })?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(DeliveryError::Status {
                status: status.as_u16(),
            })
        }
    }
}

impl Notifier for WebhookNotifier {
    fn deliver<'a>(
        &'a self,
        message: &'a NotificationMessage,
    ) -> Pin<Box<dyn Future<Output = Result<(), DeliveryError>> + Send + 'a>> {
        Box::pin(self.post(message))
    }
}

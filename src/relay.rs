//! Per-request pipeline: extract player events, convert their timestamps,
//! format the chat messages and hand them to the notifier.

use crate::domain::{NotificationMessage, PlayerEvent};
use crate::extractor::EventExtractor;
use crate::formatter::format_notification;
use crate::notifier::{Notifier, notify};
use crate::time::{TimeNormalizer, TimestampError};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// What happened to one log line. Never surfaced to the HTTP caller.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RelaySummary {
    pub matched: usize,
    pub dropped: usize,
    pub delivered: usize,
    pub failed: usize,
}

pub struct LogRelay {
    extractor: EventExtractor,
    normalizer: TimeNormalizer,
    notifier: Arc<dyn Notifier>,
}

impl LogRelay {
    pub fn new(normalizer: TimeNormalizer, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            extractor: EventExtractor::new(),
            normalizer,
            notifier,
        }
    }

    pub async fn relay(&self, raw: &str) -> RelaySummary {
        info!("Incoming log: {raw}");

        let mut summary = RelaySummary::default();
        let mut messages = Vec::new();

        for result in self.extractor.scan(raw) {
            summary.matched += 1;
            match result.and_then(|event| self.render(&event)) {
                Ok(message) => {
                    info!("{message}");
                    messages.push(message);
                }
                Err(e) => {
                    warn!("Dropping player event: {e}");
                    summary.dropped += 1;
                }
            }
        }

        for message in &messages {
            if notify(self.notifier.as_ref(), message).await {
                summary.delivered += 1;
            } else {
                summary.failed += 1;
            }
        }

        debug!(?summary, "Finished relaying log line");
        summary
    }

    fn render(&self, event: &PlayerEvent) -> Result<NotificationMessage, TimestampError> {
        let instant = match event.timestamp {
            Some(naive) => self.normalizer.normalize(naive)?,
            None => self.normalizer.now(),
        };
        Ok(format_notification(event, &instant))
    }
}

impl std::fmt::Debug for LogRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogRelay")
            .field("normalizer", &self.normalizer)
            .finish_non_exhaustive()
    }
}

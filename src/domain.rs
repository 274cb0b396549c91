use chrono::NaiveDateTime;
use std::fmt;

/// Which player signal a log line carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Connected,
    Disconnected,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Connected => "connected",
            EventKind::Disconnected => "disconnected",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A connect/disconnect occurrence pulled out of one log line.
///
/// `timestamp` is the server's wall-clock time with no zone attached. It is
/// `None` when the line had no bracketed `[<timestamp> INFO]` prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerEvent {
    pub kind: EventKind,
    pub timestamp: Option<NaiveDateTime>,
    pub player_name: String,
}

/// Chat message text ready to be posted to the webhook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage(String);

impl NotificationMessage {
    pub fn new(content: impl Into<String>) -> Self {
        Self(content.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NotificationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

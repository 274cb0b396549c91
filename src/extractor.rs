//! Player connect/disconnect detection in Bedrock server log lines.
//!
//! Each pattern runs independently over the same trimmed line, so one line
//! can yield zero, one or two events.

use crate::domain::{EventKind, PlayerEvent};
use crate::time::{TimestampError, parse_log_timestamp};
use regex::Regex;
use std::sync::LazyLock;

// The `[<timestamp> INFO] ` prefix is optional; older server builds omit it.
// The name runs up to the first comma followed by whitespace or end of line.
static DISCONNECTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\[(?P<ts>.+?) INFO\] )?Player disconnected: (?P<name>.+?),(?:\s|$)")
        .expect("disconnect pattern is valid")
});

static CONNECTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\[(?P<ts>.+?) INFO\] )?Player connected: (?P<name>.+?),(?:\s|$)")
        .expect("connect pattern is valid")
});

struct EventPattern {
    kind: EventKind,
    regex: &'static LazyLock<Regex>,
}

impl EventPattern {
    fn scan(&self, line: &str) -> Option<Result<PlayerEvent, TimestampError>> {
        let caps = self.regex.captures(line)?;
        let player_name = caps["name"].to_string();

        let timestamp = match caps.name("ts") {
            Some(ts) => match parse_log_timestamp(ts.as_str()) {
                Ok(parsed) => Some(parsed),
                Err(e) => return Some(Err(e)),
            },
            None => None,
        };

        Some(Ok(PlayerEvent {
            kind: self.kind,
            timestamp,
            player_name,
        }))
    }
}

/// Disconnect is checked before connect.
static PATTERNS: [EventPattern; 2] = [
    EventPattern {
        kind: EventKind::Disconnected,
        regex: &DISCONNECTED,
    },
    EventPattern {
        kind: EventKind::Connected,
        regex: &CONNECTED,
    },
];

#[derive(Debug, Default, Clone, Copy)]
pub struct EventExtractor;

impl EventExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Run every pattern against `line`. Matches whose timestamp does not
    /// parse come back as errors; the relay logs and drops those.
    pub fn scan(&self, line: &str) -> Vec<Result<PlayerEvent, TimestampError>> {
        let line = line.trim();
        PATTERNS
            .iter()
            .filter_map(|pattern| pattern.scan(line))
            .collect()
    }
}

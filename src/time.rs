//! Conversion of the server's naive log timestamps into the notification zone.

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use thiserror::Error;

/// Layout of the timestamp inside `[... INFO]`, e.g. `2024-01-02 03:04:05:678`.
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S:%3f";

#[derive(Error, Debug)]
pub enum TimestampError {
    #[error("Malformed log timestamp '{value}': {source}")]
    Malformed {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Local time {value} does not exist in {zone}")]
    NonexistentLocalTime { value: NaiveDateTime, zone: Tz },
}

/// Parse a timestamp captured from a log line. The layout must match exactly.
pub fn parse_log_timestamp(value: &str) -> Result<NaiveDateTime, TimestampError> {
    NaiveDateTime::parse_from_str(value, LOG_TIMESTAMP_FORMAT).map_err(|source| {
        TimestampError::Malformed {
            value: value.to_string(),
            source,
        }
    })
}

/// Interprets wall-clock times in the server zone and renders them in the
/// notification zone. Both zones are fixed at startup.
#[derive(Debug, Clone, Copy)]
pub struct TimeNormalizer {
    source: Tz,
    target: Tz,
}

impl TimeNormalizer {
    pub fn new(source: Tz, target: Tz) -> Self {
        Self { source, target }
    }

    /// Ambiguous wall-clock times (DST fall-back) resolve to the earlier instant.
    pub fn normalize(&self, naive: NaiveDateTime) -> Result<DateTime<Tz>, TimestampError> {
        let local = naive
            .and_local_timezone(self.source)
            .earliest()
            .ok_or(TimestampError::NonexistentLocalTime {
                value: naive,
                zone: self.source,
            })?;
        Ok(local.with_timezone(&self.target))
    }

    pub fn normalize_str(&self, value: &str) -> Result<DateTime<Tz>, TimestampError> {
        self.normalize(parse_log_timestamp(value)?)
    }

    /// Current instant in the notification zone, used for events without a timestamp.
    pub fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.target)
    }
}

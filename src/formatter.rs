use crate::domain::{EventKind, NotificationMessage, PlayerEvent};
use chrono::{DateTime, SecondsFormat, TimeZone};

fn verb_phrase(kind: EventKind) -> &'static str {
    match kind {
        EventKind::Connected => "が入室しました",
        EventKind::Disconnected => "が退出しました",
    }
}

/// Build `[<RFC 3339 instant>] <player> <phrase>`.
///
/// The offset is always written as `+HH:MM`. A non-zero fraction is written
/// with six digits (`.678000`), a zero fraction is left out. The player name
/// is passed through untouched.
pub fn format_notification<Tz: TimeZone>(
    event: &PlayerEvent,
    instant: &DateTime<Tz>,
) -> NotificationMessage {
    let precision = if instant.timestamp_subsec_nanos() == 0 {
        SecondsFormat::Secs
    } else {
        SecondsFormat::Micros
    };
    let stamp = instant.fixed_offset().to_rfc3339_opts(precision, false);
    NotificationMessage::new(format!(
        "[{stamp}] {} {}",
        event.player_name,
        verb_phrase(event.kind)
    ))
}

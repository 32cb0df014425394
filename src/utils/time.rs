//! Time and timestamp utilities

use chrono::{DateTime, Duration, SecondsFormat, Utc};

/// Current time as an ISO-8601 UTC string
pub fn current_timestamp() -> String {
    iso_timestamp(Utc::now())
}

/// Format as ISO-8601 UTC with millisecond precision, e.g. `2026-10-19T08:30:00.000Z`
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// ISO-8601 timestamp `minutes` before `anchor`
pub fn minutes_before(anchor: DateTime<Utc>, minutes: i64) -> String {
    iso_timestamp(anchor - Duration::minutes(minutes))
}

//! Fixed sample event set
//!
//! Field values are deterministic; only the timestamp anchor moves.

use chrono::{DateTime, Utc};

use crate::types::{Category, EventRecord, Severity};
use crate::utils::time::minutes_before;

/// Four sample events, newest first, 1 to 4 minutes before `now`
pub fn sample_events(now: DateTime<Utc>) -> Vec<EventRecord> {
    let at = |minutes| minutes_before(now, minutes);

    vec![
        EventRecord::new("evt-1", "srv-1", Severity::Critical, Category::Network, at(1))
            .with_source("ids"),
        EventRecord::new("evt-2", "srv-2", Severity::Medium, Category::Auth, at(2))
            .with_source("auth")
            .with_failed_attempts(6),
        EventRecord::new("evt-3", "srv-2", Severity::High, Category::Auth, at(3))
            .with_source("auth")
            .with_failed_attempts(8),
        EventRecord::new("evt-4", "srv-2", Severity::Low, Category::Network, at(4))
            .with_source("ids"),
    ]
}

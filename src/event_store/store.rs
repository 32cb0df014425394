//! Event Store - editable working set of event records
//!
//! The store is owned by the session and mutated only through the
//! operations below. Reads go through `snapshot`, which hands out a copy.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::types::{Category, EventField, EventRecord, Severity};
use crate::utils::time::current_timestamp;

use super::sample::sample_events;

const DEFAULT_ASSET: &str = "srv-1";
const DEFAULT_SOURCE: &str = "auth";

/// Result type for EventStore operations
pub type EventStoreResult<T> = Result<T, EventStoreError>;

/// Errors that can occur in EventStore operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventStoreError {
    #[error("index {index} out of range for {len} events")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("invalid value '{value}' for field {field}")]
    InvalidValue { field: EventField, value: String },
}

/// Ordered collection of event records
#[derive(Debug, Clone)]
pub struct EventStore {
    records: Vec<EventRecord>,
    /// Next numeric suffix for generated ids, independent of `records.len()`
    next_seq: u64,
}

impl EventStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::from_records(Vec::new())
    }

    /// Create a store holding the sample set anchored at the current time
    pub fn sample() -> Self {
        Self::sample_at(Utc::now())
    }

    /// Create a store holding the sample set anchored at `now`
    pub fn sample_at(now: DateTime<Utc>) -> Self {
        Self::from_records(sample_events(now))
    }

    /// Create a store from existing records
    pub fn from_records(records: Vec<EventRecord>) -> Self {
        let next_seq = records.len() as u64 + 1;
        Self { records, next_seq }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&EventRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventRecord> {
        self.records.iter()
    }

    /// Copy of the current collection, safe to serialize or hand off
    pub fn snapshot(&self) -> Vec<EventRecord> {
        self.records.clone()
    }

    /// Append a record seeded with defaults and return the new snapshot
    pub fn add(&mut self) -> Vec<EventRecord> {
        let id = self.generate_id();
        let record = EventRecord::new(
            id,
            DEFAULT_ASSET,
            Severity::Medium,
            Category::Auth,
            current_timestamp(),
        )
        .with_source(DEFAULT_SOURCE);

        tracing::debug!(id = %record.id, "event added");
        self.records.push(record);
        self.snapshot()
    }

    /// Remove the record at `index`, shifting later records left
    pub fn remove(&mut self, index: usize) -> EventStoreResult<EventRecord> {
        self.check_index(index)?;
        let removed = self.records.remove(index);
        tracing::debug!(index, id = %removed.id, "event removed");
        Ok(removed)
    }

    /// Replace a single field of the record at `index`
    ///
    /// Free-text fields are stored verbatim. `severity` and `category` must
    /// name a known variant; anything else is rejected and the record is left
    /// untouched. `failed_attempts` is cleared by empty or non-numeric input.
    pub fn update(&mut self, index: usize, field: EventField, value: &str) -> EventStoreResult<()> {
        self.check_index(index)?;

        let invalid = || EventStoreError::InvalidValue {
            field,
            value: value.to_string(),
        };
        let record = &mut self.records[index];

        match field {
            EventField::Id => record.id = value.to_string(),
            EventField::AssetId => record.asset_id = value.to_string(),
            EventField::Severity => record.severity = value.parse().map_err(|_| invalid())?,
            EventField::Category => record.category = value.parse().map_err(|_| invalid())?,
            EventField::Timestamp => record.timestamp = value.to_string(),
            EventField::Source => record.source = Some(value.to_string()),
            EventField::FailedAttempts => record.failed_attempts = parse_failed_attempts(value),
        }

        tracing::debug!(index, %field, "event updated");
        Ok(())
    }

    /// Replace the collection with the sample set anchored at the current time
    pub fn reset(&mut self) -> Vec<EventRecord> {
        self.reset_at(Utc::now())
    }

    /// Replace the collection with the sample set anchored at `now`
    pub fn reset_at(&mut self, now: DateTime<Utc>) -> Vec<EventRecord> {
        *self = Self::sample_at(now);
        tracing::debug!(count = self.records.len(), "events reset to sample");
        self.snapshot()
    }

    fn check_index(&self, index: usize) -> EventStoreResult<()> {
        if index < self.records.len() {
            Ok(())
        } else {
            Err(EventStoreError::IndexOutOfRange {
                index,
                len: self.records.len(),
            })
        }
    }

    /// Next `evt-N` id not already held by a record
    fn generate_id(&mut self) -> String {
        loop {
            let candidate = format!("evt-{}", self.next_seq);
            self.next_seq += 1;
            if !self.records.iter().any(|r| r.id == candidate) {
                return candidate;
            }
        }
    }
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Interpret operator input for `failed_attempts`
///
/// Empty or non-numeric input means "absent". Integral non-negative numbers
/// such as `6` or `6.0` are accepted.
pub fn parse_failed_attempts(value: &str) -> Option<u32> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(n) = trimmed.parse::<u32>() {
        return Some(n);
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 && n.fract() == 0.0 && n <= u32::MAX as f64 => {
            Some(n as u32)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    fn anchor() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    fn ids(store: &EventStore) -> Vec<String> {
        store.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_reset_yields_sample_set() {
        let mut store = EventStore::new();
        let events = store.reset_at(anchor());

        assert_eq!(events.len(), 4);
        let severities: Vec<Severity> = events.iter().map(|e| e.severity).collect();
        assert_eq!(
            severities,
            vec![Severity::Critical, Severity::Medium, Severity::High, Severity::Low]
        );
        let sources: Vec<&str> = events.iter().filter_map(|e| e.source.as_deref()).collect();
        assert_eq!(sources, vec!["ids", "auth", "auth", "ids"]);
        assert_eq!(events[0].timestamp, "2026-10-19T11:59:00.000Z");
        assert_eq!(events[3].timestamp, "2026-10-19T11:56:00.000Z");
        assert_eq!(events[1].failed_attempts, Some(6));
        assert_eq!(events[2].failed_attempts, Some(8));
    }

    #[test]
    fn test_reset_reseeds_id_counter() {
        let mut store = EventStore::sample_at(anchor());
        store.add();
        store.add();
        assert_eq!(store.get(5).map(|r| r.id.as_str()), Some("evt-6"));

        store.reset_at(anchor());
        let events = store.add();

        assert_eq!(events.len(), 5);
        assert_eq!(events[4].id, "evt-5");
    }

    #[test]
    fn test_add_appends_defaults() {
        let mut store = EventStore::sample_at(anchor());
        let events = store.add();

        assert_eq!(events.len(), 5);
        let added = &events[4];
        assert_eq!(added.id, "evt-5");
        assert_eq!(added.asset_id, "srv-1");
        assert_eq!(added.severity, Severity::Medium);
        assert_eq!(added.category, Category::Auth);
        assert_eq!(added.source.as_deref(), Some("auth"));
        assert_eq!(added.failed_attempts, None);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut store = EventStore::sample_at(anchor());
        for i in 0..store.len() {
            let mut copy = store.clone();
            let mut expected = ids(&store);
            expected.remove(i);

            copy.remove(i).unwrap();
            assert_eq!(copy.len(), store.len() - 1);
            assert_eq!(ids(&copy), expected);
        }

        let err = store.remove(4).unwrap_err();
        assert_eq!(err, EventStoreError::IndexOutOfRange { index: 4, len: 4 });
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_add_then_remove_last_round_trips() {
        let mut store = EventStore::sample_at(anchor());
        let before = store.snapshot();

        store.add();
        store.remove(store.len() - 1).unwrap();

        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_generated_ids_survive_removal() {
        // Deriving ids from the length would hand out evt-2 twice here
        let mut store = EventStore::new();
        store.add();
        store.add();
        store.remove(0).unwrap();
        store.add();

        let all = ids(&store);
        let unique: HashSet<&String> = all.iter().collect();
        assert_eq!(all, vec!["evt-2", "evt-3"]);
        assert_eq!(unique.len(), all.len());
    }

    #[test]
    fn test_generated_ids_skip_edited_ids() {
        let mut store = EventStore::sample_at(anchor());
        store.update(0, EventField::Id, "evt-5").unwrap();
        store.add();

        assert_eq!(store.get(4).unwrap().id, "evt-6");
    }

    #[test]
    fn test_update_failed_attempts() {
        let mut store = EventStore::sample_at(anchor());

        store.update(0, EventField::FailedAttempts, "6").unwrap();
        assert_eq!(store.get(0).unwrap().failed_attempts, Some(6));

        store.update(0, EventField::FailedAttempts, "").unwrap();
        assert_eq!(store.get(0).unwrap().failed_attempts, None);

        store.update(1, EventField::FailedAttempts, "many").unwrap();
        assert_eq!(store.get(1).unwrap().failed_attempts, None);

        let json = serde_json::to_value(store.snapshot()).unwrap();
        assert!(json[1].get("failed_attempts").is_none());
    }

    #[test]
    fn test_parse_failed_attempts() {
        assert_eq!(parse_failed_attempts(" 12 "), Some(12));
        assert_eq!(parse_failed_attempts("6.0"), Some(6));
        assert_eq!(parse_failed_attempts("6.5"), None);
        assert_eq!(parse_failed_attempts("-1"), None);
        assert_eq!(parse_failed_attempts("NaN"), None);
        assert_eq!(parse_failed_attempts("inf"), None);
    }

    #[test]
    fn test_update_rejects_unknown_enum_values() {
        let mut store = EventStore::sample_at(anchor());
        let before = store.snapshot();

        let err = store.update(0, EventField::Severity, "urgent").unwrap_err();
        assert_eq!(
            err,
            EventStoreError::InvalidValue {
                field: EventField::Severity,
                value: "urgent".to_string(),
            }
        );
        assert!(store.update(0, EventField::Category, "physical").is_err());
        assert_eq!(store.snapshot(), before);

        store.update(0, EventField::Severity, "low").unwrap();
        store.update(0, EventField::Category, "system").unwrap();
        assert_eq!(store.get(0).unwrap().severity, Severity::Low);
        assert_eq!(store.get(0).unwrap().category, Category::System);
    }

    #[test]
    fn test_update_stores_free_text_verbatim() {
        let mut store = EventStore::sample_at(anchor());
        store.update(3, EventField::AssetId, "db-7 ").unwrap();
        store.update(3, EventField::Timestamp, "yesterday").unwrap();
        store.update(3, EventField::Source, "edr").unwrap();

        let record = store.get(3).unwrap();
        assert_eq!(record.asset_id, "db-7 ");
        assert_eq!(record.timestamp, "yesterday");
        assert_eq!(record.source.as_deref(), Some("edr"));

        assert!(store.update(9, EventField::Id, "x").is_err());
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut store = EventStore::sample_at(anchor());
        let mut snapshot = store.snapshot();
        snapshot[0].asset_id = "tampered".to_string();
        snapshot.clear();

        assert_eq!(store.len(), 4);
        assert_eq!(store.get(0).unwrap().asset_id, "srv-1");

        store.remove(0).unwrap();
        assert_eq!(store.len(), 3);
    }
}

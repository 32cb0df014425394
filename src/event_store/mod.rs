//! Event Store Module
//!
//! Owns the ordered, editable working set of event records:
//! - `EventStore`: add / remove / update / reset / snapshot
//! - `sample_events`: the fixed sample set used by reset
//!
//! Operations never reorder records. `add` appends, `remove` shifts later
//! records left by one.

mod sample;
mod store;

pub use sample::sample_events;
pub use store::{parse_failed_attempts, EventStore, EventStoreError, EventStoreResult};

//! Data types for the security dashboard
//!
//! This module contains the event records curated by the operator and the
//! analysis report returned by the pipeline.

mod event;
mod report;

pub use event::{Category, EventField, EventRecord, Severity};
pub use report::{
    Alert, AnalysisReport, Incident, ReportSection, EVENT_SUMMARY, INCIDENT_SUMMARY,
};

/// Result type for dashboard operations that mix error sources
pub type DashboardResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

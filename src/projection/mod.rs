//! Result Projection Module
//!
//! Pure transformations from an `AnalysisReport` into what the dashboard
//! draws. Nothing here depends on the event store or the pipeline client.
//!
//! - `project_severity_chart`: per-asset severity counts as flat chart rows
//! - `project_incident_status`: incident counts by status
//! - `EventSummary` / `IncidentSummary`: typed accessors over report sections
//! - `DashboardView`: alerts, incidents and actions with display defaults

mod chart;
mod summary;
mod view;

pub use chart::{project_incident_status, project_severity_chart, SeverityChartRow, StatusCount};
pub use summary::{EventSummary, IncidentSummary, SummaryError};
pub use view::{AlertRow, DashboardView, IncidentRow};

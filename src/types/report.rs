//! Analysis report types returned by the pipeline
//!
//! The report is consumed read-only. Alerts, incidents and actions are kept
//! close to the wire shape so they can be passed straight to the view; only
//! the event-summary section is reshaped (see `projection`).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Section type carrying per-asset severity counts
pub const EVENT_SUMMARY: &str = "event-summary";

/// Section type carrying incident status counts
pub const INCIDENT_SUMMARY: &str = "incident-summary";

/// Full pipeline response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(default, alias = "reports", deserialize_with = "null_as_default")]
    pub report: Vec<ReportSection>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub alerts: Vec<Alert>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub incidents: Vec<Incident>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub executed_actions: Vec<String>,
}

/// Read an explicit `null` the same as an absent key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl AnalysisReport {
    /// First section of the given type
    pub fn section(&self, kind: &str) -> Option<&ReportSection> {
        self.report.iter().find(|s| s.kind == kind)
    }
}

/// One typed section of the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub findings: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_by: Option<String>,
}

impl ReportSection {
    pub fn new(kind: impl Into<String>, findings: Value) -> Self {
        Self {
            id: None,
            kind: kind.into(),
            findings,
            period_start: None,
            period_end: None,
            generated_by: None,
        }
    }
}

/// Detection rule match over one or more events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub rule_id: String,
    /// Passed through verbatim
    #[serde(default)]
    pub severity: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub event_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

/// Grouping of alerts requiring operator response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incident {
    #[serde(default)]
    pub id: String,
    /// Passed through verbatim
    #[serde(default)]
    pub priority: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub alert_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sla_due_at: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub timeline: Vec<String>,
}

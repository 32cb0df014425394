//! Chart-ready aggregates

use serde::Serialize;
use serde_json::{Map, Value};

use crate::types::{AnalysisReport, Severity};

use super::summary::{EventSummary, IncidentSummary};

/// Key holding the asset id in a chart row
const ASSET_KEY: &str = "asset";

/// One bar of the stacked severity chart
///
/// Serializes flat, e.g. `{"asset": "srv-2", "medium": 1, "high": 1}`.
/// Count keys are passed through as reported; the chart draws the four
/// canonical severities and ignores the rest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeverityChartRow {
    pub asset: String,
    #[serde(flatten)]
    pub counts: Map<String, Value>,
}

impl SeverityChartRow {
    pub fn count(&self, severity: Severity) -> Option<u64> {
        self.counts.get(severity.as_str()).and_then(Value::as_u64)
    }

    /// Sum of the four canonical severity counts
    pub fn total(&self) -> u64 {
        Severity::ALL.iter().filter_map(|s| self.count(*s)).sum()
    }
}

/// Incident count for one status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: u64,
}

/// Reshape the event-summary section into chart rows, one per asset
///
/// No report, no event-summary section, or no usable assets mapping all
/// yield an empty chart. Row order follows the report's asset order.
pub fn project_severity_chart(report: Option<&AnalysisReport>) -> Vec<SeverityChartRow> {
    let Some(report) = report else {
        return Vec::new();
    };

    let summary = match EventSummary::from_report(report) {
        Ok(summary) => summary,
        Err(e) => {
            tracing::debug!(reason = %e, "severity chart is empty");
            return Vec::new();
        }
    };

    summary
        .assets()
        .map(|(asset, counts)| {
            let counts: Map<String, Value> = counts
                .map(|c| {
                    c.iter()
                        .filter(|(key, _)| key.as_str() != ASSET_KEY)
                        .map(|(key, value)| (key.clone(), value.clone()))
                        .collect()
                })
                .unwrap_or_default();
            SeverityChartRow {
                asset: asset.to_string(),
                counts,
            }
        })
        .collect()
}

/// Incident counts by status from the incident-summary section
pub fn project_incident_status(report: Option<&AnalysisReport>) -> Vec<StatusCount> {
    let Some(summary) = report.and_then(|r| IncidentSummary::from_report(r).ok()) else {
        return Vec::new();
    };

    summary
        .by_status()
        .map(|(status, count)| StatusCount {
            status: status.to_string(),
            count,
        })
        .collect()
}

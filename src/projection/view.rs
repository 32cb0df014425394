//! Render-ready view of a pipeline result
//!
//! Alerts, incidents and executed actions are passed through with their
//! display defaults applied. The `Display` impl renders the whole view as
//! plain text for terminals.

use std::fmt;

use serde::Serialize;

use crate::types::{Alert, AnalysisReport, Incident, Severity};

use super::chart::{project_incident_status, project_severity_chart, SeverityChartRow, StatusCount};
use super::summary::EventSummary;

const MISSING: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertRow {
    pub id: String,
    pub rule: String,
    pub severity: String,
    /// Event ids joined with ", "
    pub events: String,
}

impl From<&Alert> for AlertRow {
    fn from(alert: &Alert) -> Self {
        Self {
            id: alert.id.clone(),
            rule: alert.rule_id.clone(),
            severity: alert.severity.clone(),
            events: alert.event_ids.join(", "),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncidentRow {
    pub id: String,
    pub priority: String,
    pub assignee: String,
    pub resolution: String,
    /// Alert ids, sorted, joined with ", "
    pub alerts: String,
}

impl From<&Incident> for IncidentRow {
    fn from(incident: &Incident) -> Self {
        let mut alert_ids: Vec<&str> = incident.alert_ids.iter().map(String::as_str).collect();
        alert_ids.sort_unstable();

        Self {
            id: incident.id.clone(),
            priority: incident.priority.clone(),
            assignee: non_empty_or_missing(incident.assignee.as_deref()),
            resolution: non_empty_or_missing(incident.resolution.as_deref()),
            alerts: alert_ids.join(", "),
        }
    }
}

fn non_empty_or_missing(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => MISSING.to_string(),
    }
}

/// Everything the dashboard draws for one result
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardView {
    pub alerts: Vec<AlertRow>,
    pub incidents: Vec<IncidentRow>,
    pub severity_chart: Vec<SeverityChartRow>,
    /// Event total as reported in the event-summary section
    pub total_events: Option<u64>,
    pub incident_status: Vec<StatusCount>,
    pub executed_actions: Vec<String>,
}

impl DashboardView {
    /// Build the view; no report yields an empty view
    pub fn from_report(report: Option<&AnalysisReport>) -> Self {
        let Some(r) = report else {
            return Self::default();
        };

        Self {
            alerts: r.alerts.iter().map(AlertRow::from).collect(),
            incidents: r.incidents.iter().map(IncidentRow::from).collect(),
            severity_chart: project_severity_chart(report),
            total_events: EventSummary::from_report(r)
                .ok()
                .and_then(|summary| summary.total_events()),
            incident_status: project_incident_status(report),
            executed_actions: r.executed_actions.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
            && self.incidents.is_empty()
            && self.severity_chart.is_empty()
            && self.total_events.is_none()
            && self.incident_status.is_empty()
            && self.executed_actions.is_empty()
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== ALERTS ===")?;
        if self.alerts.is_empty() {
            writeln!(f, "(none)")?;
        }
        for a in &self.alerts {
            writeln!(f, "{:<20} {:<8} {:<9} {}", a.id, a.rule, a.severity, a.events)?;
        }

        writeln!(f, "\n=== INCIDENTS ===")?;
        if self.incidents.is_empty() {
            writeln!(f, "(none)")?;
        }
        for inc in &self.incidents {
            writeln!(
                f,
                "- {} | priority={} | assignee={} | resolution={} | alerts={}",
                inc.id, inc.priority, inc.assignee, inc.resolution, inc.alerts
            )?;
        }
        if !self.incident_status.is_empty() {
            let statuses: Vec<String> = self
                .incident_status
                .iter()
                .map(|s| format!("{}={}", s.status, s.count))
                .collect();
            writeln!(f, "  by status: {}", statuses.join(", "))?;
        }

        writeln!(f, "\n=== EVENT SUMMARY ===")?;
        if let Some(total) = self.total_events {
            writeln!(f, "total events: {}", total)?;
        }
        if self.severity_chart.is_empty() {
            writeln!(f, "(none)")?;
        }
        for row in &self.severity_chart {
            write!(f, "{:<10}", row.asset)?;
            for severity in Severity::ALL {
                write!(f, " {}={}", severity, row.count(severity).unwrap_or(0))?;
            }
            writeln!(f)?;
        }

        writeln!(f, "\n=== EXECUTED ACTIONS ===")?;
        if self.executed_actions.is_empty() {
            writeln!(f, "(none)")?;
        }
        for action in &self.executed_actions {
            writeln!(f, " - {}", action)?;
        }
        Ok(())
    }
}

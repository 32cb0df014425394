//! Typed access to the summary sections of a report

use serde_json::{Map, Value};
use thiserror::Error;

use crate::types::{AnalysisReport, ReportSection, EVENT_SUMMARY, INCIDENT_SUMMARY};

/// Why a summary could not be read from a report
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SummaryError {
    #[error("report has no {0} section")]
    MissingSection(&'static str),
    #[error("{section} findings have no {key} mapping")]
    MissingFindings {
        section: &'static str,
        key: &'static str,
    },
    #[error("{section} findings.{key} is not an object")]
    MalformedFindings {
        section: &'static str,
        key: &'static str,
    },
}

/// The event-summary section: per-asset severity counts
#[derive(Debug, Clone, Copy)]
pub struct EventSummary<'a> {
    section: &'a ReportSection,
    assets: &'a Map<String, Value>,
}

impl<'a> EventSummary<'a> {
    pub fn from_report(report: &'a AnalysisReport) -> Result<Self, SummaryError> {
        let section = report
            .section(EVENT_SUMMARY)
            .ok_or(SummaryError::MissingSection(EVENT_SUMMARY))?;
        let assets = findings_object(section, EVENT_SUMMARY, "assets")?;
        Ok(Self { section, assets })
    }

    /// `findings.total_events`, when the service reports it
    pub fn total_events(&self) -> Option<u64> {
        self.section.findings.get("total_events").and_then(Value::as_u64)
    }

    /// Assets with their severity-count objects, in report order
    ///
    /// An entry shaped `{count, severities: {...}}` yields the nested
    /// `severities` object; any other object is itself the count object.
    /// Non-object entries yield `None`.
    pub fn assets(&self) -> impl Iterator<Item = (&'a str, Option<&'a Map<String, Value>>)> {
        self.assets
            .iter()
            .map(|(asset, entry)| (asset.as_str(), severity_counts(entry)))
    }
}

/// The incident-summary section: incident counts by status
#[derive(Debug, Clone, Copy)]
pub struct IncidentSummary<'a> {
    by_status: &'a Map<String, Value>,
}

impl<'a> IncidentSummary<'a> {
    pub fn from_report(report: &'a AnalysisReport) -> Result<Self, SummaryError> {
        let section = report
            .section(INCIDENT_SUMMARY)
            .ok_or(SummaryError::MissingSection(INCIDENT_SUMMARY))?;
        let by_status = findings_object(section, INCIDENT_SUMMARY, "by_status")?;
        Ok(Self { by_status })
    }

    /// Status and count pairs in report order; non-numeric counts are skipped
    pub fn by_status(&self) -> impl Iterator<Item = (&'a str, u64)> {
        self.by_status
            .iter()
            .filter_map(|(status, count)| count.as_u64().map(|n| (status.as_str(), n)))
    }
}

fn findings_object<'a>(
    section: &'a ReportSection,
    name: &'static str,
    key: &'static str,
) -> Result<&'a Map<String, Value>, SummaryError> {
    match section.findings.get(key) {
        None | Some(Value::Null) => Err(SummaryError::MissingFindings { section: name, key }),
        Some(Value::Object(map)) => Ok(map),
        Some(_) => Err(SummaryError::MalformedFindings { section: name, key }),
    }
}

fn severity_counts(entry: &Value) -> Option<&Map<String, Value>> {
    let object = entry.as_object()?;
    match object.get("severities") {
        Some(Value::Object(nested)) => Some(nested),
        _ => Some(object),
    }
}

//! Event record types
//!
//! An `EventRecord` is one raw security observation curated by the operator
//! before it is handed to the analysis pipeline.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Ordinal risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// All severities, lowest first (the chart's stacking order)
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    /// Highest severity in the iterator, `Low` when it is empty
    pub fn highest<I: IntoIterator<Item = Severity>>(severities: I) -> Severity {
        severities.into_iter().max().unwrap_or(Severity::Low)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            other => Err(format!("unknown severity '{}'", other)),
        }
    }
}

/// Event category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Network,
    Auth,
    System,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Network => "network",
            Category::Auth => "auth",
            Category::System => "system",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "network" => Ok(Category::Network),
            "auth" => Ok(Category::Auth),
            "system" => Ok(Category::System),
            other => Err(format!("unknown category '{}'", other)),
        }
    }
}

/// A security event as held by the store and sent to the pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: String,
    pub asset_id: String,
    #[serde(alias = "serverity")]
    pub severity: Severity,
    pub category: Category,
    /// Intended to be ISO-8601, not validated
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Only meaningful for auth events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_attempts: Option<u32>,
}

impl EventRecord {
    /// Create a record with the required fields and no optional ones
    pub fn new(
        id: impl Into<String>,
        asset_id: impl Into<String>,
        severity: Severity,
        category: Category,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            asset_id: asset_id.into(),
            severity,
            category,
            timestamp: timestamp.into(),
            source: None,
            failed_attempts: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_failed_attempts(mut self, attempts: u32) -> Self {
        self.failed_attempts = Some(attempts);
        self
    }
}

/// Editable fields of an `EventRecord`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventField {
    Id,
    AssetId,
    Severity,
    Category,
    Timestamp,
    Source,
    FailedAttempts,
}

impl EventField {
    /// Wire name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            EventField::Id => "id",
            EventField::AssetId => "asset_id",
            EventField::Severity => "severity",
            EventField::Category => "category",
            EventField::Timestamp => "timestamp",
            EventField::Source => "source",
            EventField::FailedAttempts => "failed_attempts",
        }
    }
}

impl fmt::Display for EventField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for EventField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(EventField::Id),
            "asset_id" | "assetId" => Ok(EventField::AssetId),
            "severity" => Ok(EventField::Severity),
            "category" => Ok(EventField::Category),
            "timestamp" => Ok(EventField::Timestamp),
            "source" => Ok(EventField::Source),
            "failed_attempts" | "failedAttempts" => Ok(EventField::FailedAttempts),
            other => Err(format!("unknown event field '{}'", other)),
        }
    }
}

//! Submission lifecycle state

use std::fmt;
use std::sync::Arc;

use crate::types::AnalysisReport;

use super::error::PipelineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Running,
    Succeeded,
    Failed,
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionStatus::Idle => write!(f, "idle"),
            SubmissionStatus::Running => write!(f, "running"),
            SubmissionStatus::Succeeded => write!(f, "succeeded"),
            SubmissionStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Observable state of the pipeline client
///
/// `result` is the last successful report. It survives later failures, so a
/// stale result and a fresh error message can be visible together until the
/// next submission starts.
#[derive(Debug, Clone, Default)]
pub struct SubmissionState {
    pub status: SubmissionStatus,
    pub result: Option<Arc<AnalysisReport>>,
    /// Present only while `status` is `Failed`
    pub error_message: Option<String>,
    /// Sequence number of the submission that set `status` (0 before any)
    pub sequence: u64,
}

impl SubmissionState {
    pub fn is_running(&self) -> bool {
        self.status == SubmissionStatus::Running
    }

    pub(crate) fn begin(&mut self, sequence: u64) {
        self.status = SubmissionStatus::Running;
        self.error_message = None;
        self.sequence = sequence;
    }

    pub(crate) fn succeed(&mut self, report: AnalysisReport) {
        self.status = SubmissionStatus::Succeeded;
        self.result = Some(Arc::new(report));
        self.error_message = None;
    }

    pub(crate) fn fail(&mut self, error: &PipelineError) {
        self.status = SubmissionStatus::Failed;
        self.error_message = Some(error.to_string());
    }
}

/// How a single submission ended
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Succeeded,
    Failed(PipelineError),
    /// A later submission was issued before this one completed; its
    /// response was dropped without touching the state
    Superseded,
}

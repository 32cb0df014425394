//! Pipeline submission errors

use thiserror::Error;

/// Why a pipeline submission failed
///
/// The display form is what the dashboard shows as the error message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// Network unreachable, DNS failure, connection reset...
    #[error("pipeline request failed: {0}")]
    Transport(String),
    /// Non-2xx status, whatever the body says
    #[error("HTTP {status}")]
    Status { status: u16, body: String },
    /// 2xx response whose body is not a report
    #[error("malformed pipeline response: {0}")]
    Decode(String),
}

impl PipelineError {
    /// Status code for protocol errors
    pub fn status(&self) -> Option<u16> {
        match self {
            PipelineError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

//! Pipeline Module
//!
//! Submits the current event set to the external analysis service and holds
//! the result:
//! - `PipelineClient`: idle → running → succeeded | failed state machine
//! - `PipelineTransport`: seam to the service, `HttpPipelineTransport` in production
//! - `PipelineError`: transport, protocol and decode failures
//!
//! ```text
//! submit(events) ──► begin(seq) ──► transport ──► seq still latest? ──► succeed | fail
//!                     Running                         │ no
//!                                                     └──► discard (Superseded)
//! ```
//!
//! Failures never escape `submit`/`run`; they become state.

mod client;
mod error;
mod state;
mod transport;

pub use client::{PipelineClient, SubmissionHandle};
pub use error::PipelineError;
pub use state::{SubmissionOutcome, SubmissionState, SubmissionStatus};
pub use transport::{HttpPipelineTransport, PipelineTransport};

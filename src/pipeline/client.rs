//! Pipeline client - submission lifecycle
//!
//! Every submission is tagged with a monotonically increasing sequence
//! number. A completion only touches the state if its sequence is still the
//! latest issued, so responses that arrive out of order are dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::DashboardConfig;
use crate::types::EventRecord;

use super::error::PipelineError;
use super::state::{SubmissionOutcome, SubmissionState, SubmissionStatus};
use super::transport::{HttpPipelineTransport, PipelineTransport};

/// Client holding the submission state machine
///
/// Cloning is cheap; clones share state and sequence counter.
#[derive(Clone)]
pub struct PipelineClient {
    inner: Arc<Inner>,
}

struct Inner {
    transport: Arc<dyn PipelineTransport>,
    state: watch::Sender<SubmissionState>,
    /// Sequence number of the most recently issued submission
    latest: AtomicU64,
}

/// A submission running in the background
#[derive(Debug)]
pub struct SubmissionHandle {
    sequence: u64,
    task: JoinHandle<SubmissionOutcome>,
}

impl SubmissionHandle {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Wait for the submission to finish
    pub async fn wait(self) -> SubmissionOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(e) => SubmissionOutcome::Failed(PipelineError::Transport(format!(
                "submission task aborted: {}",
                e
            ))),
        }
    }
}

impl PipelineClient {
    pub fn new<T: PipelineTransport + 'static>(transport: T) -> Self {
        Self::with_transport(Arc::new(transport))
    }

    pub fn with_transport(transport: Arc<dyn PipelineTransport>) -> Self {
        let (state, _) = watch::channel(SubmissionState::default());
        Self {
            inner: Arc::new(Inner {
                transport,
                state,
                latest: AtomicU64::new(0),
            }),
        }
    }

    /// Client talking HTTP to the configured pipeline
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(HttpPipelineTransport::new(config))
    }

    /// Snapshot of the current state
    pub fn state(&self) -> SubmissionState {
        self.inner.state.borrow().clone()
    }

    pub fn status(&self) -> SubmissionStatus {
        self.inner.state.borrow().status
    }

    /// Receiver that observes every state transition
    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.inner.state.subscribe()
    }

    /// Sequence number of the most recently issued submission (0 before any)
    pub fn latest_sequence(&self) -> u64 {
        self.inner.latest.load(Ordering::SeqCst)
    }

    /// Start a submission without waiting for it
    ///
    /// The state is `Running` by the time this returns. Must be called from
    /// within a tokio runtime. A submission already in flight is not
    /// cancelled; its response will be discarded when it arrives.
    pub fn submit(&self, events: Vec<EventRecord>) -> SubmissionHandle {
        let sequence = self.inner.begin(events.len());
        let inner = Arc::clone(&self.inner);
        let task = tokio::spawn(async move { inner.complete(sequence, &events).await });
        SubmissionHandle { sequence, task }
    }

    /// Start a submission only when none is running
    pub fn submit_if_idle(&self, events: Vec<EventRecord>) -> Option<SubmissionHandle> {
        if self.status() == SubmissionStatus::Running {
            tracing::debug!("submission already in flight, ignoring");
            return None;
        }
        Some(self.submit(events))
    }

    /// Run one submission to completion on the current task
    pub async fn run(&self, events: Vec<EventRecord>) -> SubmissionOutcome {
        let sequence = self.inner.begin(events.len());
        self.inner.complete(sequence, &events).await
    }
}

impl Inner {
    fn begin(&self, event_count: usize) -> u64 {
        let mut sequence = 0;
        self.state.send_modify(|state| {
            sequence = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
            state.begin(sequence);
        });
        tracing::info!(sequence, events = event_count, "pipeline submission started");
        sequence
    }

    async fn complete(&self, sequence: u64, events: &[EventRecord]) -> SubmissionOutcome {
        let result = self.transport.run_pipeline(events).await;

        let mut outcome = SubmissionOutcome::Superseded;
        self.state.send_if_modified(|state| {
            // Checked under the channel lock so a concurrent begin cannot slip in
            if self.latest.load(Ordering::SeqCst) != sequence {
                return false;
            }
            outcome = match result {
                Ok(report) => {
                    tracing::info!(
                        sequence,
                        alerts = report.alerts.len(),
                        incidents = report.incidents.len(),
                        "pipeline submission succeeded"
                    );
                    state.succeed(report);
                    SubmissionOutcome::Succeeded
                }
                Err(error) => {
                    tracing::warn!(sequence, error = %error, "pipeline submission failed");
                    state.fail(&error);
                    SubmissionOutcome::Failed(error)
                }
            };
            true
        });

        if outcome == SubmissionOutcome::Superseded {
            tracing::debug!(
                sequence,
                latest = self.latest.load(Ordering::SeqCst),
                "discarding response from superseded submission"
            );
        }
        outcome
    }
}

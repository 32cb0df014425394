//! Dashboard session
//!
//! The session owns the operator's working set and the pipeline client. It
//! is the single place the view talks to: store mutations go through
//! `store_mut`, submissions through `submit`, results come back as a
//! `DashboardView`.

use crate::config::DashboardConfig;
use crate::event_store::EventStore;
use crate::pipeline::{PipelineClient, SubmissionHandle, SubmissionOutcome, SubmissionState};
use crate::projection::{project_severity_chart, DashboardView, SeverityChartRow};

pub struct DashboardSession {
    store: EventStore,
    client: PipelineClient,
}

impl DashboardSession {
    /// Session seeded with the sample event set
    pub fn new(client: PipelineClient) -> Self {
        Self::with_store(EventStore::sample(), client)
    }

    pub fn with_store(store: EventStore, client: PipelineClient) -> Self {
        Self { store, client }
    }

    /// Session talking HTTP to the configured pipeline
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(PipelineClient::from_config(config))
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut EventStore {
        &mut self.store
    }

    pub fn client(&self) -> &PipelineClient {
        &self.client
    }

    pub fn state(&self) -> SubmissionState {
        self.client.state()
    }

    /// Submit the current working set in the background
    pub fn submit(&self) -> SubmissionHandle {
        self.client.submit(self.store.snapshot())
    }

    /// Submit unless a submission is already running
    pub fn submit_if_idle(&self) -> Option<SubmissionHandle> {
        self.client.submit_if_idle(self.store.snapshot())
    }

    /// Submit the current working set and wait for the outcome
    pub async fn run(&self) -> SubmissionOutcome {
        self.client.run(self.store.snapshot()).await
    }

    /// View of the last successful result (empty before any)
    pub fn view(&self) -> DashboardView {
        let state = self.client.state();
        DashboardView::from_report(state.result.as_deref())
    }

    pub fn severity_chart(&self) -> Vec<SeverityChartRow> {
        let state = self.client.state();
        project_severity_chart(state.result.as_deref())
    }
}

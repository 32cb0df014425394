//! Transport to the external analysis service

use async_trait::async_trait;
use reqwest::Client;

use crate::config::DashboardConfig;
use crate::types::{AnalysisReport, EventRecord};

use super::error::PipelineError;

/// Something that can run the analysis pipeline over a set of events
#[async_trait]
pub trait PipelineTransport: Send + Sync {
    async fn run_pipeline(&self, events: &[EventRecord]) -> Result<AnalysisReport, PipelineError>;
}

/// HTTP transport: `POST {base}/run-pipeline` with the events as a JSON array
#[derive(Clone)]
pub struct HttpPipelineTransport {
    client: Client,
    run_url: String,
    health_url: String,
}

impl HttpPipelineTransport {
    pub fn new(config: &DashboardConfig) -> Self {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default HTTP client");
            Client::new()
        });

        Self {
            client,
            run_url: config.run_pipeline_url(),
            health_url: config.health_url(),
        }
    }

    pub fn run_url(&self) -> &str {
        &self.run_url
    }

    /// Probe `GET {base}/health`
    pub async fn health(&self) -> Result<bool, PipelineError> {
        let response = self
            .client
            .get(&self.health_url)
            .send()
            .await
            .map_err(|e| PipelineError::Transport(e.to_string()))?;
        Ok(response.status().is_success())
    }
}

#[async_trait]
impl PipelineTransport for HttpPipelineTransport {
    async fn run_pipeline(&self, events: &[EventRecord]) -> Result<AnalysisReport, PipelineError> {
        let response = self
            .client
            .post(&self.run_url)
            .json(events)
            .send()
            .await
            .map_err(|e| PipelineError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| PipelineError::Transport(e.to_string()))?;

        serde_json::from_slice::<AnalysisReport>(&body)
            .map_err(|e| PipelineError::Decode(e.to_string()))
    }
}

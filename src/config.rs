//! Dashboard configuration
//!
//! Read from the environment once at startup:
//! - `DASHBOARD_API_BASE`: pipeline base URL (default `http://localhost:8000`)
//! - `DASHBOARD_REQUEST_TIMEOUT_SECS`: optional request timeout, unset means
//!   the transport's own behavior applies

use std::env;
use std::time::Duration;

use thiserror::Error;

pub const API_BASE_ENV: &str = "DASHBOARD_API_BASE";
pub const REQUEST_TIMEOUT_ENV: &str = "DASHBOARD_REQUEST_TIMEOUT_SECS";
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{name} must be a whole number of seconds, got '{value}'")]
    InvalidTimeout { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Base URL of the analysis pipeline, without trailing slash
    pub api_base: String,
    pub request_timeout: Option<Duration>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout: None,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base) = lookup(API_BASE_ENV).filter(|v| !v.trim().is_empty()) {
            config = config.with_api_base(base);
        }

        if let Some(raw) = lookup(REQUEST_TIMEOUT_ENV).filter(|v| !v.trim().is_empty()) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidTimeout {
                    name: REQUEST_TIMEOUT_ENV,
                    value: raw.clone(),
                })?;
            config.request_timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into().trim().trim_end_matches('/').to_string();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// `POST` target for pipeline runs
    pub fn run_pipeline_url(&self) -> String {
        format!("{}/run-pipeline", self.api_base)
    }

    pub fn health_url(&self) -> String {
        format!("{}/health", self.api_base)
    }
}

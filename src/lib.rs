//! Security Dashboard Core
//!
//! Client-side orchestration for a security-event review dashboard: curate a
//! working set of events, submit it to an external analysis pipeline, and
//! reshape the returned report into what the dashboard draws.
//!
//! # Modules
//!
//! - `types`: Event records and the analysis report shape
//! - `event_store`: Ordered, editable event collection
//! - `pipeline`: Submission lifecycle against the analysis service
//! - `projection`: Chart aggregates and view models from a report
//! - `session`: Owner of the store and client for one operator session
//! - `config`: Environment configuration
//! - `utils`: Timestamp helpers
//!
//! # Example
//!
//! ```no_run
//! use security_dashboard::{DashboardConfig, DashboardSession};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = DashboardConfig::from_env().unwrap_or_default();
//!     let mut session = DashboardSession::from_config(&config);
//!     session.store_mut().add();
//!     session.run().await;
//!     println!("{}", session.view());
//! }
//! ```

pub mod config;
pub mod event_store;
pub mod pipeline;
pub mod projection;
pub mod session;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::DashboardConfig;
pub use event_store::{EventStore, EventStoreError};
pub use pipeline::{
    HttpPipelineTransport, PipelineClient, PipelineError, PipelineTransport, SubmissionOutcome,
    SubmissionState, SubmissionStatus,
};
pub use projection::{project_severity_chart, DashboardView, SeverityChartRow};
pub use session::DashboardSession;
pub use types::{
    Alert, AnalysisReport, Category, DashboardResult, EventField, EventRecord, Incident,
    ReportSection, Severity,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

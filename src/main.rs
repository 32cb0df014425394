//! Dashboard Session - Binary Entry Point
//!
//! Submits the sample event set to the configured pipeline once and prints
//! the resulting dashboard as text.

use security_dashboard::pipeline::HttpPipelineTransport;
use security_dashboard::types::{DashboardResult, Severity};
use security_dashboard::{DashboardConfig, DashboardSession, PipelineClient, SubmissionOutcome};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> DashboardResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = DashboardConfig::from_env()?;
    let transport = HttpPipelineTransport::new(&config);

    match transport.health().await {
        Ok(true) => tracing::info!(api_base = %config.api_base, "pipeline is healthy"),
        Ok(false) => tracing::warn!(api_base = %config.api_base, "pipeline health check failed"),
        Err(e) => tracing::warn!(api_base = %config.api_base, error = %e, "pipeline unreachable"),
    }

    let session = DashboardSession::new(PipelineClient::new(transport));

    println!("=== EVENTS ===");
    for e in session.store().iter() {
        println!(
            "{:<7} {:<7} {:<9} {:<9} {}",
            e.id,
            e.asset_id,
            e.severity,
            e.category,
            e.source.as_deref().unwrap_or("-")
        );
    }
    println!();

    tracing::info!(
        events = session.store().len(),
        highest = %Severity::highest(session.store().iter().map(|e| e.severity)),
        "submitting working set"
    );
    match session.run().await {
        SubmissionOutcome::Succeeded => print!("{}", session.view()),
        SubmissionOutcome::Failed(e) => {
            eprintln!("pipeline run failed: {}", e);
            std::process::exit(1);
        }
        SubmissionOutcome::Superseded => {}
    }

    Ok(())
}

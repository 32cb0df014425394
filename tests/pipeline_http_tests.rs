//! HTTP integration tests for the pipeline client
//!
//! Each test spins up an in-process pipeline stub on an ephemeral port and
//! points a real `HttpPipelineTransport` at it.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};

use security_dashboard::pipeline::{
    HttpPipelineTransport, PipelineClient, PipelineError, SubmissionOutcome, SubmissionStatus,
};
use security_dashboard::types::{Category, EventRecord, Severity};
use security_dashboard::{project_severity_chart, DashboardConfig, EventStore};

const REPORT: &str = r#"{
    "alerts": [
        { "id": "ALERT-RULE-1-evt-1", "rule_id": "RULE-1", "severity": "critical", "event_ids": ["evt-1"] }
    ],
    "incidents": [
        { "id": "INC-1", "priority": "critical", "assignee": "soc_on_call", "alert_ids": ["ALERT-RULE-1-evt-1"] }
    ],
    "reports": [
        {
            "id": "event-summary",
            "type": "event-summary",
            "findings": {
                "total_events": 4,
                "assets": {
                    "srv-1": { "count": 1, "severities": { "low": 0, "medium": 0, "high": 0, "critical": 1 } },
                    "srv-2": { "count": 3, "severities": { "low": 1, "medium": 1, "high": 1, "critical": 0 } }
                }
            }
        }
    ],
    "executed_actions": ["isolate-host:INC-1", "notify:INC-1"]
}"#;

/// In-process stand-in for the analysis service
struct PipelineStub {
    base: String,
    requests: Arc<Mutex<Vec<Value>>>,
    reply: Arc<Mutex<(StatusCode, &'static str)>>,
}

impl PipelineStub {
    async fn spawn(status: StatusCode, body: &'static str) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let reply = Arc::new(Mutex::new((status, body)));

        let sink = requests.clone();
        let current = reply.clone();
        let app = Router::new()
            .route(
                "/run-pipeline",
                post(move |Json(events): Json<Value>| {
                    sink.lock().push(events);
                    let (status, body) = *current.lock();
                    async move { (status, [("content-type", "application/json")], body) }
                }),
            )
            .route("/health", get(|| async { Json(json!({ "status": "ok" })) }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base: format!("http://{addr}"),
            requests,
            reply,
        }
    }

    fn respond(&self, status: StatusCode, body: &'static str) {
        *self.reply.lock() = (status, body);
    }

    fn client(&self) -> PipelineClient {
        PipelineClient::from_config(&DashboardConfig::default().with_api_base(&self.base))
    }

    fn requests(&self) -> Vec<Value> {
        self.requests.lock().clone()
    }
}

fn sample_events() -> Vec<EventRecord> {
    EventStore::sample().snapshot()
}

#[tokio::test]
async fn test_success_stores_report() {
    let stub = PipelineStub::spawn(StatusCode::OK, REPORT).await;
    let client = stub.client();

    let outcome = client.run(sample_events()).await;

    assert_eq!(outcome, SubmissionOutcome::Succeeded);
    let state = client.state();
    assert_eq!(state.status, SubmissionStatus::Succeeded);
    assert_eq!(state.error_message, None);

    let report = state.result.expect("report");
    assert_eq!(report.alerts.len(), 1);
    assert_eq!(report.incidents[0].assignee.as_deref(), Some("soc_on_call"));
    assert_eq!(report.executed_actions.len(), 2);

    let chart = project_severity_chart(Some(&report));
    assert_eq!(chart.len(), 2);
    assert_eq!(chart[0].asset, "srv-1");
    assert_eq!(chart[0].count(Severity::Critical), Some(1));
    assert_eq!(chart[1].count(Severity::High), Some(1));

    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].as_array().map(Vec::len), Some(4));
}

#[tokio::test]
async fn test_incomplete_report_still_projects_chart() {
    let body = r#"{
        "alerts": [{ "id": "ALERT-1", "severity": "high" }],
        "incidents": null,
        "executed_actions": null,
        "reports": [
            { "findings": {} },
            { "type": "event-summary", "findings": { "assets": { "srv-2": { "medium": 1, "high": 2 } } } }
        ]
    }"#;
    let stub = PipelineStub::spawn(StatusCode::OK, body).await;
    let client = stub.client();

    assert_eq!(client.run(sample_events()).await, SubmissionOutcome::Succeeded);

    let report = client.state().result.expect("report");
    assert_eq!(report.alerts[0].rule_id, "");
    assert!(report.incidents.is_empty());
    let chart = project_severity_chart(Some(&report));
    assert_eq!(chart.len(), 1);
    assert_eq!(chart[0].total(), 3);
}

#[tokio::test]
async fn test_request_body_is_event_array() {
    let stub = PipelineStub::spawn(StatusCode::OK, "{}").await;
    let client = stub.client();

    let events = vec![
        EventRecord::new("evt-1", "srv-1", Severity::Low, Category::System, "2026-10-19T00:00:00Z"),
        EventRecord::new("evt-2", "srv-2", Severity::High, Category::Auth, "2026-10-19T00:01:00Z")
            .with_source("auth")
            .with_failed_attempts(7),
    ];
    assert_eq!(client.run(events).await, SubmissionOutcome::Succeeded);

    assert_eq!(
        stub.requests()[0],
        json!([
            {
                "id": "evt-1",
                "asset_id": "srv-1",
                "severity": "low",
                "category": "system",
                "timestamp": "2026-10-19T00:00:00Z"
            },
            {
                "id": "evt-2",
                "asset_id": "srv-2",
                "severity": "high",
                "category": "auth",
                "timestamp": "2026-10-19T00:01:00Z",
                "source": "auth",
                "failed_attempts": 7
            }
        ])
    );
}

#[tokio::test]
async fn test_server_error_keeps_previous_result() {
    let stub = PipelineStub::spawn(StatusCode::OK, REPORT).await;
    let client = stub.client();
    assert_eq!(client.run(sample_events()).await, SubmissionOutcome::Succeeded);
    let before = client.state().result.expect("report");

    stub.respond(StatusCode::INTERNAL_SERVER_ERROR, REPORT);
    let outcome = client.run(sample_events()).await;

    assert!(matches!(
        outcome,
        SubmissionOutcome::Failed(PipelineError::Status { status: 500, .. })
    ));
    let state = client.state();
    assert_eq!(state.status, SubmissionStatus::Failed);
    assert_eq!(state.error_message.as_deref(), Some("HTTP 500"));
    assert!(Arc::ptr_eq(state.result.as_ref().expect("stale report"), &before));
}

#[tokio::test]
async fn test_new_submission_clears_error_but_not_result() {
    let stub = PipelineStub::spawn(StatusCode::OK, REPORT).await;
    let client = stub.client();
    assert_eq!(client.run(sample_events()).await, SubmissionOutcome::Succeeded);

    stub.respond(StatusCode::BAD_GATEWAY, "");
    assert!(matches!(client.run(sample_events()).await, SubmissionOutcome::Failed(_)));
    let failed = client.state();
    assert_eq!(failed.error_message.as_deref(), Some("HTTP 502"));
    assert!(failed.result.is_some());

    stub.respond(StatusCode::OK, REPORT);
    let handle = client.submit(sample_events());
    let running = client.state();
    assert_eq!(running.status, SubmissionStatus::Running);
    assert_eq!(running.error_message, None);
    assert!(running.result.is_some());

    assert_eq!(handle.wait().await, SubmissionOutcome::Succeeded);
    let state = client.state();
    assert_eq!(state.status, SubmissionStatus::Succeeded);
    assert_eq!(state.error_message, None);
}

#[tokio::test]
async fn test_non_success_status_fails_regardless_of_body() {
    let stub = PipelineStub::spawn(StatusCode::ACCEPTED, REPORT).await;
    let client = stub.client();
    assert_eq!(client.run(sample_events()).await, SubmissionOutcome::Succeeded);

    stub.respond(StatusCode::NOT_FOUND, REPORT);
    match client.run(sample_events()).await {
        SubmissionOutcome::Failed(e) => assert_eq!(e.status(), Some(404)),
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_decode_failure() {
    let stub = PipelineStub::spawn(StatusCode::OK, "<html>oops</html>").await;
    let client = stub.client();

    let outcome = client.run(sample_events()).await;

    assert!(matches!(outcome, SubmissionOutcome::Failed(PipelineError::Decode(_))));
    let state = client.state();
    assert_eq!(state.status, SubmissionStatus::Failed);
    assert!(state
        .error_message
        .as_deref()
        .unwrap_or_default()
        .starts_with("malformed pipeline response"));
}

#[tokio::test]
async fn test_unreachable_service_is_transport_failure() {
    // Grab a free port, then close it so nothing is listening
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = DashboardConfig::default().with_api_base(format!("http://{addr}"));
    let client = PipelineClient::from_config(&config);
    let outcome = client.run(sample_events()).await;

    assert!(matches!(outcome, SubmissionOutcome::Failed(PipelineError::Transport(_))));
    assert_eq!(client.status(), SubmissionStatus::Failed);
    assert!(client.state().result.is_none());
}

#[tokio::test]
async fn test_health_probe() {
    let stub = PipelineStub::spawn(StatusCode::OK, "{}").await;
    let transport = HttpPipelineTransport::new(&DashboardConfig::default().with_api_base(&stub.base));

    assert!(transport.health().await.unwrap());
    assert_eq!(transport.run_url(), format!("{}/run-pipeline", stub.base));
}

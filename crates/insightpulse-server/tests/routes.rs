#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

//! Route-level tests driving the full router (handlers + middleware).

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::{get, scripted_app};
use tower::ServiceExt;

#[tokio::test]
async fn dummy_job_reports_both_outcomes_with_200() {
    let (app, _state, switch) = scripted_app();

    let (status, body) = get(&app, "/execute-dummy-job").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Job executed successfully");

    switch.set_fail(true);
    let (status, body) = get(&app, "/execute-dummy-job").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Job execution failed: Simulated job failure");
}

#[tokio::test]
async fn register_user_counts_every_call() {
    let (app, state, _switch) = scripted_app();
    let reg = state.registry();

    let mut last = 0;
    for _ in 0..5 {
        let (status, body) = get(&app, "/jobs/register-user").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "User registered.");

        let now = reg
            .find_counter("user_registration_throughput_total", &[])
            .unwrap()
            .value();
        assert!(now > last);
        last = now;
    }
    assert_eq!(last, 5);
}

#[tokio::test]
async fn generate_report_records_duration() {
    let (app, state, _switch) = scripted_app();

    let (status, body) = get(&app, "/jobs/generate-report").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Report generated.");

    let timer = state
        .registry()
        .find_timer("report_generation_duration_seconds", &[])
        .unwrap();
    assert_eq!(timer.count(), 1);
}

#[tokio::test]
async fn payment_failure_is_500_and_tagged() {
    let (app, state, switch) = scripted_app();

    let (status, body) = get(&app, "/jobs/process-payment").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Payment processed.");

    switch.set_fail(true);
    let (status, body) = get(&app, "/jobs/process-payment").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Payment failed: Simulated payment failure");

    let reg = state.registry();
    assert_eq!(reg.find_counter("payment_failures_total", &[]).unwrap().value(), 1);

    let failed_tags = [
        ("method", "GET"),
        ("uri", "/jobs/process-payment"),
        ("status", "500"),
        ("outcome", "FAILURE"),
        ("exception", "SimulatedFailure"),
    ];
    let failed = reg.find_timer("http_server_requests_seconds", &failed_tags).unwrap();
    assert_eq!(failed.count(), 1);

    let down_tags = [("method", "GET"), ("uri", "/jobs/process-payment"), ("status", "500")];
    assert_eq!(reg.find_gauge("api_availability", &down_tags).unwrap().value(), 0);
    let up_tags = [("method", "GET"), ("uri", "/jobs/process-payment"), ("status", "200")];
    assert_eq!(reg.find_gauge("api_availability", &up_tags).unwrap().value(), 1);
}

#[tokio::test]
async fn inventory_status_matches_gauge() {
    let (app, state, switch) = scripted_app();
    let gauge = state.registry().find_gauge("inventory_sync_availability", &[]).unwrap();

    switch.set_heads(true);
    let (status, body) = get(&app, "/jobs/inventory-sync").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Inventory Sync Status: AVAILABLE");
    assert_eq!(gauge.value(), 1);

    switch.set_heads(false);
    let (_, body) = get(&app, "/jobs/inventory-sync").await;
    assert_eq!(body, "Inventory Sync Status: UNAVAILABLE");
    assert_eq!(gauge.value(), 0);
}

#[tokio::test]
async fn service_calls_are_instrumented() {
    let (app, state, switch) = scripted_app();

    get(&app, "/jobs/process-payment").await;
    switch.set_fail(true);
    get(&app, "/jobs/process-payment").await;
    get(&app, "/jobs/process-payment").await;

    let reg = state.registry();
    let tags = [("class", "JobService"), ("method", "process_payment")];
    assert_eq!(reg.find_counter("service_success_total", &tags).unwrap().value(), 1);
    assert_eq!(reg.find_counter("job_throughput_total", &tags).unwrap().value(), 1);
    let failed_tags = [
        ("class", "JobService"),
        ("method", "process_payment"),
        ("exception", "SimulatedFailure"),
    ];
    assert_eq!(reg.find_counter("service_failures_total", &failed_tags).unwrap().value(), 2);
    assert_eq!(
        reg.find_timer("service_execution_duration_seconds", &tags).unwrap().count(),
        3
    );
}

#[tokio::test]
async fn metrics_endpoint_renders_prometheus_text() {
    let (app, _state, _switch) = scripted_app();
    get(&app, "/jobs/register-user").await;

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(
        response.headers()["content-type"],
        "text/plain; version=0.0.4; charset=utf-8"
    );

    let (status, body) = get(&app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("# TYPE user_registration_throughput_total counter"));
    assert!(body.contains("user_registration_throughput_total 1\n"));
    assert!(body.contains("# TYPE http_server_requests_seconds histogram"));
    assert!(body.contains("uri=\"/jobs/register-user\""));
    assert!(body.contains("inventory_sync_availability 1\n"));
}

#[tokio::test]
async fn unknown_routes_use_a_fixed_uri_tag() {
    let (app, state, _switch) = scripted_app();

    let (status, _) = get(&app, "/nope/123").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let tags = [
        ("method", "GET"),
        ("uri", "NOT_FOUND"),
        ("status", "404"),
        ("outcome", "FAILURE"),
        ("exception", "None"),
    ];
    let timer = state.registry().find_timer("http_server_requests_seconds", &tags).unwrap();
    assert_eq!(timer.count(), 1);
}

#[tokio::test]
async fn extension_methods_share_one_series() {
    let (app, state, _switch) = scripted_app();

    for i in 0..50 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(format!("X{i}").as_str())
                    .uri(format!("/nope/{i}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    let reg = state.registry();
    assert_eq!(reg.series_count("http_server_requests_seconds"), 1);
    assert_eq!(reg.series_count("api_availability"), 1);

    let tags = [
        ("method", "OTHER"),
        ("uri", "NOT_FOUND"),
        ("status", "404"),
        ("outcome", "FAILURE"),
        ("exception", "None"),
    ];
    let timer = reg.find_timer("http_server_requests_seconds", &tags).unwrap();
    assert_eq!(timer.count(), 50);

    let gauge_tags = [("method", "OTHER"), ("uri", "NOT_FOUND"), ("status", "404")];
    assert_eq!(reg.find_gauge("api_availability", &gauge_tags).unwrap().value(), 1);
}

#[tokio::test]
async fn healthz_is_ok() {
    let (app, _state, _switch) = scripted_app();
    let (status, body) = get(&app, "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

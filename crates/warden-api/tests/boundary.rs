//! # Boundary Tests for warden-api
//!
//! Exercises the full router against the failure-classification
//! contract: self-check output, 400-with-no-log for request-parameter
//! violations, and 500-with-one-severe-log for precondition and
//! return-value violations.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use warden_api::sink::{MemorySink, Severity};
use warden_api::state::AppConfig;

/// Helper: build the test app with a memory sink for log assertions.
fn test_app() -> (axum::Router, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let state = warden_api::bootstrap::state(AppConfig { port: 8080 }, sink.clone()).unwrap();
    (warden_api::app(state), sink)
}

/// Helper: read response body as string.
async fn body_string(response: axum::http::Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn get(app: axum::Router, uri: &str) -> axum::http::Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

// -- Self-check ---------------------------------------------------------------

#[tokio::test]
async fn self_check_renders_both_outcomes() {
    let (app, sink) = test_app();
    let response = get(app, "/v1/validate/self-check").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert_eq!(
        body,
        "failed: additional_emails[0].<list element> (must be a well-formed email address), \
         categorized_emails<K>[a].<map key> (length must be between 3 and 2147483647), \
         categorized_emails[a].<map value>[0].<list element> (must be a well-formed email address), \
         email (must be a well-formed email address), \
         score (must be greater than or equal to 0)\npassed"
    );
    assert!(sink.records().is_empty());
}

// -- Request-parameter violations (user errors) -------------------------------

#[tokio::test]
async fn valid_score_is_echoed() {
    let (app, sink) = test_app();
    let response = get(app, "/v1/scores/123").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "123");
    assert!(sink.records().is_empty());
}

#[tokio::test]
async fn non_numeric_score_is_a_terse_400_with_no_log() {
    let (app, sink) = test_app();
    let response = get(app, "/v1/scores/plop").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_string(response).await,
        "numeric value out of bounds (<3 digits>.<0 digits> expected)"
    );
    // A client fault never reaches the server log.
    assert!(sink.records().is_empty());
}

#[tokio::test]
async fn oversized_score_is_a_400() {
    let (app, _sink) = test_app();
    let response = get(app, "/v1/scores/1234").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_string(response).await,
        "numeric value out of bounds (<3 digits>.<0 digits> expected)"
    );
}

// -- Return-value violations (internal errors) --------------------------------

#[tokio::test]
async fn normalized_score_within_bounds_succeeds() {
    let (app, sink) = test_app();
    let response = get(app, "/v1/scores/9/normalized").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "900");
    assert!(sink.records().is_empty());
}

#[tokio::test]
async fn return_contract_violation_is_a_500_with_one_severe_log() {
    let (app, sink) = test_app();
    let response = get(app, "/v1/scores/42/normalized").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_string(response).await;
    assert!(body.contains("ConstraintViolationError"));
    assert!(body.contains(
        "message: numeric value out of bounds (<3 digits>.<0 digits> expected)"
    ));
    assert!(body.contains("property path: normalized_score.<return value>"));
    assert!(body.contains("\tat warden_api::service::GreetingService::normalized_score"));
    assert!(body.contains("\tat warden_api::routes::scores::normalized_score"));

    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].severity, Severity::Severe);
    assert!(records[0]
        .message
        .starts_with("HTTP Request to /v1/scores/42/normalized failed, error id: "));
}

#[tokio::test]
async fn bad_parameter_on_normalized_route_stays_a_user_error() {
    let (app, sink) = test_app();
    let response = get(app, "/v1/scores/oops/normalized").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(sink.records().is_empty());
}

// -- Method-precondition violations (internal errors) -------------------------

#[tokio::test]
async fn greeting_succeeds_with_a_name() {
    let (app, sink) = test_app();
    let response = get(app, "/v1/greetings/world").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "hello world");
    assert!(sink.records().is_empty());
}

#[tokio::test]
async fn precondition_violation_is_a_500_with_diagnostics() {
    let (app, sink) = test_app();
    let response = get(app, "/v1/greetings-broken").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_string(response).await;
    assert!(body.contains("ConstraintViolationError"));
    assert!(body.contains("message: must not be null"));
    assert!(body.contains("property path: greeting.name"));
    // Both the raising service method and the calling handler appear in
    // the frame dump.
    assert!(body.contains("\tat warden_api::service::GreetingService::greeting"));
    assert!(body.contains("\tat warden_api::routes::greetings::greet_broken"));

    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].severity, Severity::Severe);
    assert!(records[0]
        .message
        .starts_with("HTTP Request to /v1/greetings-broken failed, error id: "));
}

#[tokio::test]
async fn error_ids_differ_across_requests() {
    let (app, sink) = test_app();
    let _ = get(app.clone(), "/v1/greetings-broken").await;
    let _ = get(app, "/v1/greetings-broken").await;
    let records = sink.records();
    assert_eq!(records.len(), 2);
    assert_ne!(records[0].message, records[1].message);
}

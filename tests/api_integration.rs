//! Integration tests for the HTTP API
//!
//! Requests go straight into the router via `oneshot`; clones of the router
//! share one `AppState`, so session flows can span requests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use guardian360::core::{create_router, AdvisoryMatcher, AppState, QuoteFetcher, Resolver};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

fn create_test_router() -> Router {
    let timeout = Duration::from_millis(500);
    let client = reqwest::Client::builder()
        .no_proxy()
        .timeout(timeout)
        .build()
        .unwrap();
    let quotes = QuoteFetcher::with_client(client, "http://127.0.0.1:9/", timeout);
    let state = AppState::new(Resolver::default(), AdvisoryMatcher::default(), quotes);
    create_router(Arc::new(state))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    };
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_router();
    let (status, json) = send(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["sessions_active"], 0);
}

#[tokio::test]
async fn test_resolve_trigger() {
    let app = create_test_router();
    let (status, json) = send(
        &app,
        post_json("/resolve", r#"{"text": "Get off your PHONE", "audience": "teen"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["audience"], "teen");
    assert_eq!(json["reason"], "R102_TRIGGER_MATCHED");
    assert_eq!(json["result"]["kind"], "tiers");
    assert_eq!(json["result"]["trigger"], "phone");
}

#[tokio::test]
async fn test_resolve_safety_override() {
    let app = create_test_router();
    let (status, json) = send(
        &app,
        post_json("/resolve", r#"{"text": "He tried to HIT his brother", "audience": "child"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["result"]["kind"], "safety_override");
    assert_eq!(json["reason"], "R101_SAFETY_OVERRIDE");
}

#[tokio::test]
async fn test_resolve_rejects_empty_text() {
    let app = create_test_router();
    let (status, json) = send(
        &app,
        post_json("/resolve", r#"{"text": "   ", "audience": "child"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("empty"));
}

#[tokio::test]
async fn test_resolve_rejects_unknown_audience() {
    let app = create_test_router();
    let (status, json) = send(
        &app,
        post_json("/resolve", r#"{"text": "running", "audience": "toddler"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("Invalid argument"));
}

#[tokio::test]
async fn test_advise_endpoint() {
    let app = create_test_router();
    let (status, json) = send(
        &app,
        post_json("/advise", r#"{"text": "My partner keeps undermining me"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["reason"], "R151_TOPIC_MATCHED");
    assert!(json["result"]["advice"]["resource"].is_string());
    assert!(json["result"]["advice"]["search_query"].is_string());
}

#[tokio::test]
async fn test_quote_endpoint_never_fails() {
    let app = create_test_router();
    let (status, json) = send(&app, get("/quote")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["source"], "fallback");
    assert!(!json["quote"]["text"].as_str().unwrap().is_empty());
    assert!(!json["quote"]["attribution"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_principles_endpoint() {
    let app = create_test_router();
    let (status, json) = send(&app, get("/principles")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_session_not_found() {
    let app = create_test_router();
    let (status, _) = send(&app, get("/session/nonexistent")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, get("/session/nonexistent/scripts")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        post_json("/session/nonexistent/resolve", r#"{"text": "running", "audience": "child"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_session_without_body_uses_defaults() {
    let app = create_test_router();
    let request = Request::builder()
        .method("POST")
        .uri("/session/new")
        .body(Body::empty())
        .unwrap();
    let (status, json) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["caption"], "Logged in as: Parent | Unified Front with: Partner");
}

#[tokio::test]
async fn test_full_session_flow() {
    let app = create_test_router();

    // Create session
    let (status, json) = send(
        &app,
        post_json("/session/new", r#"{"parent_role": "Dad", "partner_name": "Morgan"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let session_id = json["session_id"].as_str().unwrap().to_string();
    assert_eq!(json["caption"], "Logged in as: Dad | Unified Front with: Morgan");

    // Resolve twice and advise once
    let uri = format!("/session/{}/resolve", session_id);
    let (status, _) = send(&app, post_json(&uri, r#"{"text": "stop running", "audience": "child"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, post_json(&uri, r#"{"text": "I will kill you", "audience": "teen"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    let uri = format!("/session/{}/advise", session_id);
    let (status, _) = send(&app, post_json(&uri, r#"{"text": "we disagree on chores"}"#)).await;
    assert_eq!(status, StatusCode::OK);

    // Snapshot carries history
    let (status, json) = send(&app, get(&format!("/session/{}", session_id))).await;
    assert_eq!(status, StatusCode::OK);
    let history = json["state"]["history"].as_array().unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history[0]["input"], "stop running");
    assert_eq!(history[1]["reason"], "R101_SAFETY_OVERRIDE");
    assert_eq!(history[2]["kind"], "advise");
    assert_eq!(json["safety_overrides"], 1);

    // Grace level drives the alert in the scripts
    let uri = format!("/session/{}/grace", session_id);
    let (status, json) = send(&app, post_json(&uri, r#"{"level": "meltdown"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["grace_alert"].as_str().unwrap().contains("GRACE ALERT"));

    let (status, json) = send(&app, get(&format!("/session/{}/scripts", session_id))).await;
    assert_eq!(status, StatusCode::OK);
    let unified = json["unified_front"].as_array().unwrap();
    assert_eq!(unified.len(), 2);
    assert!(unified[0]["script"].as_str().unwrap().contains("Morgan"));

    let (_, json) = send(&app, get("/health")).await;
    assert_eq!(json["sessions_active"], 1);
}

#[tokio::test]
async fn test_invalid_grace_level() {
    let app = create_test_router();
    let (_, json) = send(&app, post_json("/session/new", "{}")).await;
    let session_id = json["session_id"].as_str().unwrap().to_string();

    let uri = format!("/session/{}/grace", session_id);
    let (status, _) = send(&app, post_json(&uri, r#"{"level": "furious"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_session() {
    let app = create_test_router();
    let (_, json) = send(&app, post_json("/session/new", "{}")).await;
    let session_id = json["session_id"].as_str().unwrap().to_string();
    let uri = format!("/session/{}", session_id);

    let delete = || Request::builder().method("DELETE").uri(uri.as_str()).body(Body::empty()).unwrap();
    let (status, _) = send(&app, delete()).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, json) = send(&app, get("/health")).await;
    assert_eq!(json["sessions_active"], 0);

    let (status, _) = send(&app, delete()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

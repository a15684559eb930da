//! HTTP API tests for the AyurHerb backend
//!
//! Exercises the axum router end to end with `tower::ServiceExt::oneshot`.

use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use ayurherb_backend::services::upload::MAX_UPLOAD_BYTES;
use ayurherb_backend::{create_app, AppState, Config};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use futures::StreamExt;
use serde_json::{json, Value};
use shared::{NewCollection, StoreAdapter};
use tower::ServiceExt;

fn state() -> AppState {
    AppState::new(StoreAdapter::in_memory(), Config::for_tests())
}

fn app() -> Router {
    create_app(state())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(&app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"], "memory");
    assert_eq!(body["eventSubscribers"], 0);
}

#[tokio::test]
async fn test_login_round_trip() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        Some(json!({ "username": "farmer.ravi", "password": "x", "role": "farmer" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["role"], "farmer");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        Some(json!({ "username": "farmer.ravi", "password": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_session_reads_login_token() {
    let app = app();
    let (_, body) = send(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        Some(json!({ "username": "dr.mehta", "password": "x", "role": "lab" })),
    )
    .await;
    let token = body["token"].as_str().unwrap().to_string();

    let request = Request::builder()
        .uri("/api/v1/auth/session")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["username"], "dr.mehta");
    assert_eq!(body["role"], "lab");

    let (status, body) = send(&app, Method::GET, "/api/v1/auth/session", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "TOKEN_ERROR");
}

#[tokio::test]
async fn test_collection_lifecycle() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/collections",
        Some(json!({ "herb": "Neem", "quantity": "10kg", "farmer": "X", "status": "Queued" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["collection"]["id"].as_str().unwrap().to_string();
    let batch_id = body["collection"]["batchId"].as_str().unwrap().to_string();

    let (_, batches) = send(&app, Method::GET, "/api/v1/batches", None).await;
    assert!(batches["data"]
        .as_array()
        .unwrap()
        .iter()
        .all(|b| b["batchId"] != batch_id.as_str()));

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/collections/{}/status", id),
        Some(json!({ "status": "Synced" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["collection"]["status"], "Synced");

    let (status, body) = send(&app, Method::GET, &format!("/api/v1/batches/{}", batch_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["view"], "active");

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/v1/batches/{}/processing", batch_id),
        Some(json!({ "stepType": "Drying", "duration": "2h" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["blockchain"]["simulated"], true);

    let (_, body) = send(&app, Method::GET, "/api/v1/batches/processed", None).await;
    let processed = body["data"].as_array().unwrap();
    assert_eq!(processed.len(), 1);
    assert_eq!(processed[0]["batchId"], batch_id.as_str());
    assert_eq!(processed[0]["progress"], 100);
}

#[tokio::test]
async fn test_unknown_collection_returns_not_found() {
    let (status, body) = send(
        &app(),
        Method::PUT,
        "/api/v1/collections/COL999/status",
        Some(json!({ "status": "Verified" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_backward_transition_is_unprocessable() {
    let (status, body) = send(
        &app(),
        Method::PUT,
        "/api/v1/collections/COL001/status",
        Some(json!({ "status": "Queued" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "INVALID_STATE_TRANSITION");
}

#[tokio::test]
async fn test_lab_result_and_reports() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/batches/BATCH-ASH-2024-001/lab-results",
        Some(json!({ "testType": "Heavy metals", "result": "Pass", "purityPercent": "99.1" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["result"]["result"], "Pass");

    let (_, body) = send(&app, Method::GET, "/api/v1/reports/compliance", None).await;
    assert_eq!(body["data"]["batchesWithPassingLabResults"], 1);

    let (_, body) = send(&app, Method::GET, "/api/v1/dashboard/stats", None).await;
    assert_eq!(body["data"]["labResults"], 1);
    assert_eq!(body["data"]["totalCollections"], 4);

    let (status, body) = send(&app, Method::GET, "/api/v1/reports/harvest", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 4);

    let (status, _) = send(&app, Method::GET, "/api/v1/reports/environmental", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_clear_all_then_reseed() {
    let app = app();
    send(
        &app,
        Method::POST,
        "/api/v1/collections",
        Some(json!({ "herb": "Neem", "quantity": "10kg", "farmer": "X" })),
    )
    .await;

    let (status, body) = send(&app, Method::DELETE, "/api/v1/collections", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, body) = send(&app, Method::GET, "/api/v1/collections", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_upload() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/uploads",
        Some(json!({ "fileName": "coa.pdf", "content": STANDARD.encode(b"certificate") })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["sizeBytes"], 11);
    assert_eq!(body["data"]["contentHash"].as_str().unwrap().len(), 64);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/uploads",
        Some(json!({ "fileName": "coa.pdf", "content": "***" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "content");
}

#[tokio::test]
async fn test_upload_accepts_multi_megabyte_files() {
    let app = app();
    let file = vec![7u8; 3 * 1024 * 1024];
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/uploads",
        Some(json!({ "fileName": "report.pdf", "content": STANDARD.encode(&file) })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["sizeBytes"], 3 * 1024 * 1024);
}

#[tokio::test]
async fn test_oversized_upload_gets_error_envelope() {
    let app = app();
    let file = vec![0u8; MAX_UPLOAD_BYTES + 1];
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/uploads",
        Some(json!({ "fileName": "scan.tiff", "content": STANDARD.encode(&file) })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["field"], "content");
}

#[tokio::test]
async fn test_event_stream_delivers_writes() {
    let state = state();
    let app = create_app(state.clone());

    let response = app
        .oneshot(Request::builder().uri("/api/v1/events").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE].to_str().unwrap(),
        "text/event-stream"
    );

    let (_, health) = send(&create_app(state.clone()), Method::GET, "/health", None).await;
    assert_eq!(health["eventSubscribers"], 1);

    state
        .api
        .collections
        .add_collection(NewCollection::new("Neem", "10kg", "X"))
        .await
        .unwrap();

    let mut frames = response.into_body().into_data_stream();
    let frame = tokio::time::timeout(Duration::from_secs(5), frames.next())
        .await
        .expect("no event within timeout")
        .expect("stream ended")
        .unwrap();
    let text = String::from_utf8(frame.to_vec()).unwrap();
    assert!(text.contains("event: storage"), "{}", text);
    assert!(text.contains("ayurherb_collections"), "{}", text);
}

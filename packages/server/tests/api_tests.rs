//! HTTP routes exercised end to end over the in-memory store.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::common::*;
use server_core::common::{MemberId, ThreadId};
use server_core::server::build_app;
use server_core::server::middleware::USER_ID_HEADER;

fn app() -> Router {
    build_app(memory_harness().deps)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    user: Option<MemberId>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header(USER_ID_HEADER, user.to_string());
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
    };
    (status, value)
}

#[tokio::test]
async fn health_reports_memory_store() {
    let app = app();
    let (status, body) = send(&app, "GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["store"], "memory");
}

#[tokio::test]
async fn writes_require_a_caller() {
    let app = app();
    let (status, _) = send(
        &app,
        "POST",
        "/api/references",
        None,
        Some(json!({"source_url": "https://claude.ai/share/x"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn reference_lifecycle() {
    let app = app();
    let user = MemberId::new();

    let (status, created) = send(
        &app,
        "POST",
        "/api/references",
        Some(user),
        Some(json!({"source_url": "https://claude.ai/share/x", "title": "Generics"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "pending");
    let id = created["id"].as_str().unwrap().to_string();

    let (_, listed) = send(&app, "GET", "/api/references", Some(user), None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (_, others) = send(&app, "GET", "/api/references", Some(MemberId::new()), None).await;
    assert!(others.as_array().unwrap().is_empty());

    let cancel_uri = format!("/api/references/{id}/cancel");
    let (status, cancelled) = send(&app, "POST", &cancel_uri, Some(user), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["status"], "cancelled");

    let (status, _) = send(&app, "POST", &cancel_uri, Some(user), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let delete_uri = format!("/api/references/{id}");
    let (status, _) = send(&app, "DELETE", &delete_uri, Some(user), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "DELETE", &delete_uri, Some(user), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn submitting_a_thread_completes_the_saved_reference() {
    let app = app();
    let user = MemberId::new();

    let (_, reference) = send(
        &app,
        "POST",
        "/api/references",
        Some(user),
        Some(json!({"source_url": "https://chatgpt.com/share/abc", "title": "Python debugging help"})),
    )
    .await;

    let (status, thread) = send(
        &app,
        "POST",
        "/api/threads",
        Some(user),
        Some(json!({
            "title": "Python debugging help",
            "content": CAPTURED_CONTENT,
            "source": "ChatGPT",
            "tags": ["python"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(thread["author_id"], user.to_string());

    let app_ref = &app;
    let done = eventually(|| async move {
        let (_, listed) = send(app_ref, "GET", "/api/references", Some(user), None).await;
        listed.as_array().is_some_and(|refs| refs.is_empty())
    })
    .await;
    assert!(done, "reference {} should have left the pending list", reference["id"]);
}

#[tokio::test]
async fn thread_vote_round_trip() {
    let app = app();
    let user = MemberId::new();
    let target = ThreadId::new();

    let (status, body) = send(
        &app,
        "POST",
        "/api/votes/threads",
        Some(user),
        Some(json!({"targetId": target, "kind": "up"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["countsByKind"], json!({"up": 1, "down": 0}));
    assert_eq!(body["callerState"], "up");

    let (_, body) = send(
        &app,
        "POST",
        "/api/votes/threads",
        Some(user),
        Some(json!({"targetId": target, "kind": "down"})),
    )
    .await;
    assert_eq!(body["countsByKind"], json!({"up": 0, "down": 1}));

    let (_, summary) = send(&app, "GET", &format!("/api/votes/threads/{target}"), None, None).await;
    assert_eq!(summary["countsByKind"]["down"], 1);
    assert!(summary["callerState"].is_null());
}

#[tokio::test]
async fn segment_reactions_reject_thread_kinds() {
    let app = app();
    let (status, _) = send(
        &app,
        "POST",
        "/api/votes/segments",
        Some(MemberId::new()),
        Some(json!({"targetId": ThreadId::new(), "kind": "up"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#![allow(dead_code)]

use axum::Router;
use axum::body::{self, Body};
use axum::http::{Method, Request, StatusCode, header};
use serde_json::Value;
use std::sync::Arc;
use todo_rest::persistence::memory_todo_driven_ports::InMemoryTodoStore;
use todo_rest::{SharedData, build_app};
use tower::ServiceExt;

/// The full application, storing to-do items in memory
pub fn in_memory_app() -> Router {
    build_app(Arc::new(SharedData::in_memory(InMemoryTodoStore::new())))
}

/// Sends one request through `app` and returns the status with the body parsed as JSON
/// (or [Value::Null] for an empty body)
pub async fn send(app: &Router, method: Method, uri: &str, json_body: Option<&str>) -> (StatusCode, Value) {
    let content_type = json_body.map(|_| "application/json");
    send_with_content_type(app, method, uri, json_body, content_type).await
}

/// Like [send], but the caller picks the content type header (or leaves it off)
pub async fn send_with_content_type(
    app: &Router,
    method: Method,
    uri: &str,
    raw_body: Option<&str>,
    content_type: Option<&str>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        request = request.header(header::CONTENT_TYPE, content_type);
    }
    let body = raw_body.map_or_else(Body::empty, |raw| Body::from(raw.to_owned()));
    let request = request.body(body).expect("request should be well formed");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router should always produce a response");
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Could not read data from response body!");

    if bytes.is_empty() {
        return (status, Value::Null);
    }
    let parsed = serde_json::from_slice(&bytes).unwrap_or_else(|err| {
        panic!("Response body was not JSON! Error: {err}, Received body: {bytes:?}")
    });
    (status, parsed)
}

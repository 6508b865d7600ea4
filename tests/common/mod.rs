#![allow(dead_code)]

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use movie_catalog::{app, AppState, MemoryStore};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Full router over a fresh in-memory store, with the production middleware stack.
pub fn build_test_app() -> Router {
    app(AppState::new(MemoryStore::new()), 64 * 1024)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Send `body` as JSON.
pub async fn json_request(app: &Router, method: Method, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// Send `body` as `application/x-www-form-urlencoded`.
pub async fn form_request(app: &Router, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// Send without a body; parameters go in the query string of `uri`.
pub async fn query_request(app: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn create_actor(app: &Router, name: &str, gender: &str, date_of_birth: &str) -> Value {
    let (status, body) = json_request(
        app,
        Method::POST,
        "/api/actor",
        json!({ "name": name, "gender": gender, "date_of_birth": date_of_birth }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create actor failed: {body}");
    body
}

pub async fn create_movie(app: &Router, name: &str, year: i32, genre: &str) -> Value {
    let (status, body) = json_request(
        app,
        Method::POST,
        "/api/movie",
        json!({ "name": name, "year": year, "genre": genre }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create movie failed: {body}");
    body
}

pub fn error_of(body: &Value) -> &str {
    body["error"].as_str().unwrap_or_default()
}

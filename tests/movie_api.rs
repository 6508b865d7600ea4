//! HTTP-level tests for the movie endpoints.

mod common;

use axum::http::{Method, StatusCode};
use common::{build_test_app, create_movie, error_of, form_request, json_request, query_request};
use serde_json::json;

#[tokio::test]
async fn create_returns_projection_with_integer_year() {
    let app = build_test_app();
    let movie = create_movie(&app, "M", 2020, "Drama").await;
    assert_eq!(movie, json!({ "id": 1, "name": "M", "year": 2020, "genre": "Drama" }));
}

#[tokio::test]
async fn year_may_arrive_as_string() {
    let app = build_test_app();
    let (status, body) = json_request(
        &app,
        Method::POST,
        "/api/movie",
        json!({ "name": "M", "year": "1999", "genre": "Sci-Fi" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["year"], 1999);
}

#[tokio::test]
async fn create_missing_year_is_rejected() {
    let app = build_test_app();
    let (status, body) = json_request(&app, Method::POST, "/api/movie", json!({ "name": "M", "genre": "Drama" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Inputted fields should exist" }));
}

#[tokio::test]
async fn create_rejects_non_integer_year() {
    let app = build_test_app();
    let (status, body) = json_request(
        &app,
        Method::POST,
        "/api/movie",
        json!({ "name": "M", "year": "twenty", "genre": "Drama" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_of(&body), "Year should be an integer");
}

#[tokio::test]
async fn get_list_and_round_trip() {
    let app = build_test_app();
    let first = create_movie(&app, "M", 2020, "Drama").await;
    create_movie(&app, "N", 2021, "Comedy").await;

    let (status, fetched) = query_request(&app, Method::GET, "/api/movie?id=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, first);

    let (_, list) = query_request(&app, Method::GET, "/api/movies").await;
    assert_eq!(list.as_array().unwrap().len(), 2);
    assert_eq!(list[1]["name"], "N");

    let (status, body) = query_request(&app, Method::GET, "/api/movie?id=x").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_of(&body), "Id must be integer");
}

#[tokio::test]
async fn update_changes_only_given_fields() {
    let app = build_test_app();
    create_movie(&app, "M", 2020, "Drama").await;
    let (status, body) = json_request(&app, Method::PUT, "/api/movie", json!({ "id": "1", "year": 2022 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": 1, "name": "M", "year": 2022, "genre": "Drama" }));

    let (status, body) = json_request(&app, Method::PUT, "/api/movie", json!({ "id": 1, "year": "later" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_of(&body), "Year should be an integer");

    let (status, body) = json_request(&app, Method::PUT, "/api/movie", json!({ "id": 1, "cast": "[]" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_of(&body), "Inputted fields should exist");
}

#[tokio::test]
async fn delete_and_missing_ids() {
    let app = build_test_app();
    create_movie(&app, "M", 2020, "Drama").await;

    let (status, body) = json_request(&app, Method::DELETE, "/api/movie", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_of(&body), "No id specified");

    let (status, body) = json_request(&app, Method::DELETE, "/api/movie", json!({ "id": 1 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Record successfully deleted");

    let (_, list) = query_request(&app, Method::GET, "/api/movies").await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn malformed_json_body_is_a_client_error() {
    let app = build_test_app();
    let (status, body) = json_request(&app, Method::POST, "/api/movie", json!("just a string")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_of(&body), "Request body must be a JSON object");
}

#[tokio::test]
async fn oversized_bodies_get_a_json_413() {
    let app = build_test_app();
    let name = "x".repeat(70 * 1024);

    let (status, body) = json_request(
        &app,
        Method::POST,
        "/api/movie",
        json!({ "name": name, "year": 2020, "genre": "Drama" }),
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body, json!({ "error": "Request body is too large" }));

    let form = format!("name={name}&year=2020&genre=Drama");
    let (status, body) = form_request(&app, Method::POST, "/api/movie", &form).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(error_of(&body), "Request body is too large");

    let (_, list) = query_request(&app, Method::GET, "/api/movies").await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn nul_in_text_fields_is_rejected() {
    let app = build_test_app();
    let (status, body) = json_request(
        &app,
        Method::POST,
        "/api/movie",
        json!({ "name": "a\u{0}b", "year": 2020, "genre": "Drama" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_of(&body), "Text fields must not contain NUL characters");

    create_movie(&app, "M", 2020, "Drama").await;
    let (status, _) = json_request(&app, Method::PUT, "/api/movie", json!({ "id": 1, "genre": "\u{0}" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

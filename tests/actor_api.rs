//! HTTP-level tests for the actor endpoints, driven through the router with `tower::ServiceExt`.

mod common;

use axum::http::{Method, StatusCode};
use common::{build_test_app, create_actor, error_of, form_request, json_request, query_request};
use serde_json::json;

#[tokio::test]
async fn create_returns_registry_fields_and_fresh_id() {
    let app = build_test_app();
    let first = create_actor(&app, "A", "F", "01.01.1990").await;
    assert_eq!(
        first,
        json!({ "id": 1, "name": "A", "gender": "F", "date_of_birth": "01.01.1990" })
    );
    let second = create_actor(&app, "B", "M", "31.12.1975").await;
    assert_eq!(second["id"], 2);
}

#[tokio::test]
async fn create_then_fetch_round_trips() {
    let app = build_test_app();
    let created = create_actor(&app, "A", "F", "01.01.1990").await;
    let (status, fetched) = query_request(&app, Method::GET, "/api/actor?id=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn create_accepts_form_bodies() {
    let app = build_test_app();
    let (status, body) = form_request(
        &app,
        Method::POST,
        "/api/actor",
        "name=Ann+Lee&gender=F&date_of_birth=05.06.1988",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Ann Lee");
}

#[tokio::test]
async fn create_rejects_missing_and_unknown_fields() {
    let app = build_test_app();
    let (status, body) = json_request(&app, Method::POST, "/api/actor", json!({ "name": "A", "gender": "F" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_of(&body), "Inputted fields should exist");

    let (status, body) = json_request(
        &app,
        Method::POST,
        "/api/actor",
        json!({ "name": "A", "gender": "F", "date_of_birth": "01.01.1990", "height": 180 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_of(&body), "Inputted fields should exist");
}

#[tokio::test]
async fn create_rejects_bad_date() {
    let app = build_test_app();
    let (status, body) = json_request(
        &app,
        Method::POST,
        "/api/actor",
        json!({ "name": "A", "gender": "F", "date_of_birth": "1990-01-01" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_of(&body), "Date of birth should be in format DD.MM.YYYY");

    let (_, list) = query_request(&app, Method::GET, "/api/actors").await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn get_by_id_errors() {
    let app = build_test_app();
    let (status, body) = query_request(&app, Method::GET, "/api/actor").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_of(&body), "No id specified");

    let (status, body) = json_request(&app, Method::GET, "/api/actor", json!({ "id": "abc" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Id must be integer" }));

    let (status, body) = query_request(&app, Method::GET, "/api/actor?id=99").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_of(&body), "Record with such id does not exist");
}

#[tokio::test]
async fn list_returns_all_in_id_order() {
    let app = build_test_app();
    create_actor(&app, "A", "F", "01.01.1990").await;
    create_actor(&app, "B", "M", "02.02.1992").await;
    let (status, body) = query_request(&app, Method::GET, "/api/actors").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["A", "B"]);
}

#[tokio::test]
async fn partial_update_leaves_other_fields() {
    let app = build_test_app();
    create_actor(&app, "A", "F", "01.01.1990").await;
    let (status, body) = json_request(&app, Method::PUT, "/api/actor", json!({ "id": 1, "name": "Renamed" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "id": 1, "name": "Renamed", "gender": "F", "date_of_birth": "01.01.1990" })
    );

    let (_, fetched) = query_request(&app, Method::GET, "/api/actor?id=1").await;
    assert_eq!(fetched, body);
}

#[tokio::test]
async fn update_errors() {
    let app = build_test_app();
    create_actor(&app, "A", "F", "01.01.1990").await;

    let (status, body) = json_request(&app, Method::PUT, "/api/actor", json!({ "name": "X" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_of(&body), "No id specified");

    let (_, body) = json_request(&app, Method::PUT, "/api/actor", json!({ "id": 1, "rating": 5 })).await;
    assert_eq!(error_of(&body), "Inputted fields should exist");

    let (_, body) = json_request(&app, Method::PUT, "/api/actor", json!({ "id": 1, "date_of_birth": "1/1/90" })).await;
    assert_eq!(error_of(&body), "Date of birth should be in format DD.MM.YYYY");

    let (status, body) = json_request(&app, Method::PUT, "/api/actor", json!({ "id": 5, "name": "X" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_of(&body), "Record with such id does not exist");
}

#[tokio::test]
async fn delete_removes_the_record() {
    let app = build_test_app();
    create_actor(&app, "A", "F", "01.01.1990").await;

    let (status, body) = query_request(&app, Method::DELETE, "/api/actor?id=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Record successfully deleted" }));

    let (status, body) = query_request(&app, Method::GET, "/api/actor?id=1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_of(&body), "Record with such id does not exist");

    let (status, body) = query_request(&app, Method::DELETE, "/api/actor?id=1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_of(&body), "Record with such id does not exist");
}

#[tokio::test]
async fn json_body_wins_over_query_string() {
    let app = build_test_app();
    create_actor(&app, "A", "F", "01.01.1990").await;
    let (status, body) = json_request(
        &app,
        Method::PUT,
        "/api/actor?id=1&name=FromQuery",
        json!({ "name": "FromBody" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "FromBody");
}

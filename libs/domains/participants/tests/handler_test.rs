//! Handler tests for the participants domain

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use database::cache::CacheClient;
use domain_participants::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::time::Duration;
use tower::ServiceExt;

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app() -> Router {
    router(ParticipantService::new(
        InMemoryParticipantRepository::new(),
        CacheClient::in_memory(Duration::from_secs(60)),
    ))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_create_participant_returns_201() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "name": "Ada", "email": "ada@example.com" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["email"], "ada@example.com");
    assert!(body["_id"].is_string());
}

#[tokio::test]
async fn test_duplicate_email_returns_409() {
    let app = app();
    let payload = json!({ "name": "Ada", "email": "ada@example.com" });

    let first = app
        .clone()
        .oneshot(json_request("POST", "/", payload.clone()))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .oneshot(json_request("POST", "/", payload))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let body = json_body(second.into_body()).await;
    assert_eq!(body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_invalid_email_returns_400() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "name": "Ada", "email": "not-an-email" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"]["email"].is_array());
}

#[tokio::test]
async fn test_update_and_delete_participant() {
    let app = app();

    let created = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "name": "Ada", "email": "ada@example.com" }),
        ))
        .await
        .unwrap();
    let id = json_body(created.into_body()).await["_id"]
        .as_str()
        .unwrap()
        .to_string();

    let updated = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/{}", id),
            json!({ "name": "Ada Lovelace" }),
        ))
        .await
        .unwrap();
    assert_eq!(updated.status(), StatusCode::OK);
    let body = json_body(updated.into_body()).await;
    assert_eq!(body["name"], "Ada Lovelace");
    assert_eq!(body["email"], "ada@example.com");

    let deleted = app
        .clone()
        .oneshot(empty_request("DELETE", &format!("/{}", id)))
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let missing = app
        .oneshot(empty_request("GET", &format!("/{}", id)))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_participants() {
    let app = app();
    for (name, email) in [("Zed", "zed@example.com"), ("Ada", "ada@example.com")] {
        app.clone()
            .oneshot(json_request(
                "POST",
                "/",
                json!({ "name": name, "email": email }),
            ))
            .await
            .unwrap();
    }

    let response = app.oneshot(empty_request("GET", "/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Ada", "Zed"]);
}

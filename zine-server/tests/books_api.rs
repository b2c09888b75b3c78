//! Integration tests for the book CRUD API.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use common::{empty_request, json_request, response_json, test_app};

fn book_payload(id: &str, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "data": {
            "version": 1,
            "zineConfig": { "width": 210, "height": 297, "unit": "mm" },
            "mediaAssets": [],
            "pages": []
        },
        "metadata": {}
    })
}

#[tokio::test]
async fn test_book_crud_flow() {
    let (app, _dir) = test_app();

    // Create
    let response = app
        .clone()
        .oneshot(json_request("POST", "/books", book_payload("book-1", "My Zine")))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = response_json(response).await;
    assert_eq!(created["id"], "book-1");
    assert_eq!(created["title"], "My Zine");
    assert!(created["createdAt"].is_string());

    // List
    let response = app
        .clone()
        .oneshot(empty_request("GET", "/books"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let listed = response_json(response).await;
    assert_eq!(listed.as_array().expect("array").len(), 1);
    assert_eq!(listed[0]["id"], "book-1");

    // Get
    let response = app
        .clone()
        .oneshot(empty_request("GET", "/books/book-1"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let book = response_json(response).await;
    assert_eq!(book["data"]["zineConfig"]["width"], 210);

    // Delete
    let response = app
        .clone()
        .oneshot(empty_request("DELETE", "/books/book-1"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/books/book-1"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_upsert_preserves_created_at() {
    let (app, _dir) = test_app();

    let response = app
        .clone()
        .oneshot(json_request("POST", "/books", book_payload("book-1", "v1")))
        .await
        .expect("response");
    let first = response_json(response).await;

    let response = app
        .clone()
        .oneshot(json_request("POST", "/books", book_payload("book-1", "v2")))
        .await
        .expect("response");
    let second = response_json(response).await;

    assert_eq!(second["createdAt"], first["createdAt"]);
    assert_eq!(second["title"], "v2");
}

#[tokio::test]
async fn test_save_requires_id_and_data() {
    let (app, _dir) = test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/books",
            json!({ "title": "No id", "data": {} }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Book id is required");

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/books",
            json!({ "id": "book-2", "title": "No data" }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Book data is required");
}

#[tokio::test]
async fn test_missing_book_is_404() {
    let (app, _dir) = test_app();

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/books/nope"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", "/books/nope"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_endpoints() {
    let (app, _dir) = test_app();

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/health/live"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/health"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["book_store"], true);
    assert_eq!(body["checks"]["layout_catalog"], true);
}

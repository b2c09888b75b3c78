//! Integration tests for the layout catalog API.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use common::{empty_request, json_request, response_json, test_app};

fn custom_layout(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": "My Layout",
        "icon": "⭐",
        "category": "custom",
        "slots": [
            { "x": 0, "y": 0, "width": 100, "height": 60, "type": "image" },
            { "x": 0, "y": 60, "width": 100, "height": 40, "type": "image" }
        ]
    })
}

#[tokio::test]
async fn test_list_layouts_includes_builtins() {
    let (app, _dir) = test_app();

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/layouts"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let layouts = response_json(response).await;
    let ids: Vec<&str> = layouts
        .as_array()
        .expect("array")
        .iter()
        .map(|l| l["id"].as_str().expect("id"))
        .collect();
    assert!(ids.contains(&"full-page"));
    assert!(ids.contains(&"grid-2x2"));
}

#[tokio::test]
async fn test_list_categories() {
    let (app, _dir) = test_app();

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/layouts/categories"))
        .await
        .expect("response");
    let categories = response_json(response).await;
    assert_eq!(categories.as_array().expect("array").len(), 6);
    assert_eq!(categories[0]["name"], "Basic");
}

#[tokio::test]
async fn test_create_custom_layout_and_reload() {
    let (app, dir) = test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/layouts/custom",
            custom_layout("my-layout"),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CREATED);

    // Visible in the custom listing
    let response = app
        .clone()
        .oneshot(empty_request("GET", "/layouts/custom"))
        .await
        .expect("response");
    let customs = response_json(response).await;
    assert_eq!(customs[0]["id"], "my-layout");

    // Persisted for the next startup
    assert!(dir.path().join("customLayouts/my-layout.json").exists());
}

#[tokio::test]
async fn test_create_invalid_layout_returns_full_error_set() {
    let (app, _dir) = test_app();

    let mut layout = custom_layout("bad-layout");
    layout["slots"][0]["x"] = json!(150);
    layout["slots"][1]["width"] = json!(0);
    layout["name"] = json!("");

    let response = app
        .clone()
        .oneshot(json_request("POST", "/layouts/custom", layout))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;

    let errors = body["errors"].as_array().expect("error list");
    assert_eq!(errors.len(), 3);
    assert!(errors.contains(&json!("Layout must have a name")));
    assert!(errors.contains(&json!("Slot 0: x must be between 0 and 100")));
    assert!(errors.contains(&json!("Slot 1: width must be between 0 and 100")));
}

#[tokio::test]
async fn test_unknown_category_rejected_at_boundary() {
    let (app, _dir) = test_app();

    let mut layout = custom_layout("weird");
    layout["category"] = json!("seasonal");

    // The closed category enum refuses to parse the body at all
    let response = app
        .clone()
        .oneshot(json_request("POST", "/layouts/custom", layout))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_delete_custom_layout() {
    let (app, _dir) = test_app();

    app.clone()
        .oneshot(json_request(
            "POST",
            "/layouts/custom",
            custom_layout("my-layout"),
        ))
        .await
        .expect("create");

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", "/layouts/custom/my-layout"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/layouts/custom"))
        .await
        .expect("response");
    let customs = response_json(response).await;
    assert!(customs.as_array().expect("array").is_empty());

    // Built-ins cannot be deleted through the custom endpoint
    let response = app
        .clone()
        .oneshot(empty_request("DELETE", "/layouts/custom/full-page"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

//! Shared helpers for in-process API tests.
#![allow(dead_code)]

use std::sync::{Arc, RwLock};

use axum::body::Body;
use axum::http::{header, Request};
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use zine_core::LayoutCatalog;
use zine_server::books::BookStore;
use zine_server::storage::FilesystemStorage;
use zine_server::{build_router, AppState};

/// Build an app over a fresh temporary data directory.
///
/// The [`TempDir`] guard must stay alive for the duration of the test.
pub fn test_app() -> (Router, TempDir) {
    let dir = TempDir::new().expect("tempdir");
    let books = BookStore::new(dir.path().join("books")).expect("book store");
    let storage =
        Arc::new(FilesystemStorage::new(dir.path().join("uploads"), "/uploads").expect("storage"));
    let state = AppState {
        books,
        storage,
        catalog: Arc::new(RwLock::new(LayoutCatalog::with_builtins())),
        layouts_dir: dir.path().join("customLayouts"),
    };
    let app = build_router(state, dir.path().join("uploads"));
    (app, dir)
}

/// A JSON request with the given method, path, and body.
pub fn json_request(method: &str, path: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

/// A bodyless request with the given method and path.
pub fn empty_request(method: &str, path: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .body(Body::empty())
        .expect("request")
}

/// Collect a response body as parsed JSON.
pub async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

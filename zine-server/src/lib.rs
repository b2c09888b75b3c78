//! # Ziner Server Library
//!
//! Shared state and router assembly for the Ziner backend.
//! This library is used by both the binary and integration tests.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::services::ServeDir;
use zine_core::LayoutCatalog;

pub mod books;
pub mod error;
pub mod health;
pub mod images;
pub mod layouts;
pub mod storage;

use books::BookStore;
use storage::StorageBackend;

/// Project payloads embed no binaries, but media-heavy books still get large;
/// matches the deployment's JSON body limit.
pub const BODY_LIMIT_BYTES: usize = 150 * 1024 * 1024;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Book persistence.
    pub books: BookStore,
    /// Blob storage for uploaded images.
    pub storage: Arc<dyn StorageBackend>,
    /// Layout catalog (built-ins plus custom layouts).
    pub catalog: Arc<RwLock<LayoutCatalog>>,
    /// Directory custom layout files are persisted in.
    pub layouts_dir: PathBuf,
}

/// Assemble the API router over the given state.
///
/// `uploads_dir` is served statically at `/uploads`, where the filesystem
/// storage backend places image variants.
pub fn build_router(state: AppState, uploads_dir: impl Into<PathBuf>) -> Router {
    Router::new()
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .route("/health", get(health::readiness))
        .route("/books", get(books::list_books).post(books::save_book))
        .route(
            "/books/{id}",
            get(books::get_book).delete(books::delete_book),
        )
        .route("/images", post(images::upload_image))
        .route("/images/batch", post(images::upload_batch))
        .route("/images/{id}", delete(images::delete_image))
        .route("/layouts", get(layouts::list_layouts))
        .route("/layouts/categories", get(layouts::list_categories))
        .route(
            "/layouts/custom",
            get(layouts::list_custom).post(layouts::create_custom),
        )
        .route("/layouts/custom/{id}", delete(layouts::delete_custom))
        .nest_service("/uploads", ServeDir::new(uploads_dir.into()))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .with_state(state)
}

//! # Ziner Server
//!
//! Backend for the Ziner editor: book persistence, image uploads, and the
//! layout catalog API.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use axum::http::{header, HeaderValue, Method};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use zine_core::LayoutCatalog;

use zine_server::books::BookStore;
use zine_server::storage::FilesystemStorage;
use zine_server::{build_router, layouts, AppState};

/// Default port for the Ziner backend.
const DEFAULT_PORT: u16 = 4876;

/// Build a CORS layer from `ZINER_CORS_ORIGIN` (comma-separated) plus the
/// usual local development origins.
fn build_cors_layer() -> CorsLayer {
    let mut origins: Vec<String> = std::env::var("ZINER_CORS_ORIGIN")
        .map(|v| v.split(',').map(|o| o.trim().to_string()).collect())
        .unwrap_or_default();

    // Common dev-server ports
    for port in [5173, 4173, 3000, 3001] {
        origins.push(format!("http://localhost:{port}"));
        origins.push(format!("http://127.0.0.1:{port}"));
    }

    let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_credentials(true)
}

/// Initialize structured tracing with optional JSON format.
///
/// Set `RUST_LOG` to control log levels (default: info,zine_server=debug,tower_http=debug).
/// Set `RUST_LOG_FORMAT=json` for JSON output (recommended for production).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,zine_server=debug,tower_http=debug"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let port = std::env::var("ZINER_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let host: IpAddr = std::env::var("ZINER_HOST")
        .ok()
        .and_then(|h| h.parse().ok())
        .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));

    let data_dir = std::env::var("ZINER_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"));
    let books_dir = data_dir.join("books");
    let uploads_dir = data_dir.join("uploads");
    let layouts_dir = data_dir.join("customLayouts");

    tracing::info!("Data directory: {}", data_dir.display());

    let books = BookStore::new(&books_dir)?;
    let storage = Arc::new(FilesystemStorage::new(&uploads_dir, "/uploads")?);

    let mut catalog = LayoutCatalog::with_builtins();
    match layouts::load_custom_layouts(&mut catalog, &layouts_dir) {
        Ok(count) if count > 0 => tracing::info!("Loaded {count} custom layouts"),
        Ok(_) => {}
        Err(e) => tracing::warn!("Failed to load custom layouts: {e}"),
    }
    tracing::info!("Layout catalog ready with {} templates", catalog.len());

    let state = AppState {
        books,
        storage,
        catalog: Arc::new(RwLock::new(catalog)),
        layouts_dir,
    };

    let app = build_router(state, &uploads_dir)
        // Request ID for distributed tracing correlation
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(build_cors_layer())
        // Structured request tracing with timing
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    let addr = SocketAddr::from((host, port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Ziner server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

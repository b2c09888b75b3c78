//! Health check endpoints.
//!
//! - `/health/live` - liveness probe (restart if fails)
//! - `/health/ready` - readiness probe (remove from LB if fails)
//! - `/health` - combined check for backward compatibility

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::AppState;

/// Health status response.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    /// Overall status: "healthy" or "unhealthy"
    pub status: &'static str,
    /// Server version
    pub version: &'static str,
    /// Individual component checks
    pub checks: HealthChecks,
}

/// Individual health checks.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    /// Book data directory accessible
    pub book_store: bool,
    /// Layout catalog loaded
    pub layout_catalog: bool,
}

/// Liveness probe - is the server running?
#[tracing::instrument(name = "liveness_probe")]
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// Readiness probe - is the server ready to accept traffic?
///
/// Checks that the book directory is reachable and the layout catalog holds
/// at least the built-in set.
#[tracing::instrument(name = "readiness_probe", skip(state))]
pub async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    let books_ok = tokio::fs::metadata(state.books.data_dir())
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false);

    let catalog_ok = !state
        .catalog
        .read()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .is_empty();

    let all_ok = books_ok && catalog_ok;

    let status = HealthStatus {
        status: if all_ok { "healthy" } else { "unhealthy" },
        version: env!("CARGO_PKG_VERSION"),
        checks: HealthChecks {
            book_store: books_ok,
            layout_catalog: catalog_ok,
        },
    };

    let code = if all_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (code, Json(status))
}

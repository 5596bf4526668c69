//! Liveness endpoints

use axum::{routing::get, Json, Router};
use serde::Serialize;

/// Root status message
#[derive(Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /
async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "User Management API is running",
    })
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Health routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
}

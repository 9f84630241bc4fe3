//! Health check endpoint

use axum::{routing::get, Json, Router};
use marketpulse_common::api::HealthResponse;

use crate::AppState;

/// GET /health
///
/// Monitoring endpoint; requires no caller identity.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "marketpulse-api".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Build health check routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

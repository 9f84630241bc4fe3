//! marketpulse-api library
//!
//! Hyperlocal market-analysis service: route layer, storage layer, and
//! model-backed generators behind one axum router.

use axum::Router;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::services::ModelClient;

pub mod api;
pub mod auth;
pub mod db;
pub mod error;
pub mod services;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Chat-completion client, constructed once at startup
    pub model: Arc<dyn ModelClient>,
}

impl AppState {
    pub fn new(db: SqlitePool, model: Arc<dyn ModelClient>) -> Self {
        Self { db, model }
    }
}

/// Build the application router
///
/// `/api` routes require a forwarded caller identity (enforced per-handler
/// by the `AuthUser` extractor); `/health` does not.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::reports::routes())
        .merge(api::brand::routes())
        .merge(api::health::routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

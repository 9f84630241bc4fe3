//! marketpulse-api - Hyperlocal market analysis service
//!
//! Generates and persists LLM-backed market-analysis reports and
//! brand-strategy statements behind a JSON HTTP API.

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use marketpulse_api::{build_router, db, services::OpenAiClient, AppState};
use marketpulse_common::config::ServiceConfig;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting MarketPulse API v{}", env!("CARGO_PKG_VERSION"));

    let config = ServiceConfig::load()?;

    let pool = db::init_pool(&config.database_url).await?;
    info!("Database connection established");

    if db::reports::ensure_demo_report(&pool).await? {
        info!("Seeded demonstration report");
    }

    let model = OpenAiClient::new(&config.model)
        .map_err(|e| anyhow::anyhow!("Failed to create model client: {}", e))?;
    let state = AppState::new(pool, Arc::new(model));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Listening on http://{}", config.bind_addr);
    info!("Health check: http://{}/health", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

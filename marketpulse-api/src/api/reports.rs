//! Report endpoints
//!
//! `POST /api/reports/analyze` is the generation pipeline: validate input,
//! ask the model, persist the validated result, return the stored row.
//! Reports can be listed, fetched, and renamed; there is no delete endpoint
//! for reports (they are permanent records, unlike brand entities).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    routing::post,
    Json, Router,
};
use marketpulse_common::api::{AnalyzeReportRequest, RenameReportRequest};
use marketpulse_common::{LiveInsight, Report};
use serde_json::Value;
use tracing::info;

use crate::{
    api::parse_id,
    auth::AuthUser,
    db,
    error::{ApiError, ApiResult},
    services, AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/reports/analyze", post(analyze_report))
        .route("/api/reports", get(list_reports))
        .route("/api/reports/:id", get(get_report).patch(rename_report))
        .route("/api/live-insights/:id", get(live_insight))
}

/// POST /api/reports/analyze
///
/// Generates and persists a market analysis. Never returns 201 with data
/// that failed contract validation; a malformed completion is a 500 with
/// nothing persisted.
async fn analyze_report(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<Value>,
) -> ApiResult<(StatusCode, Json<Report>)> {
    let request: AnalyzeReportRequest = serde_json::from_value(body)
        .map_err(|_| ApiError::BadRequest("Address and business type are required".to_string()))?;

    let address = request.address.trim();
    let business_type = request.business_type.trim();
    if address.is_empty() || business_type.is_empty() {
        return Err(ApiError::BadRequest(
            "Address and business type must be non-empty".to_string(),
        ));
    }

    let data = services::analysis::generate_analysis(state.model.as_ref(), address, business_type)
        .await?;
    let report = db::reports::create_report(&state.db, &user.0, address, business_type, &data).await?;

    info!(report_id = report.id, business_type = %report.business_type, "Created analysis report");
    Ok((StatusCode::CREATED, Json(report)))
}

/// GET /api/reports
async fn list_reports(State(state): State<AppState>, user: AuthUser) -> ApiResult<Json<Vec<Report>>> {
    let reports = db::reports::list_reports(&state.db, &user.0).await?;
    Ok(Json(reports))
}

/// GET /api/reports/:id
async fn get_report(
    State(state): State<AppState>,
    user: AuthUser,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Report>> {
    let id = parse_id(&raw_id)?;

    db::reports::get_report(&state.db, id, &user.0)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Report {} not found", id)))
}

/// PATCH /api/reports/:id
async fn rename_report(
    State(state): State<AppState>,
    user: AuthUser,
    Path(raw_id): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult<Json<Report>> {
    let id = parse_id(&raw_id)?;
    let request: RenameReportRequest = serde_json::from_value(body)
        .map_err(|_| ApiError::BadRequest("Name is required".to_string()))?;

    let name = request.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest("Name must be non-empty".to_string()));
    }

    let report = db::reports::rename_report(&state.db, id, &user.0, name).await?;
    Ok(Json(report))
}

/// GET /api/live-insights/:id
///
/// Ephemeral snapshot for an existing report's location; re-queries the
/// model on every call and persists nothing.
async fn live_insight(
    State(state): State<AppState>,
    user: AuthUser,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<LiveInsight>> {
    let id = parse_id(&raw_id)?;

    let report = db::reports::get_report(&state.db, id, &user.0)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Report {} not found", id)))?;

    let insight = services::analysis::generate_live_insight(
        state.model.as_ref(),
        &report.address,
        &report.business_type,
    )
    .await?;

    Ok(Json(insight))
}

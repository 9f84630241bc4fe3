//! Brand-strategy endpoints
//!
//! Five structurally parallel route families (missions, visions, values,
//! target-markets, backgrounds) built from one set of handlers, registered
//! once per kind from the `BrandKind` descriptor. Generate never persists;
//! save/list/update/delete go through the generic storage module.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{patch, post},
    Json, Router,
};
use marketpulse_common::api::GenerateBrandRequest;
use marketpulse_common::BrandKind;
use serde_json::{Map, Value};
use tracing::info;

use crate::{
    api::parse_id,
    auth::AuthUser,
    db,
    error::{ApiError, ApiResult},
    services, AppState,
};

pub fn routes() -> Router<AppState> {
    let mut router = Router::new();

    for kind in BrandKind::ALL {
        router = router
            .route(
                &format!("/api/generate-{}", kind.kind_name()),
                post(move |state: State<AppState>, user: AuthUser, body: Json<Value>| {
                    generate(kind, state, user, body)
                }),
            )
            .route(
                &format!("/api/{}", kind.plural_path()),
                post(move |state: State<AppState>, user: AuthUser, body: Json<Value>| {
                    save(kind, state, user, body)
                })
                .get(move |state: State<AppState>, user: AuthUser| list(kind, state, user)),
            )
            .route(
                &format!("/api/{}/:id", kind.plural_path()),
                patch(
                    move |state: State<AppState>,
                          user: AuthUser,
                          path: Path<String>,
                          body: Json<Value>| update(kind, state, user, path, body),
                )
                .delete(
                    move |state: State<AppState>, user: AuthUser, path: Path<String>| {
                        remove(kind, state, user, path)
                    },
                ),
            );
    }

    router
}

/// POST /api/generate-<kind>
///
/// Pure generation; the result is not persisted until the caller saves it.
async fn generate(
    kind: BrandKind,
    State(state): State<AppState>,
    _user: AuthUser,
    Json(body): Json<Value>,
) -> ApiResult<Json<Value>> {
    let request: GenerateBrandRequest = serde_json::from_value(body)
        .map_err(|_| ApiError::BadRequest("Input is required".to_string()))?;

    let input = request.input.trim();
    if input.is_empty() {
        return Err(ApiError::BadRequest("Input must be non-empty".to_string()));
    }

    let statement =
        services::brand::generate_brand_statement(state.model.as_ref(), kind, input).await?;

    let mut response = Map::new();
    response.insert(kind.field().to_string(), Value::from(statement));
    Ok(Json(Value::Object(response)))
}

/// POST /api/<plural>
async fn save(
    kind: BrandKind,
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<Value>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let text = require_string_field(&body, kind.field())?;
    let original_input = require_string_field(&body, "originalInput")?;

    let record = db::brand::create(&state.db, kind, &user.0, &text, &original_input).await?;

    info!(id = record.id, kind = kind.kind_name(), "Saved brand entity");
    Ok((StatusCode::CREATED, Json(record.to_json(kind))))
}

/// GET /api/<plural>
async fn list(
    kind: BrandKind,
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<Value>>> {
    let records = db::brand::list(&state.db, kind, &user.0).await?;
    Ok(Json(records.iter().map(|r| r.to_json(kind)).collect()))
}

/// PATCH /api/<plural>/:id
async fn update(
    kind: BrandKind,
    State(state): State<AppState>,
    user: AuthUser,
    Path(raw_id): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult<Json<Value>> {
    let id = parse_id(&raw_id)?;
    let text = require_string_field(&body, kind.field())?;

    let record = db::brand::update(&state.db, kind, id, &user.0, &text).await?;
    Ok(Json(record.to_json(kind)))
}

/// DELETE /api/<plural>/:id
///
/// Idempotent: 204 whether or not a row matched.
async fn remove(
    kind: BrandKind,
    State(state): State<AppState>,
    user: AuthUser,
    Path(raw_id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&raw_id)?;

    db::brand::delete(&state.db, kind, id, &user.0).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Extract a required non-empty string field from a JSON body
fn require_string_field(body: &Value, field: &str) -> ApiResult<String> {
    body.get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            ApiError::BadRequest(format!("Field \"{}\" must be a non-empty string", field))
        })
}

//! Shared helpers for API integration tests

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use marketpulse_api::services::{ModelClient, ModelError};
use marketpulse_api::{build_router, AppState};

/// Model client returning pre-scripted completions in order.
///
/// An exhausted script fails the call, so a test that forgets to queue a
/// response sees a 500 instead of hanging or leaking state between calls.
pub struct ScriptedModel {
    responses: Mutex<VecDeque<Result<String, ModelError>>>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
        }
    }

    /// Queue a JSON completion
    pub fn push_json(&self, value: Value) {
        self.responses.lock().unwrap().push_back(Ok(value.to_string()));
    }

    /// Queue a raw (possibly malformed) completion
    pub fn push_raw(&self, raw: &str) {
        self.responses.lock().unwrap().push_back(Ok(raw.to_string()));
    }

    /// Queue an upstream failure
    pub fn push_failure(&self) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(ModelError::Api(503, "scripted failure".to_string())));
    }
}

#[async_trait]
impl ModelClient for ScriptedModel {
    async fn complete_json(&self, _system: &str, _user: &str) -> Result<String, ModelError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ModelError::Network("no scripted response".to_string())))
    }
}

/// Fresh app over an in-memory database and a scripted model
pub async fn setup_app() -> (axum::Router, Arc<ScriptedModel>, SqlitePool) {
    // Single connection so every query sees the same in-memory database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");
    marketpulse_api::db::create_schema(&pool)
        .await
        .expect("Schema creation failed");

    let model = Arc::new(ScriptedModel::new());
    let state = AppState::new(pool.clone(), model.clone());
    (build_router(state), model, pool)
}

/// Build a request; `user` populates the forwarded-identity header
pub fn request(method: &str, uri: &str, user: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }

    match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Extract a JSON body from a response
pub async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

/// A contract-valid AnalysisData payload
pub fn sample_analysis() -> Value {
    serde_json::json!({
        "marketSize": {
            "tam": {"value": 9000000.0, "description": "Total annual spend in radius"},
            "sam": {"value": 2500000.0, "description": "Serviceable share"},
            "som": {"value": 400000.0, "description": "First-year obtainable share"}
        },
        "demographics": {
            "population": 52000.0,
            "medianIncome": 63400.0,
            "ageGroups": [
                {"range": "18-24", "percentage": 12.0},
                {"range": "25-44", "percentage": 41.0}
            ],
            "description": "Dense urban neighborhood"
        },
        "psychographics": {
            "interests": ["dining out", "fitness"],
            "lifestyle": "Young professionals",
            "buyingBehavior": "Experience-driven, price tolerant"
        },
        "weather": {
            "seasonalTrends": "Mild year-round",
            "impactOnBusiness": "Weather rarely suppresses foot traffic"
        },
        "traffic": {
            "typicalTraffic": "Heavy pedestrian flow",
            "challenges": ["no dedicated parking"],
            "peakHours": "11am-2pm, 6-9pm"
        }
    })
}

/// A contract-valid LiveInsight payload
pub fn sample_live_insight() -> Value {
    serde_json::json!({
        "weather": {"temp": "74F", "condition": "Sunny", "impact": "Favorable for foot traffic"},
        "traffic": {"status": "Moderate", "delay": "3 min", "notablePatterns": "Lunchtime surge"},
        "news": [
            {"title": "Street fair this weekend", "source": "Local Gazette",
             "summary": "Main street closed Saturday", "date": "2026-08-01", "category": "events"}
        ]
    })
}

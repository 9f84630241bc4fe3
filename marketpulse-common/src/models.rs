//! Persisted entity models
//!
//! Wire form is camelCase; these types are the shared contract the server
//! serializes and the client validates against.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted market-analysis report.
///
/// `data` is validated as `AnalysisData` when the report is created and is
/// carried as opaque JSON afterwards, so a fetch returns exactly the bytes
/// that were stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: i64,
    pub user_id: String,
    /// User-assigned display label; unset until the report is renamed
    pub name: Option<String>,
    pub address: String,
    pub business_type: String,
    pub data: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

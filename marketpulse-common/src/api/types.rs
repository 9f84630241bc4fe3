//! Shared API request/response types
//!
//! Used by both marketpulse-api (to shape endpoints) and marketpulse-client
//! (to validate responses), so the two sides cannot drift apart.

use serde::{Deserialize, Serialize};

/// POST /api/reports/analyze request body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeReportRequest {
    pub address: String,
    pub business_type: String,
}

/// PATCH /api/reports/:id request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameReportRequest {
    pub name: String,
}

/// POST /api/generate-<kind> request body (all five brand kinds)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateBrandRequest {
    pub input: String,
}

/// Uniform error envelope for every non-2xx API response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// GET /health response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_request_uses_camel_case() {
        let json = r#"{"address": "1 Main St", "businessType": "Bakery"}"#;
        let request: AnalyzeReportRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.address, "1 Main St");
        assert_eq!(request.business_type, "Bakery");
    }

    #[test]
    fn error_envelope_round_trips() {
        let error = ErrorResponse::new("Report not found");
        let json = serde_json::to_string(&error).unwrap();

        assert_eq!(json, r#"{"message":"Report not found"}"#);
    }
}

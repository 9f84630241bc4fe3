//! marketpulse-client - Typed API client
//!
//! Fetch wrappers over the report endpoints. Every response is deserialized
//! through the contract types in `marketpulse-common`, so a server whose
//! shape drifts from the contract fails loudly with [`ClientError::Contract`]
//! instead of handing the caller a malformed value. The client keeps a
//! cached report list and invalidates it when a report is created, so the
//! next list read reflects the new row.

use marketpulse_common::api::{AnalyzeReportRequest, ErrorResponse};
use marketpulse_common::Report;
use thiserror::Error;
use tokio::sync::Mutex;

/// Client errors
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),

    /// Server returned a non-2xx status; `message` is the server's envelope
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the shared contract
    #[error("Response did not match the contract: {0}")]
    Contract(String),
}

/// Typed client for the MarketPulse API
pub struct ApiClient {
    http_client: reqwest::Client,
    base_url: String,
    user_id: String,
    cached_reports: Mutex<Option<Vec<Report>>>,
}

impl ApiClient {
    /// Create a client acting as `user_id`
    pub fn new(base_url: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            user_id: user_id.into(),
            cached_reports: Mutex::new(None),
        }
    }

    /// List the caller's reports, newest first
    ///
    /// Served from the cache when one is present; refetched after
    /// [`ApiClient::create_report`] invalidates it.
    pub async fn list_reports(&self) -> Result<Vec<Report>, ClientError> {
        let mut cache = self.cached_reports.lock().await;
        if let Some(reports) = cache.as_ref() {
            return Ok(reports.clone());
        }

        let response = self
            .http_client
            .get(format!("{}/api/reports", self.base_url))
            .header("x-user-id", &self.user_id)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let reports: Vec<Report> = decode(response).await?;
        *cache = Some(reports.clone());
        Ok(reports)
    }

    /// Fetch one report by id
    pub async fn get_report(&self, id: i64) -> Result<Report, ClientError> {
        let response = self
            .http_client
            .get(format!("{}/api/reports/{}", self.base_url, id))
            .header("x-user-id", &self.user_id)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        decode(response).await
    }

    /// Generate and persist a new report, invalidating the cached list
    pub async fn create_report(
        &self,
        address: &str,
        business_type: &str,
    ) -> Result<Report, ClientError> {
        let request = AnalyzeReportRequest {
            address: address.to_string(),
            business_type: business_type.to_string(),
        };

        let response = self
            .http_client
            .post(format!("{}/api/reports/analyze", self.base_url))
            .header("x-user-id", &self.user_id)
            .json(&request)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let report: Report = decode(response).await?;

        // Drop the stale list so the next read refetches
        *self.cached_reports.lock().await = None;

        tracing::debug!(report_id = report.id, "Created report");
        Ok(report)
    }
}

/// Decode a response through the shared contract, surfacing the server's
/// `{message}` envelope on non-2xx statuses
async fn decode<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status();
    let bytes = response
        .bytes()
        .await
        .map_err(|e| ClientError::Network(e.to_string()))?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorResponse>(&bytes)
            .map(|envelope| envelope.message)
            .unwrap_or_else(|_| String::from_utf8_lossy(&bytes).to_string());
        return Err(ClientError::Api {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_slice(&bytes).map_err(|e| ClientError::Contract(e.to_string()))
}

//! Chat-completion model client
//!
//! `ModelClient` is the seam between the generators and the upstream model
//! API; tests substitute a scripted implementation. `OpenAiClient` talks to
//! any OpenAI-compatible `/chat/completions` endpoint with structured-JSON
//! output mode and an explicit request timeout, so a hung upstream call
//! fails fast instead of hanging the request.

use async_trait::async_trait;
use marketpulse_common::config::ModelConfig;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

/// Model client errors
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// One chat-completion invocation in structured-JSON mode
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Send a system+user message pair, return the raw completion text
    async fn complete_json(&self, system: &str, user: &str) -> Result<String, ModelError>;
}

/// OpenAI-compatible chat-completion client
pub struct OpenAiClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(config: &ModelConfig) -> Result<Self, ModelError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ModelError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl ModelClient for OpenAiClient {
    async fn complete_json(&self, system: &str, user: &str) -> Result<String, ModelError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user},
            ],
            "response_format": {"type": "json_object"},
        });

        tracing::debug!(model = %self.model, url = %url, "Requesting completion");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ModelError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ModelError::Api(status.as_u16(), error_text));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ModelError::Parse(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ModelError::Parse("completion contained no choices".to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

//! Market-analysis and live-insight generators
//!
//! Both are pure functions of (address, businessType) plus one outbound
//! model call. The completion is parsed into the shared contract types
//! before anything is returned, so a payload that drifts from the contract
//! is a `GenerationError`, never a stored artifact.

use marketpulse_common::{AnalysisData, LiveInsight};
use serde::de::DeserializeOwned;

use super::{GenerationError, ModelClient};

const ANALYSIS_SYSTEM_PROMPT: &str = "\
You are a hyperlocal market analyst. Given a business address and type, \
produce a market analysis for the area within a 5-mile radius of the \
address. Respond with ONLY a JSON object, no prose, matching exactly this \
shape: \
{\"marketSize\": {\"tam\": {\"value\": number, \"description\": string}, \
\"sam\": {\"value\": number, \"description\": string}, \
\"som\": {\"value\": number, \"description\": string}}, \
\"demographics\": {\"population\": number, \"medianIncome\": number, \
\"ageGroups\": [{\"range\": string, \"percentage\": number}], \
\"description\": string}, \
\"psychographics\": {\"interests\": [string], \"lifestyle\": string, \
\"buyingBehavior\": string}, \
\"weather\": {\"seasonalTrends\": string, \"impactOnBusiness\": string}, \
\"traffic\": {\"typicalTraffic\": string, \"challenges\": [string], \
\"peakHours\": string}}";

const LIVE_INSIGHT_SYSTEM_PROMPT: &str = "\
You are a local conditions reporter. Given a business address and type, \
produce current weather, traffic, and recent local news relevant to that \
business. Respond with ONLY a JSON object, no prose, matching exactly this \
shape: \
{\"weather\": {\"temp\": string, \"condition\": string, \"impact\": string}, \
\"traffic\": {\"status\": string, \"delay\": string, \
\"notablePatterns\": string}, \
\"news\": [{\"title\": string, \"source\": string, \"summary\": string, \
\"date\": string, \"category\": string}]}";

/// Generate a market analysis for a prospective business location
pub async fn generate_analysis(
    model: &dyn ModelClient,
    address: &str,
    business_type: &str,
) -> Result<AnalysisData, GenerationError> {
    let user_prompt = format!(
        "Analyze the market for a {} at {}. Cover market sizing (TAM/SAM/SOM in \
         annual dollars), local demographics, psychographics of likely customers, \
         seasonal weather impact, and traffic patterns.",
        business_type, address
    );

    let raw = model.complete_json(ANALYSIS_SYSTEM_PROMPT, &user_prompt).await?;
    let data: AnalysisData = parse_completion(&raw)?;

    tracing::debug!(address = %address, business_type = %business_type, "Generated market analysis");
    Ok(data)
}

/// Generate an ephemeral weather/traffic/news snapshot for an existing
/// report's location. Result is never persisted; every call re-queries.
pub async fn generate_live_insight(
    model: &dyn ModelClient,
    address: &str,
    business_type: &str,
) -> Result<LiveInsight, GenerationError> {
    let user_prompt = format!(
        "Report current conditions around {} as they affect a {}: weather with \
         business impact, traffic status with delays and notable patterns, and \
         up to five recent local news items.",
        address, business_type
    );

    let raw = model
        .complete_json(LIVE_INSIGHT_SYSTEM_PROMPT, &user_prompt)
        .await?;
    parse_completion(&raw)
}

fn parse_completion<T: DeserializeOwned>(raw: &str) -> Result<T, GenerationError> {
    serde_json::from_str(raw).map_err(|e| GenerationError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::services::ModelError;

    /// Returns a fixed completion and records the prompts it was given
    struct FixedModel {
        response: String,
        seen_prompts: Mutex<Vec<(String, String)>>,
    }

    impl FixedModel {
        fn new(response: &str) -> Self {
            Self {
                response: response.to_string(),
                seen_prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ModelClient for FixedModel {
        async fn complete_json(&self, system: &str, user: &str) -> Result<String, ModelError> {
            self.seen_prompts
                .lock()
                .unwrap()
                .push((system.to_string(), user.to_string()));
            Ok(self.response.clone())
        }
    }

    struct FailingModel;

    #[async_trait]
    impl ModelClient for FailingModel {
        async fn complete_json(&self, _system: &str, _user: &str) -> Result<String, ModelError> {
            Err(ModelError::Api(503, "upstream unavailable".to_string()))
        }
    }

    fn valid_analysis_json() -> String {
        serde_json::json!({
            "marketSize": {
                "tam": {"value": 1000000.0, "description": "t"},
                "sam": {"value": 500000.0, "description": "s"},
                "som": {"value": 100000.0, "description": "o"}
            },
            "demographics": {
                "population": 30000.0, "medianIncome": 55000.0,
                "ageGroups": [{"range": "25-44", "percentage": 40.0}],
                "description": "d"
            },
            "psychographics": {"interests": ["i"], "lifestyle": "l", "buyingBehavior": "b"},
            "weather": {"seasonalTrends": "st", "impactOnBusiness": "ib"},
            "traffic": {"typicalTraffic": "tt", "challenges": ["c"], "peakHours": "ph"}
        })
        .to_string()
    }

    #[tokio::test]
    async fn analysis_parses_valid_completion() {
        let model = FixedModel::new(&valid_analysis_json());

        let data = generate_analysis(&model, "1 Main St", "Bakery").await.unwrap();
        assert_eq!(data.market_size.tam.value, 1000000.0);

        let prompts = model.seen_prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].1.contains("1 Main St"));
        assert!(prompts[0].1.contains("Bakery"));
    }

    #[tokio::test]
    async fn analysis_rejects_non_json_completion() {
        let model = FixedModel::new("Here is your analysis: it looks great!");

        let result = generate_analysis(&model, "1 Main St", "Bakery").await;
        assert!(matches!(result, Err(GenerationError::Malformed(_))));
    }

    #[tokio::test]
    async fn analysis_rejects_schema_drift() {
        // Valid JSON, wrong shape
        let model = FixedModel::new(r#"{"marketSize": "huge"}"#);

        let result = generate_analysis(&model, "1 Main St", "Bakery").await;
        assert!(matches!(result, Err(GenerationError::Malformed(_))));
    }

    #[tokio::test]
    async fn analysis_surfaces_upstream_failure() {
        let result = generate_analysis(&FailingModel, "1 Main St", "Bakery").await;
        assert!(matches!(result, Err(GenerationError::Upstream(_))));
    }

    #[tokio::test]
    async fn live_insight_parses_valid_completion() {
        let model = FixedModel::new(
            &serde_json::json!({
                "weather": {"temp": "68F", "condition": "Cloudy", "impact": "Low"},
                "traffic": {"status": "Light", "delay": "None", "notablePatterns": "Quiet"},
                "news": []
            })
            .to_string(),
        );

        let insight = generate_live_insight(&model, "1 Main St", "Bakery").await.unwrap();
        assert_eq!(insight.weather.condition, "Cloudy");
        assert!(insight.news.is_empty());
    }
}

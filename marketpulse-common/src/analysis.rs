//! Analysis payload contracts
//!
//! `AnalysisData` is the five-section market-analysis shape the model is
//! instructed to produce for a report; `LiveInsight` is the ephemeral
//! weather/traffic/news snapshot. Both sides of the wire deserialize through
//! these types, so parsing is also the schema validation: a payload that
//! does not match never reaches storage or the caller.

use serde::{Deserialize, Serialize};

/// Market-analysis payload embedded in a report's `data` field.
///
/// Validated at creation time, stored as opaque JSON thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisData {
    pub market_size: MarketSize,
    pub demographics: Demographics,
    pub psychographics: Psychographics,
    pub weather: WeatherImpact,
    pub traffic: TrafficProfile,
}

/// TAM/SAM/SOM market sizing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSize {
    pub tam: MarketSegment,
    pub sam: MarketSegment,
    pub som: MarketSegment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSegment {
    pub value: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Demographics {
    pub population: f64,
    pub median_income: f64,
    pub age_groups: Vec<AgeGroup>,
    pub description: String,
}

/// Age bracket with its share of the local population.
/// Percentages are taken as the model reports them (not checked to sum to 100).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeGroup {
    pub range: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Psychographics {
    pub interests: Vec<String>,
    pub lifestyle: String,
    pub buying_behavior: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherImpact {
    pub seasonal_trends: String,
    pub impact_on_business: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficProfile {
    pub typical_traffic: String,
    pub challenges: Vec<String>,
    pub peak_hours: String,
}

/// Ephemeral weather/traffic/news snapshot for an existing report's location.
/// Generated on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveInsight {
    pub weather: LiveWeather,
    pub traffic: LiveTraffic,
    pub news: Vec<NewsItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveWeather {
    pub temp: String,
    pub condition: String,
    pub impact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveTraffic {
    pub status: String,
    pub delay: String,
    pub notable_patterns: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub title: String,
    pub source: String,
    pub summary: String,
    pub date: String,
    pub category: String,
}

//! Brand-statement generators
//!
//! One parameterized generator covers all five brand-strategy kinds: the
//! kind descriptor selects the prompt and the JSON field the statement is
//! extracted from. Takes one free-text input, returns one statement string.

use marketpulse_common::BrandKind;

use super::{GenerationError, ModelClient};

/// Generate a single brand statement from free-text business input
pub async fn generate_brand_statement(
    model: &dyn ModelClient,
    kind: BrandKind,
    input: &str,
) -> Result<String, GenerationError> {
    let system = system_prompt(kind);
    let user = format!("Business description: {}", input);

    let raw = model.complete_json(&system, &user).await?;
    let value: serde_json::Value =
        serde_json::from_str(&raw).map_err(|e| GenerationError::Malformed(e.to_string()))?;

    value
        .get(kind.field())
        .and_then(|field| field.as_str())
        .map(str::to_string)
        .ok_or_else(|| {
            GenerationError::Malformed(format!(
                "completion is missing the \"{}\" string field",
                kind.field()
            ))
        })
}

fn system_prompt(kind: BrandKind) -> String {
    let (role, guidance) = match kind {
        BrandKind::Mission => (
            "brand strategist",
            "Write a concise, memorable mission statement (one to two sentences) \
             capturing what the business does and who it serves.",
        ),
        BrandKind::Vision => (
            "brand strategist",
            "Write an aspirational vision statement (one to two sentences) \
             describing the future the business is working toward.",
        ),
        BrandKind::Value => (
            "positioning expert",
            "Write a sharp value proposition (one to two sentences) stating the \
             concrete benefit that sets this business apart.",
        ),
        BrandKind::TargetMarket => (
            "market researcher",
            "Describe the primary target market in two to three sentences: who \
             they are, what they need, and why this business fits them.",
        ),
        BrandKind::Background => (
            "brand storyteller",
            "Write a short brand background (two to four sentences) telling the \
             story behind the business in an authentic voice.",
        ),
    };

    format!(
        "You are a {}. {} Respond with ONLY a JSON object of the form \
         {{\"{}\": string}}, no prose.",
        role,
        guidance,
        kind.field()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::services::ModelError;

    struct FixedModel(String);

    #[async_trait]
    impl ModelClient for FixedModel {
        async fn complete_json(&self, _system: &str, _user: &str) -> Result<String, ModelError> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn extracts_statement_from_kind_field() {
        let model = FixedModel(r#"{"valueProposition": "Fresh bread, five minutes from home."}"#.into());

        let statement = generate_brand_statement(&model, BrandKind::Value, "bakery, downtown")
            .await
            .unwrap();
        assert_eq!(statement, "Fresh bread, five minutes from home.");
    }

    #[tokio::test]
    async fn rejects_completion_missing_the_field() {
        // Model answered with the wrong field name
        let model = FixedModel(r#"{"mission": "text"}"#.into());

        let result = generate_brand_statement(&model, BrandKind::Vision, "bakery").await;
        assert!(matches!(result, Err(GenerationError::Malformed(_))));
    }

    #[tokio::test]
    async fn rejects_non_string_field() {
        let model = FixedModel(r#"{"mission": 42}"#.into());

        let result = generate_brand_statement(&model, BrandKind::Mission, "bakery").await;
        assert!(matches!(result, Err(GenerationError::Malformed(_))));
    }

    #[tokio::test]
    async fn each_kind_asks_for_its_own_field() {
        for kind in BrandKind::ALL {
            let prompt = system_prompt(kind);
            assert!(prompt.contains(kind.field()), "prompt for {:?}", kind);
        }
    }
}

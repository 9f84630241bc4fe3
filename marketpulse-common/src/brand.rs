//! Brand-strategy entity kinds
//!
//! Five structurally parallel entities (mission, vision, value proposition,
//! target market, background) share one storage row shape and one set of
//! route handlers. `BrandKind` is the descriptor table that supplies each
//! kind's table name, column, wire field, and URL segments, so there is one
//! implementation instead of five diverging copies.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// One of the five brand-strategy entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrandKind {
    Mission,
    Vision,
    Value,
    TargetMarket,
    Background,
}

impl BrandKind {
    pub const ALL: [BrandKind; 5] = [
        BrandKind::Mission,
        BrandKind::Vision,
        BrandKind::Value,
        BrandKind::TargetMarket,
        BrandKind::Background,
    ];

    /// Short kind name used in the generate endpoint path (`/api/generate-<kind>`)
    pub fn kind_name(self) -> &'static str {
        match self {
            BrandKind::Mission => "mission",
            BrandKind::Vision => "vision",
            BrandKind::Value => "value",
            BrandKind::TargetMarket => "target",
            BrandKind::Background => "background",
        }
    }

    /// Plural URL segment for the CRUD endpoints (`/api/<plural>`)
    pub fn plural_path(self) -> &'static str {
        match self {
            BrandKind::Mission => "missions",
            BrandKind::Vision => "visions",
            BrandKind::Value => "values",
            BrandKind::TargetMarket => "target-markets",
            BrandKind::Background => "backgrounds",
        }
    }

    /// Wire name of the primary text field
    pub fn field(self) -> &'static str {
        match self {
            BrandKind::Mission => "mission",
            BrandKind::Vision => "vision",
            BrandKind::Value => "valueProposition",
            BrandKind::TargetMarket => "targetMarket",
            BrandKind::Background => "background",
        }
    }

    /// Database table holding this kind
    pub fn table(self) -> &'static str {
        match self {
            BrandKind::Mission => "brand_missions",
            BrandKind::Vision => "brand_visions",
            BrandKind::Value => "brand_values",
            BrandKind::TargetMarket => "brand_target_markets",
            BrandKind::Background => "brand_backgrounds",
        }
    }

    /// Database column holding the primary text field
    pub fn column(self) -> &'static str {
        match self {
            BrandKind::Mission => "mission",
            BrandKind::Vision => "vision",
            BrandKind::Value => "value_proposition",
            BrandKind::TargetMarket => "target_market",
            BrandKind::Background => "background",
        }
    }

    /// Human-readable label for log and error messages
    pub fn label(self) -> &'static str {
        match self {
            BrandKind::Mission => "mission statement",
            BrandKind::Vision => "vision statement",
            BrandKind::Value => "value proposition",
            BrandKind::TargetMarket => "target market definition",
            BrandKind::Background => "brand background",
        }
    }
}

/// A saved brand-strategy entity, kind-agnostic row shape.
///
/// The primary text field's wire name varies per kind, so the wire form is
/// built through [`BrandRecord::to_json`] rather than a serde derive.
#[derive(Debug, Clone, PartialEq)]
pub struct BrandRecord {
    pub id: i64,
    pub user_id: String,
    /// Primary text field (mission / vision / valueProposition / ...)
    pub text: String,
    /// Free-text input the statement was generated from, kept for provenance
    pub original_input: String,
    pub created_at: DateTime<Utc>,
}

impl BrandRecord {
    /// Wire form: `{id, userId, <field>, originalInput, createdAt}`
    pub fn to_json(&self, kind: BrandKind) -> Value {
        let mut map = Map::new();
        map.insert("id".into(), Value::from(self.id));
        map.insert("userId".into(), Value::from(self.user_id.clone()));
        map.insert(kind.field().into(), Value::from(self.text.clone()));
        map.insert(
            "originalInput".into(),
            Value::from(self.original_input.clone()),
        );
        map.insert(
            "createdAt".into(),
            Value::from(self.created_at.to_rfc3339()),
        );
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_table_is_consistent() {
        for kind in BrandKind::ALL {
            assert!(kind.table().starts_with("brand_"));
            assert!(!kind.field().is_empty());
            assert!(!kind.plural_path().contains('/'));
        }
    }

    #[test]
    fn wire_form_uses_kind_field_name() {
        let record = BrandRecord {
            id: 7,
            user_id: "user-1".into(),
            text: "Serve the neighborhood first.".into(),
            original_input: "bakery, downtown".into(),
            created_at: Utc::now(),
        };

        let json = record.to_json(BrandKind::Value);
        assert_eq!(json["id"], 7);
        assert_eq!(json["userId"], "user-1");
        assert_eq!(json["valueProposition"], "Serve the neighborhood first.");
        assert_eq!(json["originalInput"], "bakery, downtown");
        assert!(json.get("value").is_none());
    }
}

//! Tracking plan and rule state

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::convert::{json_string, parse_json};
use crate::segment::models::{Rule, RuleInput, TrackingPlan};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleState {
    #[serde(rename = "type")]
    pub rule_type: String,
    pub key: Option<String>,
    pub version: f64,
    /// Normalized JSON Schema
    pub json_schema: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub deprecated_at: Option<String>,
}

impl RuleState {
    pub fn from_api(rule: &Rule) -> Result<Self> {
        Ok(Self {
            rule_type: rule.rule_type.clone(),
            key: rule.key.clone(),
            version: rule.version,
            json_schema: json_string(rule.json_schema.as_ref())?,
            created_at: rule.created_at.clone(),
            updated_at: rule.updated_at.clone(),
            deprecated_at: rule.deprecated_at.clone(),
        })
    }

    pub fn to_input(&self) -> Result<RuleInput> {
        Ok(RuleInput {
            rule_type: self.rule_type.clone(),
            key: self.key.clone(),
            json_schema: parse_json("json_schema", self.json_schema.as_deref())?
                .unwrap_or_else(|| json!({})),
            version: self.version,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingPlanState {
    pub id: Option<String>,
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub plan_type: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    /// Set of rules; `None` leaves rules unmanaged
    pub rules: Option<Vec<RuleState>>,
}

impl TrackingPlanState {
    pub fn from_api(plan: &TrackingPlan, rules: Option<&[Rule]>) -> Result<Self> {
        let rules = match rules {
            Some(rules) => Some(rules.iter().map(RuleState::from_api).collect::<Result<Vec<_>>>()?),
            None => None,
        };

        Ok(Self {
            id: Some(plan.id.clone()),
            name: plan.name.clone().unwrap_or_default(),
            slug: plan.slug.clone(),
            description: plan.description.clone(),
            plan_type: plan.plan_type.clone(),
            created_at: plan.created_at.clone(),
            updated_at: plan.updated_at.clone(),
            rules,
        })
    }

    pub fn create_body(&self) -> Value {
        let mut body = Map::new();
        body.insert("name".into(), json!(self.name));
        body.insert("type".into(), json!(self.plan_type));
        if let Some(description) = &self.description {
            body.insert("description".into(), json!(description));
        }
        Value::Object(body)
    }

    pub fn update_body(&self) -> Value {
        json!({ "name": self.name, "description": self.description })
    }

    pub fn rule_inputs(&self) -> Result<Vec<RuleInput>> {
        self.rules
            .iter()
            .flatten()
            .map(RuleState::to_input)
            .collect()
    }
}

/// Compare two rule sets ignoring order and server timestamps
pub fn same_rules(a: &[RuleState], b: &[RuleState]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    // Each rule on one side consumes exactly one equal rule on the other
    let mut unmatched: Vec<_> = b.iter().map(rule_identity).collect();
    a.iter().map(rule_identity).all(|identity| {
        match unmatched.iter().position(|other| *other == identity) {
            Some(index) => {
                unmatched.swap_remove(index);
                true
            }
            None => false,
        }
    })
}

/// Identity of a rule inside the set; timestamps are server-assigned
fn rule_identity(rule: &RuleState) -> (String, Option<String>, u64, Option<Value>) {
    let schema = rule
        .json_schema
        .as_deref()
        .and_then(|s| serde_json::from_str::<Value>(s).ok());
    (
        rule.rule_type.clone(),
        rule.key.clone(),
        rule.version.to_bits(),
        schema,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(key: &str, schema: &str) -> RuleState {
        RuleState {
            rule_type: "TRACK".to_string(),
            key: Some(key.to_string()),
            version: 1.0,
            json_schema: Some(schema.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_rule_from_api_keeps_missing_timestamps_null() {
        let rule: Rule = serde_json::from_value(json!({
            "type": "TRACK",
            "key": "Order Completed",
            "version": 1,
            "jsonSchema": { "properties": {} },
            "createdAt": "2023-09-08T19:02:55.000Z"
        }))
        .unwrap();

        let state = RuleState::from_api(&rule).unwrap();
        assert_eq!(state.json_schema.as_deref(), Some("{\"properties\":{}}"));
        assert_eq!(state.created_at.as_deref(), Some("2023-09-08T19:02:55.000Z"));
        assert_eq!(state.updated_at, None);
        assert_eq!(state.deprecated_at, None);
    }

    #[test]
    fn test_rule_input_parses_schema() {
        let input = rule("Signed Up", r#"{"type": "object"}"#).to_input().unwrap();
        assert_eq!(input.json_schema, json!({ "type": "object" }));
        assert_eq!(input.key.as_deref(), Some("Signed Up"));
    }

    #[test]
    fn test_same_rules_ignores_order_and_formatting() {
        let a = vec![rule("A", r#"{"x":1}"#), rule("B", "{}")];
        let b = vec![rule("B", "{ }"), rule("A", r#"{ "x": 1 }"#)];
        assert!(same_rules(&a, &b));

        let c = vec![rule("A", r#"{"x":2}"#), rule("B", "{}")];
        assert!(!same_rules(&a, &c));
    }

    #[test]
    fn test_same_rules_counts_duplicates() {
        let a = vec![rule("A", "{}"), rule("A", "{}"), rule("B", "{}")];
        let b = vec![rule("A", "{}"), rule("B", "{}"), rule("B", "{}")];
        assert!(!same_rules(&a, &b));
        assert!(!same_rules(&b, &a));

        let shuffled = vec![rule("B", "{}"), rule("A", "{}"), rule("A", "{}")];
        assert!(same_rules(&a, &shuffled));
    }

    #[test]
    fn test_create_body_omits_absent_description() {
        let state = TrackingPlanState {
            name: "Checkout".to_string(),
            plan_type: "LIVE".to_string(),
            ..Default::default()
        };
        assert_eq!(state.create_body(), json!({ "name": "Checkout", "type": "LIVE" }));
    }
}

//! Source state and request payloads

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::common::LabelState;
use super::convert::{json_string, optional_list, parse_json};
use super::metadata::SourceMetadataState;
use crate::segment::models::{Label, Source};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceState {
    pub id: Option<String>,
    pub slug: String,
    pub name: Option<String>,
    pub workspace_id: Option<String>,
    pub enabled: bool,
    pub write_keys: Option<Vec<String>>,
    pub metadata: SourceMetadataState,
    /// Normalized JSON object
    pub settings: Option<String>,
    pub labels: Option<Vec<LabelState>>,
}

impl SourceState {
    pub fn from_api(source: &Source) -> Result<Self> {
        Ok(Self {
            id: Some(source.id.clone()),
            slug: source.slug.clone(),
            name: source.name.clone(),
            workspace_id: Some(source.workspace_id.clone()),
            enabled: source.enabled,
            write_keys: optional_list(source.write_keys.as_ref(), String::clone),
            metadata: SourceMetadataState::from_api(&source.metadata)?,
            settings: json_string(source.settings.as_ref())?,
            labels: optional_list(source.labels.as_ref(), LabelState::from),
        })
    }

    pub fn create_body(&self) -> Result<Value> {
        let mut body = Map::new();
        body.insert("slug".into(), json!(self.slug));
        body.insert("enabled".into(), json!(self.enabled));
        body.insert("metadataId".into(), json!(self.metadata.id));
        if let Some(name) = &self.name {
            body.insert("name".into(), json!(name));
        }
        if let Some(settings) = parse_json("settings", self.settings.as_deref())? {
            body.insert("settings".into(), settings);
        }
        Ok(Value::Object(body))
    }

    pub fn update_body(&self) -> Result<Value> {
        let mut body = Map::new();
        body.insert("slug".into(), json!(self.slug));
        body.insert("enabled".into(), json!(self.enabled));
        body.insert("name".into(), json!(self.name));
        if let Some(settings) = parse_json("settings", self.settings.as_deref())? {
            body.insert("settings".into(), settings);
        }
        Ok(Value::Object(body))
    }

    /// Labels to send; a null label list clears every label
    pub fn api_labels(&self) -> Vec<Label> {
        self.labels
            .iter()
            .flatten()
            .map(Label::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::attribute_at;

    fn source_payload() -> Value {
        json!({
            "id": "qQEHquLrjRDN9j1ByrChyn",
            "slug": "my-source",
            "name": "My Source",
            "workspaceId": "9aQ1Lj62S4bomZKLF4DPqW",
            "enabled": true,
            "writeKeys": ["PmRsGSVXbgmdENWAcSBdHKHsGBdDBETq"],
            "metadata": {
                "id": "IqDTy1TpoU",
                "slug": "javascript",
                "name": "Javascript",
                "categories": ["Website"],
                "description": "Analytics.js",
                "logos": { "default": "https://cdn.segment.com/js.svg", "alt": null, "mark": "" },
                "options": [
                    { "name": "myOption", "type": "string", "required": true, "defaultValue": "default", "description": "my option" }
                ],
                "isCloudEventSource": false
            },
            "settings": { "token": "abc" },
            "labels": [ { "key": "env", "value": "prod", "description": "production" } ]
        })
    }

    #[test]
    fn test_source_state_mirrors_payload() {
        let source: Source = serde_json::from_value(source_payload()).unwrap();
        let state = serde_json::to_value(SourceState::from_api(&source).unwrap()).unwrap();

        assert_eq!(attribute_at(&state, "id"), Some(&json!("qQEHquLrjRDN9j1ByrChyn")));
        assert_eq!(
            attribute_at(&state, "write_keys.0"),
            Some(&json!("PmRsGSVXbgmdENWAcSBdHKHsGBdDBETq"))
        );
        assert_eq!(
            attribute_at(&state, "metadata.options.0.default_value"),
            Some(&json!("\"default\""))
        );
        assert_eq!(attribute_at(&state, "metadata.options.0.label"), Some(&Value::Null));
        assert_eq!(attribute_at(&state, "metadata.logos.alt"), Some(&Value::Null));
        assert_eq!(attribute_at(&state, "metadata.logos.mark"), Some(&json!("")));
        assert_eq!(attribute_at(&state, "settings"), Some(&json!("{\"token\":\"abc\"}")));
        assert_eq!(attribute_at(&state, "labels.0.description"), Some(&json!("production")));
    }

    #[test]
    fn test_absent_lists_map_to_null() {
        let source: Source = serde_json::from_value(json!({
            "id": "qQEHquLrjRDN9j1ByrChyn",
            "slug": "my-source",
            "workspaceId": "9aQ1Lj62S4bomZKLF4DPqW",
            "enabled": true,
            "metadata": { "id": "IqDTy1TpoU" }
        }))
        .unwrap();
        let state = serde_json::to_value(SourceState::from_api(&source).unwrap()).unwrap();

        assert_eq!(state["labels"], Value::Null);
        assert_eq!(state["write_keys"], Value::Null);
        assert_eq!(state["metadata"]["categories"], Value::Null);
        assert_eq!(state["metadata"]["options"], Value::Null);
    }

    #[test]
    fn test_empty_lists_stay_empty() {
        let mut payload = source_payload();
        payload["labels"] = json!([]);
        payload["writeKeys"] = json!([]);
        let source: Source = serde_json::from_value(payload).unwrap();
        let state = serde_json::to_value(SourceState::from_api(&source).unwrap()).unwrap();

        assert_eq!(state["labels"], json!([]));
        assert_eq!(state["write_keys"], json!([]));
    }

    #[test]
    fn test_create_body_uses_metadata_id() {
        let state = SourceState {
            slug: "my-source".to_string(),
            enabled: true,
            metadata: SourceMetadataState {
                id: "IqDTy1TpoU".to_string(),
                ..Default::default()
            },
            settings: Some(r#"{"token": "abc"}"#.to_string()),
            ..Default::default()
        };

        assert_eq!(
            state.create_body().unwrap(),
            json!({
                "slug": "my-source",
                "enabled": true,
                "metadataId": "IqDTy1TpoU",
                "settings": { "token": "abc" }
            })
        );
    }

    #[test]
    fn test_malformed_settings_is_an_error() {
        let state = SourceState {
            settings: Some("{".to_string()),
            ..Default::default()
        };
        assert!(state.update_body().is_err());
    }
}

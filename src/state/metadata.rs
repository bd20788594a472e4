//! Catalog metadata state
//!
//! Metadata blocks are read-only: only `id` is ever taken from configuration,
//! everything else is filled from the catalog entry the API returns.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::common::{LogosState, OptionState};
use super::convert::{json_string, optional_list, try_list};
use crate::segment::models::{
    ActionField, Component, Contact, DestinationAction, DestinationMetadata, Preset,
    SourceMetadata, SupportedFeatures, SupportedMethods, SupportedPlatforms, WarehouseMetadata,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceMetadataState {
    pub id: String,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub logos: Option<LogosState>,
    pub options: Option<Vec<OptionState>>,
    pub categories: Option<Vec<String>>,
    pub is_cloud_event_source: Option<bool>,
}

impl SourceMetadataState {
    pub fn from_api(metadata: &SourceMetadata) -> Result<Self> {
        Ok(Self {
            id: metadata.id.clone(),
            name: metadata.name.clone(),
            slug: metadata.slug.clone(),
            description: metadata.description.clone(),
            logos: metadata.logos.as_ref().map(LogosState::from),
            options: try_list(metadata.options.as_ref(), OptionState::from_api)?,
            categories: optional_list(metadata.categories.as_ref(), String::clone),
            is_cloud_event_source: metadata.is_cloud_event_source,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarehouseMetadataState {
    pub id: String,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub logos: Option<LogosState>,
    pub options: Option<Vec<OptionState>>,
}

impl WarehouseMetadataState {
    pub fn from_api(metadata: &WarehouseMetadata) -> Result<Self> {
        Ok(Self {
            id: metadata.id.clone(),
            name: metadata.name.clone(),
            slug: metadata.slug.clone(),
            description: metadata.description.clone(),
            logos: metadata.logos.as_ref().map(LogosState::from),
            options: try_list(metadata.options.as_ref(), OptionState::from_api)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportedMethodsState {
    pub track: Option<bool>,
    pub pageview: Option<bool>,
    pub identify: Option<bool>,
    pub group: Option<bool>,
    pub alias: Option<bool>,
}

impl From<&SupportedMethods> for SupportedMethodsState {
    fn from(methods: &SupportedMethods) -> Self {
        Self {
            track: methods.track,
            pageview: methods.pageview,
            identify: methods.identify,
            group: methods.group,
            alias: methods.alias,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportedPlatformsState {
    pub browser: Option<bool>,
    pub server: Option<bool>,
    pub mobile: Option<bool>,
}

impl From<&SupportedPlatforms> for SupportedPlatformsState {
    fn from(platforms: &SupportedPlatforms) -> Self {
        Self {
            browser: platforms.browser,
            server: platforms.server,
            mobile: platforms.mobile,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportedFeaturesState {
    pub cloud_mode_instances: Option<String>,
    pub device_mode_instances: Option<String>,
    pub replay: Option<bool>,
    pub browser_unbundling: Option<bool>,
    pub browser_unbundling_public: Option<bool>,
}

impl From<&SupportedFeatures> for SupportedFeaturesState {
    fn from(features: &SupportedFeatures) -> Self {
        Self {
            cloud_mode_instances: features.cloud_mode_instances.clone(),
            device_mode_instances: features.device_mode_instances.clone(),
            replay: features.replay,
            browser_unbundling: features.browser_unbundling,
            browser_unbundling_public: features.browser_unbundling_public,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentState {
    pub code: String,
    pub owner: Option<String>,
    #[serde(rename = "type")]
    pub component_type: String,
}

impl From<&Component> for ComponentState {
    fn from(component: &Component) -> Self {
        Self {
            code: component.code.clone(),
            owner: component.owner.clone(),
            component_type: component.component_type.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionFieldState {
    pub id: String,
    pub sort_order: Option<f64>,
    pub field_key: String,
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub field_type: String,
    pub description: Option<String>,
    pub placeholder: Option<String>,
    pub default_value: Option<String>,
    pub required: Option<bool>,
    pub multiple: Option<bool>,
    pub choices: Option<String>,
    pub dynamic: Option<bool>,
    pub allow_null: Option<bool>,
}

impl ActionFieldState {
    fn from_api(field: &ActionField) -> Result<Self> {
        Ok(Self {
            id: field.id.clone(),
            sort_order: field.sort_order,
            field_key: field.field_key.clone(),
            label: field.label.clone(),
            field_type: field.field_type.clone(),
            description: field.description.clone(),
            placeholder: field.placeholder.clone(),
            default_value: json_string(field.default_value.as_ref())?,
            required: field.required,
            multiple: field.multiple,
            choices: json_string(field.choices.as_ref())?,
            dynamic: field.dynamic,
            allow_null: field.allow_null,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionState {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub platform: Option<String>,
    pub hidden: Option<bool>,
    pub default_trigger: Option<String>,
    pub fields: Option<Vec<ActionFieldState>>,
}

impl ActionState {
    fn from_api(action: &DestinationAction) -> Result<Self> {
        Ok(Self {
            id: action.id.clone(),
            slug: action.slug.clone(),
            name: action.name.clone(),
            description: action.description.clone(),
            platform: action.platform.clone(),
            hidden: action.hidden,
            default_trigger: action.default_trigger.clone(),
            fields: try_list(action.fields.as_ref(), ActionFieldState::from_api)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresetState {
    pub action_id: String,
    pub name: String,
    pub fields: Option<String>,
    pub trigger: Option<String>,
}

impl PresetState {
    fn from_api(preset: &Preset) -> Result<Self> {
        Ok(Self {
            action_id: preset.action_id.clone(),
            name: preset.name.clone(),
            fields: json_string(preset.fields.as_ref())?,
            trigger: preset.trigger.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactState {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub is_primary: Option<bool>,
}

impl From<&Contact> for ContactState {
    fn from(contact: &Contact) -> Self {
        Self {
            name: contact.name.clone(),
            email: contact.email.clone(),
            role: contact.role.clone(),
            is_primary: contact.is_primary,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DestinationMetadataState {
    pub id: String,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub logos: Option<LogosState>,
    pub options: Option<Vec<OptionState>>,
    pub categories: Option<Vec<String>>,
    pub website: Option<String>,
    pub status: Option<String>,
    pub previous_names: Option<Vec<String>>,
    pub components: Option<Vec<ComponentState>>,
    pub supported_methods: Option<SupportedMethodsState>,
    pub supported_platforms: Option<SupportedPlatformsState>,
    pub supported_features: Option<SupportedFeaturesState>,
    pub actions: Option<Vec<ActionState>>,
    pub presets: Option<Vec<PresetState>>,
    pub contacts: Option<Vec<ContactState>>,
    pub partner_owned: Option<bool>,
    pub supported_regions: Option<Vec<String>>,
    pub region_endpoints: Option<Vec<String>>,
}

impl DestinationMetadataState {
    pub fn from_api(metadata: &DestinationMetadata) -> Result<Self> {
        Ok(Self {
            id: metadata.id.clone(),
            name: metadata.name.clone(),
            slug: metadata.slug.clone(),
            description: metadata.description.clone(),
            logos: metadata.logos.as_ref().map(LogosState::from),
            options: try_list(metadata.options.as_ref(), OptionState::from_api)?,
            categories: optional_list(metadata.categories.as_ref(), String::clone),
            website: metadata.website.clone(),
            status: metadata.status.clone(),
            previous_names: optional_list(metadata.previous_names.as_ref(), String::clone),
            components: optional_list(metadata.components.as_ref(), ComponentState::from),
            // Absent capability blocks still produce a block of nulls
            supported_methods: Some(
                metadata
                    .supported_methods
                    .as_ref()
                    .map(SupportedMethodsState::from)
                    .unwrap_or_default(),
            ),
            supported_platforms: Some(
                metadata
                    .supported_platforms
                    .as_ref()
                    .map(SupportedPlatformsState::from)
                    .unwrap_or_default(),
            ),
            supported_features: Some(
                metadata
                    .supported_features
                    .as_ref()
                    .map(SupportedFeaturesState::from)
                    .unwrap_or_default(),
            ),
            actions: try_list(metadata.actions.as_ref(), ActionState::from_api)?,
            presets: try_list(metadata.presets.as_ref(), PresetState::from_api)?,
            contacts: optional_list(metadata.contacts.as_ref(), ContactState::from),
            partner_owned: metadata.partner_owned,
            supported_regions: optional_list(metadata.supported_regions.as_ref(), String::clone),
            region_endpoints: optional_list(metadata.region_endpoints.as_ref(), String::clone),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::attribute_at;
    use serde_json::{json, Value};

    fn full_destination_metadata() -> Value {
        json!({
            "id": "54521fd525e721e32a72ee91",
            "name": "Mixpanel",
            "slug": "mixpanel",
            "description": "Mixpanel is an event tracking tool.",
            "logos": { "default": "https://cdn.segment.com/mixpanel.svg", "mark": "https://cdn.segment.com/mixpanel-mark.svg", "alt": "Mixpanel" },
            "options": [
                { "name": "apiKey", "type": "string", "required": true, "description": "API key", "defaultValue": "default", "label": "API Key" }
            ],
            "categories": ["Analytics"],
            "website": "https://mixpanel.com",
            "status": "PUBLIC",
            "previousNames": ["Mixpanel Legacy"],
            "components": [ { "code": "https://github.com/segmentio/analytics.js-integrations", "owner": "SEGMENT", "type": "BROWSER" } ],
            "supportedMethods": { "track": true, "pageview": true, "identify": true, "group": false, "alias": true },
            "supportedPlatforms": { "browser": true, "server": true, "mobile": false },
            "supportedFeatures": { "cloudModeInstances": "0", "deviceModeInstances": "0", "replay": true, "browserUnbundling": false, "browserUnbundlingPublic": true },
            "actions": [
                {
                    "id": "fpCD2LmmZM7RMe2eoWxpQn", "slug": "trackEvent", "name": "Track Event", "description": "Send an event",
                    "platform": "CLOUD", "hidden": false, "defaultTrigger": "type = \"track\"",
                    "fields": [
                        { "id": "fA1", "sortOrder": 0, "fieldKey": "event", "label": "Event Name", "type": "STRING",
                          "description": "The event name", "placeholder": "Order Completed", "defaultValue": { "@path": "$.event" },
                          "required": true, "multiple": false, "choices": null, "dynamic": false, "allowNull": false }
                    ]
                }
            ],
            "presets": [ { "actionId": "fpCD2LmmZM7RMe2eoWxpQn", "name": "Track Calls", "fields": { "event": "x" }, "trigger": "type = \"track\"" } ],
            "contacts": [ { "name": "Partner", "email": "partner@example.com", "role": "Engineer", "isPrimary": true } ],
            "partnerOwned": false,
            "supportedRegions": ["us-west-2", "eu-west-1"],
            "regionEndpoints": ["US", "EU"]
        })
    }

    fn map(payload: Value) -> Value {
        let metadata: DestinationMetadata = serde_json::from_value(payload).unwrap();
        serde_json::to_value(DestinationMetadataState::from_api(&metadata).unwrap()).unwrap()
    }

    #[test]
    fn test_full_payload_maps_every_literal() {
        let state = map(full_destination_metadata());

        let expect = |path: &str, value: Value| {
            assert_eq!(attribute_at(&state, path), Some(&value), "attribute {}", path);
        };
        expect("name", json!("Mixpanel"));
        expect("logos.mark", json!("https://cdn.segment.com/mixpanel-mark.svg"));
        expect("options.0.default_value", json!("\"default\""));
        expect("options.0.label", json!("API Key"));
        expect("previous_names.0", json!("Mixpanel Legacy"));
        expect("components.0.type", json!("BROWSER"));
        expect("supported_methods.group", json!(false));
        expect("supported_platforms.mobile", json!(false));
        expect("supported_features.cloud_mode_instances", json!("0"));
        expect("supported_features.replay", json!(true));
        expect("actions.0.default_trigger", json!("type = \"track\""));
        expect("actions.0.fields.0.default_value", json!("{\"@path\":\"$.event\"}"));
        expect("actions.0.fields.0.choices", Value::Null);
        expect("presets.0.fields", json!("{\"event\":\"x\"}"));
        expect("contacts.0.is_primary", json!(true));
        expect("partner_owned", json!(false));
        expect("supported_regions.1", json!("eu-west-1"));
        expect("region_endpoints.0", json!("US"));
    }

    #[test]
    fn test_absent_capabilities_map_to_null_not_false() {
        let state = map(json!({
            "id": "54521fd525e721e32a72ee91",
            "supportedMethods": { "pageview": true },
            "supportedFeatures": {}
        }));

        assert_eq!(attribute_at(&state, "supported_methods.pageview"), Some(&json!(true)));
        assert_eq!(attribute_at(&state, "supported_methods.track"), Some(&Value::Null));
        assert_eq!(attribute_at(&state, "supported_features.replay"), Some(&Value::Null));
        assert_eq!(attribute_at(&state, "supported_platforms.browser"), Some(&Value::Null));
        assert_eq!(attribute_at(&state, "partner_owned"), Some(&Value::Null));
        assert_eq!(attribute_at(&state, "contacts"), Some(&Value::Null));
        assert_eq!(attribute_at(&state, "supported_regions"), Some(&Value::Null));
        assert_eq!(attribute_at(&state, "logos"), Some(&Value::Null));
    }

    #[test]
    fn test_source_metadata_keeps_category_order() {
        let metadata: SourceMetadata = serde_json::from_value(json!({
            "id": "IqDTy1TpoU",
            "name": "Javascript",
            "categories": ["Website", "Server", "Mobile"],
            "isCloudEventSource": false
        }))
        .unwrap();

        let state = SourceMetadataState::from_api(&metadata).unwrap();
        assert_eq!(
            state.categories,
            Some(vec!["Website".to_string(), "Server".to_string(), "Mobile".to_string()])
        );
        assert_eq!(state.is_cloud_event_source, Some(false));
        assert_eq!(state.slug, None);
        assert_eq!(state.options, None);
    }
}

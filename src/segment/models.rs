//! Public API payloads
//!
//! Field shapes follow the JSON returned inside the `{"data": ...}` envelope.
//! Every field the API may omit or send as `null` is an `Option`; collections
//! the API may omit default to empty.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `{"data": ...}` response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// Cursor information returned by list endpoints
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationOutput {
    #[serde(default)]
    pub current: Option<String>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub total_entries: Option<i64>,
}

// =============================================================================
// Catalog
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Logos {
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default)]
    pub mark: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
}

/// Configuration option advertised by a catalog entry
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationOption {
    pub name: String,
    #[serde(rename = "type")]
    pub option_type: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub default_value: Option<Value>,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMetadata {
    pub id: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub logos: Option<Logos>,
    #[serde(default)]
    pub options: Option<Vec<IntegrationOption>>,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    #[serde(default)]
    pub is_cloud_event_source: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseMetadata {
    pub id: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub logos: Option<Logos>,
    #[serde(default)]
    pub options: Option<Vec<IntegrationOption>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SupportedMethods {
    #[serde(default)]
    pub track: Option<bool>,
    #[serde(default)]
    pub pageview: Option<bool>,
    #[serde(default)]
    pub identify: Option<bool>,
    #[serde(default)]
    pub group: Option<bool>,
    #[serde(default)]
    pub alias: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SupportedPlatforms {
    #[serde(default)]
    pub browser: Option<bool>,
    #[serde(default)]
    pub server: Option<bool>,
    #[serde(default)]
    pub mobile: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportedFeatures {
    #[serde(default)]
    pub cloud_mode_instances: Option<String>,
    #[serde(default)]
    pub device_mode_instances: Option<String>,
    #[serde(default)]
    pub replay: Option<bool>,
    #[serde(default)]
    pub browser_unbundling: Option<bool>,
    #[serde(default)]
    pub browser_unbundling_public: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Component {
    pub code: String,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(rename = "type")]
    pub component_type: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionField {
    pub id: String,
    #[serde(default)]
    pub sort_order: Option<f64>,
    pub field_key: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub default_value: Option<Value>,
    #[serde(default)]
    pub required: Option<bool>,
    #[serde(default)]
    pub multiple: Option<bool>,
    #[serde(default)]
    pub choices: Option<Value>,
    #[serde(default)]
    pub dynamic: Option<bool>,
    #[serde(default)]
    pub allow_null: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationAction {
    pub id: String,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub hidden: Option<bool>,
    #[serde(default)]
    pub default_trigger: Option<String>,
    #[serde(default)]
    pub fields: Option<Vec<ActionField>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    pub action_id: String,
    pub name: String,
    #[serde(default)]
    pub fields: Option<Value>,
    #[serde(default)]
    pub trigger: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub is_primary: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationMetadata {
    pub id: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub logos: Option<Logos>,
    #[serde(default)]
    pub options: Option<Vec<IntegrationOption>>,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub previous_names: Option<Vec<String>>,
    #[serde(default)]
    pub components: Option<Vec<Component>>,
    #[serde(default)]
    pub supported_methods: Option<SupportedMethods>,
    #[serde(default)]
    pub supported_platforms: Option<SupportedPlatforms>,
    #[serde(default)]
    pub supported_features: Option<SupportedFeatures>,
    #[serde(default)]
    pub actions: Option<Vec<DestinationAction>>,
    #[serde(default)]
    pub presets: Option<Vec<Preset>>,
    #[serde(default)]
    pub contacts: Option<Vec<Contact>>,
    #[serde(default)]
    pub partner_owned: Option<bool>,
    #[serde(default)]
    pub supported_regions: Option<Vec<String>>,
    #[serde(default)]
    pub region_endpoints: Option<Vec<String>>,
}

// =============================================================================
// Sources, destinations, warehouses
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Label {
    pub key: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub id: String,
    pub slug: String,
    #[serde(default)]
    pub name: Option<String>,
    pub workspace_id: String,
    pub enabled: bool,
    #[serde(default)]
    pub write_keys: Option<Vec<String>>,
    pub metadata: SourceMetadata,
    #[serde(default)]
    pub settings: Option<Value>,
    #[serde(default)]
    pub labels: Option<Vec<Label>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub enabled: bool,
    pub workspace_id: String,
    pub source_id: String,
    #[serde(default)]
    pub settings: Option<Value>,
    pub metadata: DestinationMetadata,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warehouse {
    pub id: String,
    pub workspace_id: String,
    pub enabled: bool,
    #[serde(default)]
    pub name: Option<String>,
    pub metadata: WarehouseMetadata,
    #[serde(default)]
    pub settings: Option<Value>,
}

// =============================================================================
// Tracking plans
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingPlan {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub plan_type: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Tracking plan rule as returned by the rules listing
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    #[serde(rename = "type")]
    pub rule_type: String,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub json_schema: Option<Value>,
    pub version: f64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub deprecated_at: Option<String>,
}

/// Rule payload accepted by the replace-rules endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleInput {
    #[serde(rename = "type")]
    pub rule_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub json_schema: Value,
    pub version: f64,
}

// =============================================================================
// Access management
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Workspace {
    pub id: String,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Role {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PermissionResource {
    pub id: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(default)]
    pub labels: Vec<Label>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    pub role_id: String,
    #[serde(default)]
    pub role_name: Option<String>,
    #[serde(default)]
    pub resources: Vec<PermissionResource>,
}

/// Permission payload accepted by invite and user-permission endpoints
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionInput {
    pub role_id: String,
    pub resources: Vec<PermissionResource>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

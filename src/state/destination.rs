//! Destination and warehouse state

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::convert::{json_string, parse_json};
use super::metadata::{DestinationMetadataState, WarehouseMetadataState};
use crate::segment::models::{Destination, Warehouse};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DestinationState {
    pub id: Option<String>,
    pub name: Option<String>,
    pub enabled: bool,
    pub workspace_id: Option<String>,
    pub source_id: String,
    pub metadata: DestinationMetadataState,
    pub settings: Option<String>,
}

impl DestinationState {
    pub fn from_api(destination: &Destination) -> Result<Self> {
        Ok(Self {
            id: Some(destination.id.clone()),
            name: destination.name.clone(),
            enabled: destination.enabled,
            workspace_id: Some(destination.workspace_id.clone()),
            source_id: destination.source_id.clone(),
            metadata: DestinationMetadataState::from_api(&destination.metadata)?,
            settings: json_string(destination.settings.as_ref())?,
        })
    }

    pub fn create_body(&self) -> Result<Value> {
        let mut body = Map::new();
        body.insert("sourceId".into(), json!(self.source_id));
        body.insert("metadataId".into(), json!(self.metadata.id));
        body.insert("enabled".into(), json!(self.enabled));
        if let Some(name) = &self.name {
            body.insert("name".into(), json!(name));
        }
        body.insert(
            "settings".into(),
            parse_json("settings", self.settings.as_deref())?.unwrap_or_else(|| json!({})),
        );
        Ok(Value::Object(body))
    }

    pub fn update_body(&self) -> Result<Value> {
        let mut body = Map::new();
        body.insert("enabled".into(), json!(self.enabled));
        body.insert("name".into(), json!(self.name));
        if let Some(settings) = parse_json("settings", self.settings.as_deref())? {
            body.insert("settings".into(), settings);
        }
        Ok(Value::Object(body))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarehouseState {
    pub id: Option<String>,
    pub workspace_id: Option<String>,
    pub enabled: bool,
    pub name: Option<String>,
    pub metadata: WarehouseMetadataState,
    pub settings: Option<String>,
}

impl WarehouseState {
    pub fn from_api(warehouse: &Warehouse) -> Result<Self> {
        Ok(Self {
            id: Some(warehouse.id.clone()),
            workspace_id: Some(warehouse.workspace_id.clone()),
            enabled: warehouse.enabled,
            name: warehouse.name.clone(),
            metadata: WarehouseMetadataState::from_api(&warehouse.metadata)?,
            settings: json_string(warehouse.settings.as_ref())?,
        })
    }

    pub fn create_body(&self) -> Result<Value> {
        let mut body = Map::new();
        body.insert("metadataId".into(), json!(self.metadata.id));
        body.insert("enabled".into(), json!(self.enabled));
        if let Some(name) = &self.name {
            body.insert("name".into(), json!(name));
        }
        body.insert(
            "settings".into(),
            parse_json("settings", self.settings.as_deref())?.unwrap_or_else(|| json!({})),
        );
        Ok(Value::Object(body))
    }

    pub fn update_body(&self) -> Result<Value> {
        let mut body = Map::new();
        body.insert("enabled".into(), json!(self.enabled));
        body.insert("name".into(), json!(self.name));
        if let Some(settings) = parse_json("settings", self.settings.as_deref())? {
            body.insert("settings".into(), settings);
        }
        Ok(Value::Object(body))
    }
}

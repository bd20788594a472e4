//! Association state: source↔tracking plan, source↔warehouse

use serde::{Deserialize, Serialize};

/// Written to both ids when the association is confirmed absent, so the
/// next plan replaces the resource instead of failing
pub const NOT_FOUND: &str = "not_found";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceTrackingPlanConnectionState {
    pub source_id: String,
    pub tracking_plan_id: String,
}

impl SourceTrackingPlanConnectionState {
    pub fn not_found() -> Self {
        Self {
            source_id: NOT_FOUND.to_string(),
            tracking_plan_id: NOT_FOUND.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceWarehouseConnectionState {
    pub source_id: String,
    pub warehouse_id: String,
}

impl SourceWarehouseConnectionState {
    pub fn not_found() -> Self {
        Self {
            source_id: NOT_FOUND.to_string(),
            warehouse_id: NOT_FOUND.to_string(),
        }
    }
}

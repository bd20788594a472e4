//! Data sources
//!
//! Read-only lookups. Every data source except the workspace is keyed by
//! an `id` taken from configuration; a missing or empty id is rejected
//! before any request is made.

mod catalog;
mod destination;
mod role;
mod source;
mod tracking_plan;
mod user;
mod warehouse;
mod workspace;

pub use catalog::{
    DestinationMetadataDataSource, SourceMetadataDataSource, WarehouseMetadataDataSource,
};
pub use destination::DestinationDataSource;
pub use role::RoleDataSource;
pub use source::SourceDataSource;
pub use tracking_plan::TrackingPlanDataSource;
pub use user::UserDataSource;
pub use warehouse::WarehouseDataSource;
pub use workspace::WorkspaceDataSource;

use serde::Deserialize;

use crate::framework::{Attribute, AttributeType, DiagResult, Mode};
use crate::resources::require_id;

/// Configuration of every id-keyed data source
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IdConfig {
    pub id: Option<String>,
}

impl IdConfig {
    pub fn id(&self) -> DiagResult<&str> {
        require_id(self.id.as_deref(), "id")
    }
}

/// The lookup key every id-keyed data source declares
fn id_attribute(description: &'static str) -> Attribute {
    Attribute::required("id", AttributeType::String).describe(description)
}

/// Turn resource-style attributes into read-only ones
fn computed(attributes: Vec<Attribute>) -> Vec<Attribute> {
    attributes
        .into_iter()
        .map(|mut attribute| {
            attribute.mode = Mode::Computed;
            attribute.requires_replace = false;
            attribute
        })
        .collect()
}

//! `segment_warehouse` data source

use std::sync::Arc;

use super::{id_attribute, IdConfig};
use crate::framework::{Attribute, AttributeType, DataSource, DiagResult, Diagnostic, Schema};
use crate::schemas::warehouse_metadata_attributes;
use crate::segment::SegmentClient;
use crate::state::WarehouseState;

pub struct WarehouseDataSource {
    client: Arc<SegmentClient>,
}

impl WarehouseDataSource {
    pub fn new(client: Arc<SegmentClient>) -> Self {
        Self { client }
    }
}

impl DataSource for WarehouseDataSource {
    type Config = IdConfig;
    type State = WarehouseState;

    fn type_name(&self) -> &'static str {
        "segment_warehouse"
    }

    fn schema(&self) -> Schema {
        Schema::new(
            "A Warehouse in the workspace.",
            vec![
                id_attribute("The id of the Warehouse."),
                Attribute::computed("workspace_id", AttributeType::String)
                    .describe("The id of the Workspace that owns the Warehouse."),
                Attribute::computed("enabled", AttributeType::Bool)
                    .describe("When set to true, this Warehouse receives data."),
                Attribute::computed("name", AttributeType::String)
                    .describe("An optional human-readable name for this Warehouse."),
                Attribute::computed(
                    "metadata",
                    AttributeType::Object(warehouse_metadata_attributes(Attribute::computed(
                        "id",
                        AttributeType::String,
                    ))),
                )
                .describe("The metadata for the Warehouse."),
                Attribute::computed("settings", AttributeType::Json)
                    .describe("The settings associated with this Warehouse, as a JSON object."),
            ],
        )
    }

    async fn read(&self, config: IdConfig) -> DiagResult<WarehouseState> {
        let id = config.id()?;

        let warehouse = self
            .client
            .get_warehouse(id)
            .await
            .map_err(|e| Diagnostic::api("Unable to read Warehouse", &e))?;

        WarehouseState::from_api(&warehouse)
            .map_err(|e| Diagnostic::decode("Unable to map Warehouse", &e))
    }
}

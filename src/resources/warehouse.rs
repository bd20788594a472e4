//! `segment_warehouse` resource

use std::sync::Arc;

use super::{invalid_config, require_id};
use crate::framework::{Attribute, AttributeType, DiagResult, Diagnostic, Resource, Schema};
use crate::schemas::{metadata_id, warehouse_metadata_attributes};
use crate::segment::models::Warehouse;
use crate::segment::SegmentClient;
use crate::state::convert::prefer_planned_json;
use crate::state::WarehouseState;

pub struct WarehouseResource {
    client: Arc<SegmentClient>,
}

impl WarehouseResource {
    pub fn new(client: Arc<SegmentClient>) -> Self {
        Self { client }
    }

    fn to_state(
        warehouse: &Warehouse,
        planned_settings: Option<&str>,
    ) -> DiagResult<WarehouseState> {
        let mut state = WarehouseState::from_api(warehouse)
            .map_err(|e| Diagnostic::decode("Unable to map Warehouse", &e))?;
        state.settings = prefer_planned_json(planned_settings, state.settings);
        Ok(state)
    }
}

impl Resource for WarehouseResource {
    type State = WarehouseState;

    fn type_name(&self) -> &'static str {
        "segment_warehouse"
    }

    fn schema(&self) -> Schema {
        Schema::new(
            "A Warehouse is a central repository of data collected from one or more Sources.",
            vec![
                Attribute::computed("id", AttributeType::String)
                    .describe("The id of the Warehouse."),
                Attribute::computed("workspace_id", AttributeType::String)
                    .describe("The id of the Workspace that owns the Warehouse."),
                Attribute::required("enabled", AttributeType::Bool)
                    .describe("When set to true, this Warehouse receives data."),
                Attribute::optional("name", AttributeType::String)
                    .describe("An optional human-readable name for this Warehouse."),
                Attribute::required(
                    "metadata",
                    AttributeType::Object(warehouse_metadata_attributes(metadata_id(true))),
                )
                .describe("The metadata for the Warehouse."),
                Attribute::required("settings", AttributeType::Json)
                    .describe("The settings associated with this Warehouse, as a JSON object."),
            ],
        )
    }

    async fn create(&self, plan: WarehouseState) -> DiagResult<WarehouseState> {
        let body = plan.create_body().map_err(invalid_config)?;

        let warehouse = self
            .client
            .create_warehouse(&body)
            .await
            .map_err(|e| Diagnostic::api("Unable to create Warehouse", &e))?;
        tracing::info!("Created warehouse {}", warehouse.id);

        Self::to_state(&warehouse, plan.settings.as_deref())
    }

    async fn read(&self, state: WarehouseState) -> DiagResult<Option<WarehouseState>> {
        let id = require_id(state.id.as_deref(), "id")?;

        let warehouse = self
            .client
            .get_warehouse(id)
            .await
            .map_err(|e| Diagnostic::api("Unable to read Warehouse", &e))?;

        Self::to_state(&warehouse, state.settings.as_deref()).map(Some)
    }

    async fn update(
        &self,
        plan: WarehouseState,
        prior: WarehouseState,
    ) -> DiagResult<WarehouseState> {
        let id = require_id(prior.id.as_deref(), "id")?;
        let body = plan.update_body().map_err(invalid_config)?;

        let warehouse = self
            .client
            .update_warehouse(id, &body)
            .await
            .map_err(|e| Diagnostic::api("Unable to update Warehouse", &e))?;
        tracing::info!("Updated warehouse {}", id);

        Self::to_state(&warehouse, plan.settings.as_deref())
    }

    async fn delete(&self, state: WarehouseState) -> DiagResult<()> {
        let id = require_id(state.id.as_deref(), "id")?;

        self.client
            .delete_warehouse(id)
            .await
            .map_err(|e| Diagnostic::api("Unable to delete Warehouse", &e))?;
        tracing::info!("Deleted warehouse {}", id);
        Ok(())
    }
}

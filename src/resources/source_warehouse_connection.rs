//! `segment_source_warehouse_connection` resource

use std::sync::Arc;

use crate::framework::{Attribute, AttributeType, DiagResult, Diagnostic, Resource, Schema};
use crate::segment::models::Warehouse;
use crate::segment::pagination::{find_first, MAX_PAGE_SIZE};
use crate::segment::{is_not_found, SegmentClient};
use crate::state::SourceWarehouseConnectionState;

pub struct SourceWarehouseConnectionResource {
    client: Arc<SegmentClient>,
}

impl SourceWarehouseConnectionResource {
    pub fn new(client: Arc<SegmentClient>) -> Self {
        Self { client }
    }
}

impl Resource for SourceWarehouseConnectionResource {
    type State = SourceWarehouseConnectionState;

    fn type_name(&self) -> &'static str {
        "segment_source_warehouse_connection"
    }

    fn schema(&self) -> Schema {
        Schema::new(
            "Connects a Source to a Warehouse.",
            vec![
                Attribute::required("source_id", AttributeType::String)
                    .requires_replace()
                    .describe("The id of the Source."),
                Attribute::required("warehouse_id", AttributeType::String)
                    .requires_replace()
                    .describe("The id of the Warehouse."),
            ],
        )
    }

    async fn create(
        &self,
        plan: SourceWarehouseConnectionState,
    ) -> DiagResult<SourceWarehouseConnectionState> {
        self.client
            .add_connection_from_source_to_warehouse(&plan.warehouse_id, &plan.source_id)
            .await
            .map_err(|e| Diagnostic::api("Unable to connect Source to Warehouse", &e))?;
        tracing::info!(
            "Connected source {} to warehouse {}",
            plan.source_id,
            plan.warehouse_id
        );

        Ok(plan)
    }

    async fn read(
        &self,
        state: SourceWarehouseConnectionState,
    ) -> DiagResult<Option<SourceWarehouseConnectionState>> {
        let found = find_first(
            MAX_PAGE_SIZE,
            |page| self.client.list_connected_warehouses(&state.source_id, page),
            |warehouse: &Warehouse| warehouse.id == state.warehouse_id,
        )
        .await;

        match found {
            Ok(Some(_)) => Ok(Some(state)),
            Ok(None) => {
                tracing::warn!(
                    "Source {} is not connected to warehouse {}",
                    state.source_id,
                    state.warehouse_id
                );
                Ok(Some(SourceWarehouseConnectionState::not_found()))
            }
            Err(e) if is_not_found(&e) => {
                tracing::warn!(
                    "Source {} no longer exists, removing connection from state",
                    state.source_id
                );
                Ok(None)
            }
            Err(e) => Err(Diagnostic::api("Unable to read connected Warehouses", &e)),
        }
    }

    async fn update(
        &self,
        plan: SourceWarehouseConnectionState,
        _prior: SourceWarehouseConnectionState,
    ) -> DiagResult<SourceWarehouseConnectionState> {
        // Both attributes force replacement
        Ok(plan)
    }

    async fn delete(&self, state: SourceWarehouseConnectionState) -> DiagResult<()> {
        self.client
            .remove_source_connection_from_warehouse(&state.warehouse_id, &state.source_id)
            .await
            .map_err(|e| Diagnostic::api("Unable to disconnect Source from Warehouse", &e))?;
        tracing::info!(
            "Disconnected source {} from warehouse {}",
            state.source_id,
            state.warehouse_id
        );
        Ok(())
    }
}

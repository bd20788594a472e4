//! `segment_source_tracking_plan_connection` resource

use std::sync::Arc;

use crate::framework::{Attribute, AttributeType, DiagResult, Diagnostic, Resource, Schema};
use crate::segment::models::Source;
use crate::segment::pagination::{find_first, MAX_PAGE_SIZE};
use crate::segment::SegmentClient;
use crate::state::SourceTrackingPlanConnectionState;

pub struct SourceTrackingPlanConnectionResource {
    client: Arc<SegmentClient>,
}

impl SourceTrackingPlanConnectionResource {
    pub fn new(client: Arc<SegmentClient>) -> Self {
        Self { client }
    }
}

impl Resource for SourceTrackingPlanConnectionResource {
    type State = SourceTrackingPlanConnectionState;

    fn type_name(&self) -> &'static str {
        "segment_source_tracking_plan_connection"
    }

    fn schema(&self) -> Schema {
        Schema::new(
            "Connects a Source to a Tracking Plan.",
            vec![
                Attribute::required("source_id", AttributeType::String)
                    .requires_replace()
                    .describe("The id of the Source."),
                Attribute::required("tracking_plan_id", AttributeType::String)
                    .requires_replace()
                    .describe("The id of the Tracking Plan."),
            ],
        )
    }

    async fn create(
        &self,
        plan: SourceTrackingPlanConnectionState,
    ) -> DiagResult<SourceTrackingPlanConnectionState> {
        self.client
            .add_source_to_tracking_plan(&plan.tracking_plan_id, &plan.source_id)
            .await
            .map_err(|e| Diagnostic::api("Unable to add Source to Tracking Plan", &e))?;
        tracing::info!(
            "Connected source {} to tracking plan {}",
            plan.source_id,
            plan.tracking_plan_id
        );

        Ok(plan)
    }

    async fn read(
        &self,
        state: SourceTrackingPlanConnectionState,
    ) -> DiagResult<Option<SourceTrackingPlanConnectionState>> {
        let found = find_first(
            MAX_PAGE_SIZE,
            |page| self.client.list_tracking_plan_sources(&state.tracking_plan_id, page),
            |source: &Source| source.id == state.source_id,
        )
        .await
        .map_err(|e| Diagnostic::api("Unable to read Tracking Plan Sources", &e))?;

        match found {
            Some(_) => Ok(Some(state)),
            None => {
                tracing::warn!(
                    "Source {} is not connected to tracking plan {}",
                    state.source_id,
                    state.tracking_plan_id
                );
                Ok(Some(SourceTrackingPlanConnectionState::not_found()))
            }
        }
    }

    async fn update(
        &self,
        plan: SourceTrackingPlanConnectionState,
        _prior: SourceTrackingPlanConnectionState,
    ) -> DiagResult<SourceTrackingPlanConnectionState> {
        // Both attributes force replacement
        Ok(plan)
    }

    async fn delete(&self, state: SourceTrackingPlanConnectionState) -> DiagResult<()> {
        self.client
            .remove_source_from_tracking_plan(&state.tracking_plan_id, &state.source_id)
            .await
            .map_err(|e| Diagnostic::api("Unable to remove Source from Tracking Plan", &e))?;
        tracing::info!(
            "Disconnected source {} from tracking plan {}",
            state.source_id,
            state.tracking_plan_id
        );
        Ok(())
    }
}

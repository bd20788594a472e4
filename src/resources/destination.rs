//! `segment_destination` resource

use std::sync::Arc;

use super::{invalid_config, require_id};
use crate::framework::{Attribute, AttributeType, DiagResult, Diagnostic, Resource, Schema};
use crate::schemas::{destination_metadata_attributes, metadata_id};
use crate::segment::models::Destination;
use crate::segment::SegmentClient;
use crate::state::convert::prefer_planned_json;
use crate::state::DestinationState;

pub struct DestinationResource {
    client: Arc<SegmentClient>,
}

impl DestinationResource {
    pub fn new(client: Arc<SegmentClient>) -> Self {
        Self { client }
    }

    fn to_state(
        destination: &Destination,
        planned_settings: Option<&str>,
    ) -> DiagResult<DestinationState> {
        let mut state = DestinationState::from_api(destination)
            .map_err(|e| Diagnostic::decode("Unable to map Destination", &e))?;
        state.settings = prefer_planned_json(planned_settings, state.settings);
        Ok(state)
    }
}

impl Resource for DestinationResource {
    type State = DestinationState;

    fn type_name(&self) -> &'static str {
        "segment_destination"
    }

    fn schema(&self) -> Schema {
        Schema::new(
            "A Destination receives data from a Source.",
            vec![
                Attribute::computed("id", AttributeType::String)
                    .describe("The unique identifier of this Destination."),
                Attribute::optional("name", AttributeType::String)
                    .describe("The name of this Destination."),
                Attribute::required("enabled", AttributeType::Bool)
                    .describe("Whether this Destination should receive data."),
                Attribute::computed("workspace_id", AttributeType::String)
                    .describe("The unique identifier of the Workspace that owns this Destination."),
                Attribute::required("source_id", AttributeType::String)
                    .requires_replace()
                    .describe("The id of the Source connected to this Destination."),
                Attribute::required(
                    "metadata",
                    AttributeType::Object(destination_metadata_attributes(metadata_id(true))),
                )
                .describe("The metadata of the Destination."),
                Attribute::required("settings", AttributeType::Json)
                    .describe("The settings associated with the Destination, as a JSON object."),
            ],
        )
    }

    async fn create(&self, plan: DestinationState) -> DiagResult<DestinationState> {
        let body = plan.create_body().map_err(invalid_config)?;

        let destination = self
            .client
            .create_destination(&body)
            .await
            .map_err(|e| Diagnostic::api("Unable to create Destination", &e))?;
        tracing::info!(
            "Created destination {} on source {}",
            destination.id,
            destination.source_id
        );

        // The echoed destination already carries every computed attribute
        Self::to_state(&destination, plan.settings.as_deref())
    }

    async fn read(&self, state: DestinationState) -> DiagResult<Option<DestinationState>> {
        let id = require_id(state.id.as_deref(), "id")?;

        // A missing destination is reported, not dropped from state
        let destination = self
            .client
            .get_destination(id)
            .await
            .map_err(|e| Diagnostic::api("Unable to read Destination", &e))?;

        Self::to_state(&destination, state.settings.as_deref()).map(Some)
    }

    async fn update(
        &self,
        plan: DestinationState,
        prior: DestinationState,
    ) -> DiagResult<DestinationState> {
        let id = require_id(prior.id.as_deref(), "id")?;
        let body = plan.update_body().map_err(invalid_config)?;

        let destination = self
            .client
            .update_destination(id, &body)
            .await
            .map_err(|e| Diagnostic::api("Unable to update Destination", &e))?;
        tracing::info!("Updated destination {}", id);

        Self::to_state(&destination, plan.settings.as_deref())
    }

    async fn delete(&self, state: DestinationState) -> DiagResult<()> {
        let id = require_id(state.id.as_deref(), "id")?;

        self.client
            .delete_destination(id)
            .await
            .map_err(|e| Diagnostic::api("Unable to delete Destination", &e))?;
        tracing::info!("Deleted destination {}", id);
        Ok(())
    }
}

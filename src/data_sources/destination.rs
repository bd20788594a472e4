//! `segment_destination` data source

use std::sync::Arc;

use super::{id_attribute, IdConfig};
use crate::framework::{Attribute, AttributeType, DataSource, DiagResult, Diagnostic, Schema};
use crate::schemas::destination_metadata_attributes;
use crate::segment::SegmentClient;
use crate::state::DestinationState;

pub struct DestinationDataSource {
    client: Arc<SegmentClient>,
}

impl DestinationDataSource {
    pub fn new(client: Arc<SegmentClient>) -> Self {
        Self { client }
    }
}

impl DataSource for DestinationDataSource {
    type Config = IdConfig;
    type State = DestinationState;

    fn type_name(&self) -> &'static str {
        "segment_destination"
    }

    fn schema(&self) -> Schema {
        Schema::new(
            "A Destination in the workspace.",
            vec![
                id_attribute("The unique identifier of the Destination."),
                Attribute::computed("enabled", AttributeType::Bool)
                    .describe("Whether the Destination is enabled."),
                Attribute::computed("name", AttributeType::String)
                    .describe("The name of the Destination."),
                Attribute::computed("workspace_id", AttributeType::String)
                    .describe("The id of the Workspace that owns this Destination."),
                Attribute::computed("source_id", AttributeType::String)
                    .describe("The id of the Source connected to this instance."),
                Attribute::computed(
                    "metadata",
                    AttributeType::Object(destination_metadata_attributes(Attribute::computed(
                        "id",
                        AttributeType::String,
                    ))),
                )
                .describe("The metadata of the Destination."),
                Attribute::computed("settings", AttributeType::Json)
                    .describe("The settings associated with the Destination, as a JSON object."),
            ],
        )
    }

    async fn read(&self, config: IdConfig) -> DiagResult<DestinationState> {
        let id = config.id()?;

        let destination = self
            .client
            .get_destination(id)
            .await
            .map_err(|e| Diagnostic::api("Unable to read Destination", &e))?;

        DestinationState::from_api(&destination)
            .map_err(|e| Diagnostic::decode("Unable to map Destination", &e))
    }
}

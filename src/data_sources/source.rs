//! `segment_source` data source

use std::sync::Arc;

use super::{computed, id_attribute, IdConfig};
use crate::framework::{Attribute, AttributeType, DataSource, DiagResult, Diagnostic, Schema};
use crate::schemas::{labels_attribute, source_metadata_attributes};
use crate::segment::SegmentClient;
use crate::state::SourceState;

pub struct SourceDataSource {
    client: Arc<SegmentClient>,
}

impl SourceDataSource {
    pub fn new(client: Arc<SegmentClient>) -> Self {
        Self { client }
    }
}

impl DataSource for SourceDataSource {
    type Config = IdConfig;
    type State = SourceState;

    fn type_name(&self) -> &'static str {
        "segment_source"
    }

    fn schema(&self) -> Schema {
        let mut attributes = vec![
            id_attribute("The id of the Source."),
            Attribute::computed("slug", AttributeType::String)
                .describe("The slug used to identify the Source in the Segment app."),
            Attribute::computed("name", AttributeType::String).describe("The name of the Source."),
            Attribute::computed("workspace_id", AttributeType::String)
                .describe("The id of the Workspace that owns the Source."),
            Attribute::computed("enabled", AttributeType::Bool)
                .describe("Enable to receive data from the Source."),
            Attribute::computed("write_keys", AttributeType::list_of(AttributeType::String))
                .describe("The write keys used to send data from the Source."),
            Attribute::computed(
                "metadata",
                AttributeType::Object(source_metadata_attributes(Attribute::computed(
                    "id",
                    AttributeType::String,
                ))),
            )
            .describe("The metadata of the Source."),
            Attribute::computed("settings", AttributeType::Json)
                .describe("The settings associated with the Source, as a JSON object."),
        ];
        attributes.extend(computed(vec![labels_attribute()]));
        Schema::new("A Source in the workspace.", attributes)
    }

    async fn read(&self, config: IdConfig) -> DiagResult<SourceState> {
        let id = config.id()?;

        let source = self
            .client
            .get_source(id)
            .await
            .map_err(|e| Diagnostic::api("Unable to read Source", &e))?;

        SourceState::from_api(&source).map_err(|e| Diagnostic::decode("Unable to map Source", &e))
    }
}

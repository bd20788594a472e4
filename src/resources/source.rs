//! `segment_source` resource

use std::sync::Arc;

use super::{invalid_config, require_id};
use crate::framework::{Attribute, AttributeType, DiagResult, Diagnostic, Resource, Schema};
use crate::schemas::{labels_attribute, metadata_id, source_metadata_attributes};
use crate::segment::models::Source;
use crate::segment::{is_not_found, SegmentClient};
use crate::state::convert::prefer_planned_json;
use crate::state::SourceState;

pub struct SourceResource {
    client: Arc<SegmentClient>,
}

impl SourceResource {
    pub fn new(client: Arc<SegmentClient>) -> Self {
        Self { client }
    }

    fn to_state(source: &Source, planned_settings: Option<&str>) -> DiagResult<SourceState> {
        let mut state = SourceState::from_api(source)
            .map_err(|e| Diagnostic::decode("Unable to map Source", &e))?;
        state.settings = prefer_planned_json(planned_settings, state.settings);
        Ok(state)
    }
}

impl Resource for SourceResource {
    type State = SourceState;

    fn type_name(&self) -> &'static str {
        "segment_source"
    }

    fn schema(&self) -> Schema {
        Schema::new(
            "A Source is a website, server library, mobile SDK, or cloud application which can send data into Segment.",
            vec![
                Attribute::computed("id", AttributeType::String)
                    .describe("The unique identifier of this Source."),
                Attribute::required("slug", AttributeType::String)
                    .describe("The slug used to identify the Source in the Segment app."),
                Attribute::optional("name", AttributeType::String)
                    .describe("The name of the Source."),
                Attribute::computed("workspace_id", AttributeType::String)
                    .describe("The id of the Workspace that owns the Source."),
                Attribute::required("enabled", AttributeType::Bool)
                    .describe("Enable to receive data from the Source."),
                Attribute::computed("write_keys", AttributeType::list_of(AttributeType::String))
                    .describe("The write keys used to send data from the Source."),
                Attribute::required(
                    "metadata",
                    AttributeType::Object(source_metadata_attributes(metadata_id(true))),
                )
                .describe("The metadata of the Source."),
                Attribute::optional_computed("settings", AttributeType::Json)
                    .describe("The settings associated with the Source, as a JSON object."),
                labels_attribute(),
            ],
        )
    }

    async fn create(&self, plan: SourceState) -> DiagResult<SourceState> {
        let body = plan.create_body().map_err(invalid_config)?;

        let created = self
            .client
            .create_source(&body)
            .await
            .map_err(|e| Diagnostic::api("Unable to create Source", &e))?;
        tracing::info!("Created source {} ({})", created.id, created.slug);

        let labels = plan.api_labels();
        let source = if labels.is_empty() {
            created
        } else {
            self.client
                .replace_source_labels(&created.id, &labels)
                .await
                .map_err(|e| Diagnostic::api("Unable to add labels to Source", &e))?;
            self.client
                .get_source(&created.id)
                .await
                .map_err(|e| Diagnostic::api("Unable to read Source", &e))?
        };

        Self::to_state(&source, plan.settings.as_deref())
    }

    async fn read(&self, state: SourceState) -> DiagResult<Option<SourceState>> {
        let id = require_id(state.id.as_deref(), "id")?;

        match self.client.get_source(id).await {
            Ok(source) => Self::to_state(&source, state.settings.as_deref()).map(Some),
            Err(e) if is_not_found(&e) => {
                tracing::warn!("Source {} no longer exists, removing from state", id);
                Ok(None)
            }
            Err(e) => Err(Diagnostic::api("Unable to read Source", &e)),
        }
    }

    async fn update(&self, plan: SourceState, prior: SourceState) -> DiagResult<SourceState> {
        let id = require_id(prior.id.as_deref(), "id")?;
        let body = plan.update_body().map_err(invalid_config)?;

        let mut source = self
            .client
            .update_source(id, &body)
            .await
            .map_err(|e| Diagnostic::api("Unable to update Source", &e))?;
        tracing::info!("Updated source {}", id);

        if plan.labels.is_some() && plan.api_labels() != prior.api_labels() {
            self.client
                .replace_source_labels(id, &plan.api_labels())
                .await
                .map_err(|e| Diagnostic::api("Unable to update Source labels", &e))?;
            source = self
                .client
                .get_source(id)
                .await
                .map_err(|e| Diagnostic::api("Unable to read Source", &e))?;
        }

        Self::to_state(&source, plan.settings.as_deref())
    }

    async fn delete(&self, state: SourceState) -> DiagResult<()> {
        let id = require_id(state.id.as_deref(), "id")?;

        self.client
            .delete_source(id)
            .await
            .map_err(|e| Diagnostic::api("Unable to delete Source", &e))?;
        tracing::info!("Deleted source {}", id);
        Ok(())
    }
}

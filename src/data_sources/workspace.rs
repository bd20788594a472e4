//! `segment_workspace` data source

use std::sync::Arc;

use serde::Deserialize;

use crate::framework::{Attribute, AttributeType, DataSource, DiagResult, Diagnostic, Schema};
use crate::segment::SegmentClient;
use crate::state::WorkspaceState;

/// The workspace is implied by the token; nothing to configure
#[derive(Debug, Default, Deserialize)]
pub struct WorkspaceConfig {}

pub struct WorkspaceDataSource {
    client: Arc<SegmentClient>,
}

impl WorkspaceDataSource {
    pub fn new(client: Arc<SegmentClient>) -> Self {
        Self { client }
    }
}

impl DataSource for WorkspaceDataSource {
    type Config = WorkspaceConfig;
    type State = WorkspaceState;

    fn type_name(&self) -> &'static str {
        "segment_workspace"
    }

    fn schema(&self) -> Schema {
        Schema::new(
            "The Workspace the API token belongs to.",
            vec![
                Attribute::computed("id", AttributeType::String).describe("The Workspace's id."),
                Attribute::computed("name", AttributeType::String)
                    .describe("The Workspace's name."),
                Attribute::computed("slug", AttributeType::String)
                    .describe("The Workspace's slug."),
            ],
        )
    }

    async fn read(&self, _config: WorkspaceConfig) -> DiagResult<WorkspaceState> {
        let workspace = self
            .client
            .get_workspace()
            .await
            .map_err(|e| Diagnostic::api("Unable to read Workspace", &e))?;
        Ok(WorkspaceState::from(&workspace))
    }
}

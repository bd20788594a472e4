//! Catalog data sources: `segment_source_metadata`,
//! `segment_destination_metadata`, `segment_warehouse_metadata`

use std::sync::Arc;

use super::{id_attribute, IdConfig};
use crate::framework::{DataSource, DiagResult, Diagnostic, Schema};
use crate::schemas::{
    destination_metadata_attributes, source_metadata_attributes, warehouse_metadata_attributes,
};
use crate::segment::SegmentClient;
use crate::state::{DestinationMetadataState, SourceMetadataState, WarehouseMetadataState};

pub struct SourceMetadataDataSource {
    client: Arc<SegmentClient>,
}

impl SourceMetadataDataSource {
    pub fn new(client: Arc<SegmentClient>) -> Self {
        Self { client }
    }
}

impl DataSource for SourceMetadataDataSource {
    type Config = IdConfig;
    type State = SourceMetadataState;

    fn type_name(&self) -> &'static str {
        "segment_source_metadata"
    }

    fn schema(&self) -> Schema {
        Schema::new(
            "A Source entry in the Segment catalog.",
            source_metadata_attributes(id_attribute("The id of the Source metadata.")),
        )
    }

    async fn read(&self, config: IdConfig) -> DiagResult<SourceMetadataState> {
        let id = config.id()?;

        let metadata = self
            .client
            .get_source_metadata(id)
            .await
            .map_err(|e| Diagnostic::api("Unable to read Source metadata", &e))?;

        SourceMetadataState::from_api(&metadata)
            .map_err(|e| Diagnostic::decode("Unable to map Source metadata", &e))
    }
}

pub struct DestinationMetadataDataSource {
    client: Arc<SegmentClient>,
}

impl DestinationMetadataDataSource {
    pub fn new(client: Arc<SegmentClient>) -> Self {
        Self { client }
    }
}

impl DataSource for DestinationMetadataDataSource {
    type Config = IdConfig;
    type State = DestinationMetadataState;

    fn type_name(&self) -> &'static str {
        "segment_destination_metadata"
    }

    fn schema(&self) -> Schema {
        Schema::new(
            "A Destination entry in the Segment catalog.",
            destination_metadata_attributes(id_attribute("The id of the Destination metadata.")),
        )
    }

    async fn read(&self, config: IdConfig) -> DiagResult<DestinationMetadataState> {
        let id = config.id()?;

        let metadata = self
            .client
            .get_destination_metadata(id)
            .await
            .map_err(|e| Diagnostic::api("Unable to read Destination metadata", &e))?;

        DestinationMetadataState::from_api(&metadata)
            .map_err(|e| Diagnostic::decode("Unable to map Destination metadata", &e))
    }
}

pub struct WarehouseMetadataDataSource {
    client: Arc<SegmentClient>,
}

impl WarehouseMetadataDataSource {
    pub fn new(client: Arc<SegmentClient>) -> Self {
        Self { client }
    }
}

impl DataSource for WarehouseMetadataDataSource {
    type Config = IdConfig;
    type State = WarehouseMetadataState;

    fn type_name(&self) -> &'static str {
        "segment_warehouse_metadata"
    }

    fn schema(&self) -> Schema {
        Schema::new(
            "A Warehouse entry in the Segment catalog.",
            warehouse_metadata_attributes(id_attribute("The id of the Warehouse metadata.")),
        )
    }

    async fn read(&self, config: IdConfig) -> DiagResult<WarehouseMetadataState> {
        let id = config.id()?;

        let metadata = self
            .client
            .get_warehouse_metadata(id)
            .await
            .map_err(|e| Diagnostic::api("Unable to read Warehouse metadata", &e))?;

        WarehouseMetadataState::from_api(&metadata)
            .map_err(|e| Diagnostic::decode("Unable to map Warehouse metadata", &e))
    }
}

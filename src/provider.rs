//! Provider
//!
//! Owns the shared API client and the registries of resource and data
//! source types the plugin serves.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::ProviderConfig;
use crate::data_sources::{
    DestinationDataSource, DestinationMetadataDataSource, RoleDataSource, SourceDataSource,
    SourceMetadataDataSource, TrackingPlanDataSource, UserDataSource, WarehouseDataSource,
    WarehouseMetadataDataSource, WorkspaceDataSource,
};
use crate::framework::{
    Attribute, AttributeType, DiagResult, Diagnostic, DynamicDataSource, DynamicResource, Schema,
};
use crate::resources::{
    DestinationResource, LabelResource, SourceResource, SourceTrackingPlanConnectionResource,
    SourceWarehouseConnectionResource, TrackingPlanResource, UserResource, WarehouseResource,
};
use crate::segment::SegmentClient;

pub type ResourceRegistry = BTreeMap<&'static str, Box<dyn DynamicResource>>;
pub type DataSourceRegistry = BTreeMap<&'static str, Box<dyn DynamicDataSource>>;

pub struct SegmentProvider {
    client: Arc<SegmentClient>,
}

impl SegmentProvider {
    pub fn new(client: Arc<SegmentClient>) -> Self {
        Self { client }
    }

    /// Validate the configuration and build the client. Fails before any
    /// request when the token is missing or the URL is malformed.
    pub fn from_config(config: &ProviderConfig) -> DiagResult<Self> {
        config
            .validate()
            .map_err(|e| Diagnostic::config(format!("{:#}", e)))?;

        let client = SegmentClient::new(config)
            .map_err(|e| Diagnostic::error("Unable to create Segment client", format!("{:#}", e)))?;
        tracing::debug!("Configured Segment client for {}", config.effective_url());

        Ok(Self::new(Arc::new(client)))
    }

    /// Provider block schema
    pub fn schema() -> Schema {
        Schema::new(
            "Manage Segment workspaces through the Segment Public API.",
            vec![
                Attribute::optional("url", AttributeType::String)
                    .describe("The Public API url. Defaults to https://api.segmentapis.com, or SEGMENT_PUBLIC_API_URL when set."),
                Attribute::optional("token", AttributeType::String)
                    .sensitive()
                    .describe("The Public API token. Defaults to the SEGMENT_PUBLIC_API_TOKEN environment variable."),
            ],
        )
    }

    pub fn resources(&self) -> ResourceRegistry {
        let client = &self.client;
        let resources: Vec<Box<dyn DynamicResource>> = vec![
            Box::new(SourceResource::new(Arc::clone(client))),
            Box::new(DestinationResource::new(Arc::clone(client))),
            Box::new(WarehouseResource::new(Arc::clone(client))),
            Box::new(TrackingPlanResource::new(Arc::clone(client))),
            Box::new(LabelResource::new(Arc::clone(client))),
            Box::new(UserResource::new(Arc::clone(client))),
            Box::new(SourceTrackingPlanConnectionResource::new(Arc::clone(client))),
            Box::new(SourceWarehouseConnectionResource::new(Arc::clone(client))),
        ];

        resources.into_iter().map(|r| (r.type_name(), r)).collect()
    }

    pub fn data_sources(&self) -> DataSourceRegistry {
        let client = &self.client;
        let data_sources: Vec<Box<dyn DynamicDataSource>> = vec![
            Box::new(WorkspaceDataSource::new(Arc::clone(client))),
            Box::new(SourceDataSource::new(Arc::clone(client))),
            Box::new(DestinationDataSource::new(Arc::clone(client))),
            Box::new(WarehouseDataSource::new(Arc::clone(client))),
            Box::new(TrackingPlanDataSource::new(Arc::clone(client))),
            Box::new(SourceMetadataDataSource::new(Arc::clone(client))),
            Box::new(DestinationMetadataDataSource::new(Arc::clone(client))),
            Box::new(WarehouseMetadataDataSource::new(Arc::clone(client))),
            Box::new(RoleDataSource::new(Arc::clone(client))),
            Box::new(UserDataSource::new(Arc::clone(client))),
        ];

        data_sources.into_iter().map(|d| (d.type_name(), d)).collect()
    }
}

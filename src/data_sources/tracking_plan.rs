//! `segment_tracking_plan` data source
//!
//! Always includes every rule; the rule listing is walked to the end.

use std::sync::Arc;

use super::{computed, id_attribute, IdConfig};
use crate::framework::{Attribute, AttributeType, DataSource, DiagResult, Diagnostic, Schema};
use crate::schemas::rule_attributes;
use crate::segment::SegmentClient;
use crate::state::TrackingPlanState;

pub struct TrackingPlanDataSource {
    client: Arc<SegmentClient>,
}

impl TrackingPlanDataSource {
    pub fn new(client: Arc<SegmentClient>) -> Self {
        Self { client }
    }
}

impl DataSource for TrackingPlanDataSource {
    type Config = IdConfig;
    type State = TrackingPlanState;

    fn type_name(&self) -> &'static str {
        "segment_tracking_plan"
    }

    fn schema(&self) -> Schema {
        let mut attributes = vec![id_attribute("The Tracking Plan's identifier.")];
        attributes.extend(computed(vec![
            Attribute::required("name", AttributeType::String)
                .describe("The Tracking Plan's name."),
            Attribute::required("slug", AttributeType::String)
                .describe("URL-friendly slug of this Tracking Plan."),
            Attribute::optional("description", AttributeType::String)
                .describe("The Tracking Plan's description."),
            Attribute::required("type", AttributeType::String)
                .describe("The Tracking Plan's type."),
            Attribute::required("created_at", AttributeType::String)
                .describe("The timestamp of this Tracking Plan's creation."),
            Attribute::required("updated_at", AttributeType::String)
                .describe("The timestamp of the last change to the Tracking Plan."),
            Attribute::optional(
                "rules",
                AttributeType::set_of(AttributeType::Object(rule_attributes())),
            )
            .describe("The list of Tracking Plan rules."),
        ]));
        Schema::new("A Tracking Plan together with all of its rules.", attributes)
    }

    async fn read(&self, config: IdConfig) -> DiagResult<TrackingPlanState> {
        let id = config.id()?;

        let plan = self
            .client
            .get_tracking_plan(id)
            .await
            .map_err(|e| Diagnostic::api("Unable to read Tracking Plan", &e))?;

        let rules = self
            .client
            .list_all_rules(id)
            .await
            .map_err(|e| Diagnostic::api("Unable to read Tracking Plan rules", &e))?;
        tracing::debug!("Read {} rules for tracking plan {}", rules.len(), id);

        TrackingPlanState::from_api(&plan, Some(rules.as_slice()))
            .map_err(|e| Diagnostic::decode("Unable to map Tracking Plan", &e))
    }
}

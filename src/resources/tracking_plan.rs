//! `segment_tracking_plan` resource
//!
//! Rules are managed as a whole: any change to the rule set replaces every
//! rule in the plan.

use std::sync::Arc;

use super::{invalid_config, require_id};
use crate::framework::{Attribute, AttributeType, DiagResult, Diagnostic, Resource, Schema};
use crate::schemas::rule_attributes;
use crate::segment::models::TrackingPlan;
use crate::segment::{is_not_found, SegmentClient};
use crate::state::tracking_plan::same_rules;
use crate::state::TrackingPlanState;

pub struct TrackingPlanResource {
    client: Arc<SegmentClient>,
}

impl TrackingPlanResource {
    pub fn new(client: Arc<SegmentClient>) -> Self {
        Self { client }
    }

    /// Map the plan, fetching rules only when they are managed
    async fn to_state(
        &self,
        plan: &TrackingPlan,
        with_rules: bool,
    ) -> DiagResult<TrackingPlanState> {
        let rules = if with_rules {
            Some(
                self.client
                    .list_all_rules(&plan.id)
                    .await
                    .map_err(|e| Diagnostic::api("Unable to read Tracking Plan rules", &e))?,
            )
        } else {
            None
        };

        TrackingPlanState::from_api(plan, rules.as_deref())
            .map_err(|e| Diagnostic::decode("Unable to map Tracking Plan", &e))
    }

    async fn replace_rules(&self, id: &str, plan: &TrackingPlanState) -> DiagResult<()> {
        let rules = plan.rule_inputs().map_err(invalid_config)?;
        self.client
            .replace_rules(id, &rules)
            .await
            .map_err(|e| Diagnostic::api("Unable to replace Tracking Plan rules", &e))?;
        tracing::info!("Replaced {} rules in tracking plan {}", rules.len(), id);
        Ok(())
    }
}

impl Resource for TrackingPlanResource {
    type State = TrackingPlanState;

    fn type_name(&self) -> &'static str {
        "segment_tracking_plan"
    }

    fn schema(&self) -> Schema {
        Schema::new(
            "A Tracking Plan describes the events and properties that are expected from a Source.",
            vec![
                Attribute::computed("id", AttributeType::String)
                    .describe("The Tracking Plan's identifier."),
                Attribute::required("name", AttributeType::String)
                    .describe("The Tracking Plan's name."),
                Attribute::computed("slug", AttributeType::String)
                    .describe("URL-friendly slug of this Tracking Plan."),
                Attribute::optional("description", AttributeType::String)
                    .describe("The Tracking Plan's description."),
                Attribute::required("type", AttributeType::String)
                    .requires_replace()
                    .describe("The Tracking Plan's type."),
                Attribute::computed("created_at", AttributeType::String)
                    .describe("The timestamp of this Tracking Plan's creation."),
                Attribute::computed("updated_at", AttributeType::String)
                    .describe("The timestamp of the last change to the Tracking Plan."),
                Attribute::optional(
                    "rules",
                    AttributeType::set_of(AttributeType::Object(rule_attributes())),
                )
                .describe("The list of Tracking Plan rules."),
            ],
        )
    }

    async fn create(&self, plan: TrackingPlanState) -> DiagResult<TrackingPlanState> {
        let created = self
            .client
            .create_tracking_plan(&plan.create_body())
            .await
            .map_err(|e| Diagnostic::api("Unable to create Tracking Plan", &e))?;
        tracing::info!("Created tracking plan {}", created.id);

        let manage_rules = plan.rules.is_some();
        if plan.rules.as_ref().is_some_and(|rules| !rules.is_empty()) {
            self.replace_rules(&created.id, &plan).await?;
        }

        self.to_state(&created, manage_rules).await
    }

    async fn read(&self, state: TrackingPlanState) -> DiagResult<Option<TrackingPlanState>> {
        let id = require_id(state.id.as_deref(), "id")?;

        let plan = match self.client.get_tracking_plan(id).await {
            Ok(plan) => plan,
            Err(e) if is_not_found(&e) => {
                tracing::warn!("Tracking plan {} no longer exists, removing from state", id);
                return Ok(None);
            }
            Err(e) => return Err(Diagnostic::api("Unable to read Tracking Plan", &e)),
        };

        self.to_state(&plan, state.rules.is_some()).await.map(Some)
    }

    async fn update(
        &self,
        plan: TrackingPlanState,
        prior: TrackingPlanState,
    ) -> DiagResult<TrackingPlanState> {
        let id = require_id(prior.id.as_deref(), "id")?;

        let updated = self
            .client
            .update_tracking_plan(id, &plan.update_body())
            .await
            .map_err(|e| Diagnostic::api("Unable to update Tracking Plan", &e))?;
        tracing::info!("Updated tracking plan {}", id);

        let planned = plan.rules.as_deref().unwrap_or_default();
        let current = prior.rules.as_deref().unwrap_or_default();
        if plan.rules.is_some() && !same_rules(planned, current) {
            self.replace_rules(id, &plan).await?;
        }

        self.to_state(&updated, plan.rules.is_some()).await
    }

    async fn delete(&self, state: TrackingPlanState) -> DiagResult<()> {
        let id = require_id(state.id.as_deref(), "id")?;

        self.client
            .delete_tracking_plan(id)
            .await
            .map_err(|e| Diagnostic::api("Unable to delete Tracking Plan", &e))?;
        tracing::info!("Deleted tracking plan {}", id);
        Ok(())
    }
}

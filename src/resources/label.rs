//! `segment_label` resource
//!
//! Labels have no identifier of their own; `key` and `value` together
//! identify one, and changing any attribute replaces it.

use std::sync::Arc;

use crate::framework::schema::label_attributes;
use crate::framework::{DiagResult, Diagnostic, Resource, Schema};
use crate::segment::models::Label;
use crate::segment::SegmentClient;
use crate::state::LabelState;

pub struct LabelResource {
    client: Arc<SegmentClient>,
}

impl LabelResource {
    pub fn new(client: Arc<SegmentClient>) -> Self {
        Self { client }
    }
}

impl Resource for LabelResource {
    type State = LabelState;

    fn type_name(&self) -> &'static str {
        "segment_label"
    }

    fn schema(&self) -> Schema {
        let attributes = label_attributes()
            .into_iter()
            .map(|attribute| attribute.requires_replace())
            .collect();
        Schema::new(
            "A label is a key/value pair used to tag and scope access to resources.",
            attributes,
        )
    }

    async fn create(&self, plan: LabelState) -> DiagResult<LabelState> {
        let label = self
            .client
            .create_label(&Label::from(&plan))
            .await
            .map_err(|e| Diagnostic::api("Unable to create Label", &e))?;
        tracing::info!("Created label {}:{}", label.key, label.value);

        Ok(LabelState::from(&label))
    }

    async fn read(&self, state: LabelState) -> DiagResult<Option<LabelState>> {
        let labels = self
            .client
            .list_labels()
            .await
            .map_err(|e| Diagnostic::api("Unable to read Labels", &e))?;

        let found = labels
            .iter()
            .find(|label| label.key == state.key && label.value == state.value);

        match found {
            Some(label) => Ok(Some(LabelState::from(label))),
            None => {
                tracing::warn!(
                    "Label {}:{} no longer exists, removing from state",
                    state.key,
                    state.value
                );
                Ok(None)
            }
        }
    }

    async fn update(&self, plan: LabelState, _prior: LabelState) -> DiagResult<LabelState> {
        // Every attribute requires replacement
        Ok(plan)
    }

    async fn delete(&self, state: LabelState) -> DiagResult<()> {
        self.client
            .delete_label(&state.key, &state.value)
            .await
            .map_err(|e| Diagnostic::api("Unable to delete Label", &e))?;
        tracing::info!("Deleted label {}:{}", state.key, state.value);
        Ok(())
    }
}

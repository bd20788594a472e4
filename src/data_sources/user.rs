//! `segment_user` data source

use std::sync::Arc;

use super::{id_attribute, IdConfig};
use crate::framework::{Attribute, AttributeType, DataSource, DiagResult, Diagnostic, Schema};
use crate::schemas::permission_attributes;
use crate::segment::SegmentClient;
use crate::state::UserState;

pub struct UserDataSource {
    client: Arc<SegmentClient>,
}

impl UserDataSource {
    pub fn new(client: Arc<SegmentClient>) -> Self {
        Self { client }
    }
}

impl DataSource for UserDataSource {
    type Config = IdConfig;
    type State = UserState;

    fn type_name(&self) -> &'static str {
        "segment_user"
    }

    fn schema(&self) -> Schema {
        Schema::new(
            "A workspace member.",
            vec![
                id_attribute("The unique identifier of this user."),
                Attribute::computed("email", AttributeType::String)
                    .describe("The email of this user."),
                Attribute::computed("name", AttributeType::String)
                    .describe("The human-readable name of this user."),
                Attribute::computed(
                    "permissions",
                    AttributeType::set_of(AttributeType::Object(permission_attributes())),
                )
                .describe("The permissions associated with this user."),
            ],
        )
    }

    async fn read(&self, config: IdConfig) -> DiagResult<UserState> {
        let id = config.id()?;

        let user = self
            .client
            .get_user(id)
            .await
            .map_err(|e| Diagnostic::api("Unable to read User", &e))?;

        Ok(UserState::from_api(&user))
    }
}

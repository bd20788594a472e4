//! `segment_role` data source
//!
//! There is no endpoint for a single role, so the role list is searched
//! page by page and the walk stops at the first match.

use std::sync::Arc;

use super::{id_attribute, IdConfig};
use crate::framework::{Attribute, AttributeType, DataSource, DiagResult, Diagnostic, Schema};
use crate::segment::models::Role;
use crate::segment::pagination::{find_first, MAX_PAGE_SIZE};
use crate::segment::SegmentClient;
use crate::state::RoleState;

pub struct RoleDataSource {
    client: Arc<SegmentClient>,
}

impl RoleDataSource {
    pub fn new(client: Arc<SegmentClient>) -> Self {
        Self { client }
    }
}

impl DataSource for RoleDataSource {
    type Config = IdConfig;
    type State = RoleState;

    fn type_name(&self) -> &'static str {
        "segment_role"
    }

    fn schema(&self) -> Schema {
        Schema::new(
            "A workspace role.",
            vec![
                id_attribute("The id of the role."),
                Attribute::computed("name", AttributeType::String)
                    .describe("The name of the role."),
                Attribute::computed("description", AttributeType::String)
                    .describe("The description of the role."),
            ],
        )
    }

    async fn read(&self, config: IdConfig) -> DiagResult<RoleState> {
        let id = config.id()?;

        let role = find_first(
            MAX_PAGE_SIZE,
            |page| self.client.list_roles(page),
            |role: &Role| role.id == id,
        )
        .await
        .map_err(|e| Diagnostic::api("Unable to read Roles", &e))?;

        match role {
            Some(role) => Ok(RoleState::from(&role)),
            None => Err(Diagnostic::not_found("Role", id)),
        }
    }
}

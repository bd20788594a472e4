//! `segment_user` resource
//!
//! Creating a user sends an invite. Until the invite is accepted the user
//! has no id and only the pending invite (keyed by email) exists.

use std::sync::Arc;

use crate::framework::{Attribute, AttributeType, DiagResult, Diagnostic, Resource, Schema};
use crate::schemas::permission_attributes;
use crate::segment::models::User;
use crate::segment::pagination::{find_first, MAX_PAGE_SIZE};
use crate::segment::SegmentClient;
use crate::state::convert::non_empty;
use crate::state::UserState;

pub struct UserResource {
    client: Arc<SegmentClient>,
}

impl UserResource {
    pub fn new(client: Arc<SegmentClient>) -> Self {
        Self { client }
    }

    async fn find_user(&self, email: &str) -> DiagResult<Option<User>> {
        find_first(
            MAX_PAGE_SIZE,
            |page| self.client.list_users(page),
            |user: &User| user.email.eq_ignore_ascii_case(email),
        )
        .await
        .map_err(|e| Diagnostic::api("Unable to list Users", &e))
    }

    async fn has_pending_invite(&self, email: &str) -> DiagResult<bool> {
        let invite = find_first(
            MAX_PAGE_SIZE,
            |page| self.client.list_invites(page),
            |invite: &String| invite.eq_ignore_ascii_case(email),
        )
        .await
        .map_err(|e| Diagnostic::api("Unable to list Invites", &e))?;
        Ok(invite.is_some())
    }
}

impl Resource for UserResource {
    type State = UserState;

    fn type_name(&self) -> &'static str {
        "segment_user"
    }

    fn schema(&self) -> Schema {
        Schema::new(
            "A workspace member. Creating one invites the email address.",
            vec![
                Attribute::computed("id", AttributeType::String)
                    .describe("The unique identifier of this user, null while the invite is pending."),
                Attribute::required("email", AttributeType::String)
                    .requires_replace()
                    .describe("The email of this user."),
                Attribute::computed("name", AttributeType::String)
                    .describe("The human-readable name of this user."),
                Attribute::required(
                    "permissions",
                    AttributeType::set_of(AttributeType::Object(permission_attributes())),
                )
                .describe("The permissions associated with this user."),
            ],
        )
    }

    async fn create(&self, plan: UserState) -> DiagResult<UserState> {
        self.client
            .create_invite(&plan.email, &plan.permission_inputs())
            .await
            .map_err(|e| Diagnostic::api("Unable to invite User", &e))?;
        tracing::info!("Invited {}", plan.email);

        Ok(UserState {
            id: None,
            name: None,
            ..plan
        })
    }

    async fn read(&self, state: UserState) -> DiagResult<Option<UserState>> {
        if let Some(user) = self.find_user(&state.email).await? {
            return Ok(Some(UserState::from_api(&user)));
        }

        if self.has_pending_invite(&state.email).await? {
            // Permissions of a pending invite are not readable; keep ours
            return Ok(Some(UserState { id: None, name: None, ..state }));
        }

        tracing::warn!("No user or invite for {}, removing from state", state.email);
        Ok(None)
    }

    async fn update(&self, plan: UserState, prior: UserState) -> DiagResult<UserState> {
        let permissions = plan.permission_inputs();

        match non_empty(prior.id.as_deref()) {
            Some(id) => {
                self.client
                    .replace_user_permissions(id, &permissions)
                    .await
                    .map_err(|e| Diagnostic::api("Unable to update User permissions", &e))?;
                tracing::info!("Updated permissions of user {}", id);

                let user = self
                    .client
                    .get_user(id)
                    .await
                    .map_err(|e| Diagnostic::api("Unable to read User", &e))?;
                Ok(UserState::from_api(&user))
            }
            None => {
                // A pending invite can only be changed by re-inviting
                self.client
                    .delete_invite(&prior.email)
                    .await
                    .map_err(|e| Diagnostic::api("Unable to delete Invite", &e))?;
                self.client
                    .create_invite(&plan.email, &permissions)
                    .await
                    .map_err(|e| Diagnostic::api("Unable to invite User", &e))?;
                tracing::info!("Re-invited {}", plan.email);
                Ok(UserState { id: None, name: None, ..plan })
            }
        }
    }

    async fn delete(&self, state: UserState) -> DiagResult<()> {
        match non_empty(state.id.as_deref()) {
            Some(id) => self
                .client
                .delete_user(id)
                .await
                .map_err(|e| Diagnostic::api("Unable to delete User", &e))?,
            None => self
                .client
                .delete_invite(&state.email)
                .await
                .map_err(|e| Diagnostic::api("Unable to delete Invite", &e))?,
        }
        tracing::info!("Removed {}", state.email);
        Ok(())
    }
}

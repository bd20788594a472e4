//! Workspace, role and user state

use serde::{Deserialize, Serialize};

use super::common::LabelState;
use super::convert::{list, optional_list};
use crate::segment::models::{
    Label, Permission, PermissionInput, PermissionResource, Role, User, Workspace,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceState {
    pub id: String,
    pub name: String,
    pub slug: String,
}

impl From<&Workspace> for WorkspaceState {
    fn from(workspace: &Workspace) -> Self {
        Self {
            id: workspace.id.clone(),
            name: workspace.name.clone(),
            slug: workspace.slug.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleState {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl From<&Role> for RoleState {
    fn from(role: &Role) -> Self {
        Self {
            id: role.id.clone(),
            name: Some(role.name.clone()),
            description: role.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissionResourceState {
    pub id: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub labels: Option<Vec<LabelState>>,
}

impl From<&PermissionResource> for PermissionResourceState {
    fn from(resource: &PermissionResource) -> Self {
        Self {
            id: resource.id.clone(),
            resource_type: resource.resource_type.clone(),
            labels: list(&resource.labels, LabelState::from),
        }
    }
}

impl From<&PermissionResourceState> for PermissionResource {
    fn from(resource: &PermissionResourceState) -> Self {
        Self {
            id: resource.id.clone(),
            resource_type: resource.resource_type.clone(),
            labels: resource.labels.iter().flatten().map(Label::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissionState {
    pub role_id: String,
    pub role_name: Option<String>,
    pub resources: Option<Vec<PermissionResourceState>>,
}

impl From<&Permission> for PermissionState {
    fn from(permission: &Permission) -> Self {
        Self {
            role_id: permission.role_id.clone(),
            role_name: permission.role_name.clone(),
            resources: list(&permission.resources, PermissionResourceState::from),
        }
    }
}

impl From<&PermissionState> for PermissionInput {
    fn from(permission: &PermissionState) -> Self {
        Self {
            role_id: permission.role_id.clone(),
            resources: permission
                .resources
                .iter()
                .flatten()
                .map(PermissionResource::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserState {
    /// Null while the invite is pending
    pub id: Option<String>,
    pub email: String,
    pub name: Option<String>,
    pub permissions: Option<Vec<PermissionState>>,
}

impl UserState {
    pub fn from_api(user: &User) -> Self {
        Self {
            id: Some(user.id.clone()),
            email: user.email.clone(),
            name: user.name.clone(),
            permissions: optional_list(Some(&user.permissions), PermissionState::from),
        }
    }

    pub fn permission_inputs(&self) -> Vec<PermissionInput> {
        self.permissions
            .iter()
            .flatten()
            .map(PermissionInput::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_permissions_map_nested_labels() {
        let user: User = serde_json::from_value(json!({
            "id": "usr1",
            "email": "jane@example.com",
            "permissions": [{
                "roleId": "role1",
                "roleName": "Workspace Owner",
                "resources": [{
                    "id": "ws1",
                    "type": "WORKSPACE",
                    "labels": [{ "key": "env", "value": "prod" }]
                }]
            }]
        }))
        .unwrap();

        let state = UserState::from_api(&user);
        assert_eq!(state.name, None);
        let permissions = state.permissions.as_ref().unwrap();
        assert_eq!(permissions[0].role_name.as_deref(), Some("Workspace Owner"));
        let resource = &permissions[0].resources.as_ref().unwrap()[0];
        assert_eq!(resource.resource_type, "WORKSPACE");
        assert_eq!(resource.labels.as_ref().unwrap()[0].description, None);

        let inputs = state.permission_inputs();
        assert_eq!(inputs[0].role_id, "role1");
        assert_eq!(inputs[0].resources[0].labels[0].key, "env");
    }

    #[test]
    fn test_role_without_description_is_null() {
        let role = Role {
            id: "role1".to_string(),
            name: "Source Admin".to_string(),
            description: None,
        };
        let state = serde_json::to_value(RoleState::from(&role)).unwrap();
        assert_eq!(state, json!({ "id": "role1", "name": "Source Admin", "description": null }));
    }
}

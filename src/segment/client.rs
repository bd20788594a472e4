//! Segment Client
//!
//! Main client for the Segment Public API, combining the bearer token,
//! the base URL and the HTTP layer. Each endpoint method unwraps the
//! `{"data": ...}` envelope into the typed payload.

use super::http::SegmentHttpClient;
use super::models::*;
use super::pagination::{collect_all, Page, PageRequest, MAX_PAGE_SIZE};
use crate::config::ProviderConfig;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

/// Main Segment client
#[derive(Clone)]
pub struct SegmentClient {
    pub http: SegmentHttpClient,
    base_url: String,
    token: String,
}

/// Decode the `data` member of an API response
fn decode<T: DeserializeOwned>(response: Value, what: &str) -> Result<T> {
    let envelope: Envelope<T> = serde_json::from_value(response)
        .with_context(|| format!("Unexpected response shape for {}", what))?;
    Ok(envelope.data)
}

/// Query parameters for one page of a listing
fn page_query(page: &PageRequest) -> [(&'static str, String); 2] {
    [
        ("pagination.cursor", page.cursor.clone()),
        ("pagination.count", page.count.to_string()),
    ]
}

fn as_pairs<'a>(query: &'a [(&'static str, String)]) -> Vec<(&'a str, &'a str)> {
    query.iter().map(|(k, v)| (*k, v.as_str())).collect()
}

impl SegmentClient {
    /// Create a new client from resolved provider configuration
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let token = config.require_token()?;
        let http = SegmentHttpClient::new(&config.user_agent())?;

        Ok(Self {
            http,
            base_url: config.effective_url().trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Create a client against an explicit base URL (tests, private endpoints)
    pub fn with_base_url(base_url: &str, token: &str) -> Result<Self> {
        Ok(Self {
            http: SegmentHttpClient::new(crate::USER_AGENT)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    /// Build an API URL from a path relative to the base URL
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Make a GET request to the API
    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        self.http.get(&self.url(path), &self.token, query).await
    }

    /// Make a POST request to the API
    pub async fn post(&self, path: &str, body: Option<&Value>) -> Result<Value> {
        self.http.post(&self.url(path), &self.token, body).await
    }

    /// Make a PATCH request to the API
    pub async fn patch(&self, path: &str, body: &Value) -> Result<Value> {
        self.http.patch(&self.url(path), &self.token, body).await
    }

    /// Make a PUT request to the API
    pub async fn put(&self, path: &str, body: &Value) -> Result<Value> {
        self.http.put(&self.url(path), &self.token, body).await
    }

    /// Make a DELETE request to the API
    pub async fn delete(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        self.http.delete(&self.url(path), &self.token, query).await
    }

    async fn get_page(&self, path: &str, page: &PageRequest) -> Result<Value> {
        let query = page_query(page);
        self.get(path, &as_pairs(&query)).await
    }

    // =========================================================================
    // Workspace & catalog
    // =========================================================================

    pub async fn get_workspace(&self) -> Result<Workspace> {
        #[derive(Deserialize)]
        struct Data {
            workspace: Workspace,
        }
        let data: Data = decode(self.get("workspace", &[]).await?, "workspace")?;
        Ok(data.workspace)
    }

    pub async fn get_source_metadata(&self, id: &str) -> Result<SourceMetadata> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Data {
            source_metadata: SourceMetadata,
        }
        let path = format!("catalog/sources/{}", urlencoding::encode(id));
        let data: Data = decode(self.get(&path, &[]).await?, "source metadata")?;
        Ok(data.source_metadata)
    }

    pub async fn get_destination_metadata(&self, id: &str) -> Result<DestinationMetadata> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Data {
            destination_metadata: DestinationMetadata,
        }
        let path = format!("catalog/destinations/{}", urlencoding::encode(id));
        let data: Data = decode(self.get(&path, &[]).await?, "destination metadata")?;
        Ok(data.destination_metadata)
    }

    pub async fn get_warehouse_metadata(&self, id: &str) -> Result<WarehouseMetadata> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Data {
            warehouse_metadata: WarehouseMetadata,
        }
        let path = format!("catalog/warehouses/{}", urlencoding::encode(id));
        let data: Data = decode(self.get(&path, &[]).await?, "warehouse metadata")?;
        Ok(data.warehouse_metadata)
    }

    // =========================================================================
    // Sources
    // =========================================================================

    pub async fn get_source(&self, id: &str) -> Result<Source> {
        let path = format!("sources/{}", urlencoding::encode(id));
        decode_source(self.get(&path, &[]).await?)
    }

    pub async fn create_source(&self, body: &Value) -> Result<Source> {
        decode_source(self.post("sources", Some(body)).await?)
    }

    pub async fn update_source(&self, id: &str, body: &Value) -> Result<Source> {
        let path = format!("sources/{}", urlencoding::encode(id));
        decode_source(self.patch(&path, body).await?)
    }

    pub async fn delete_source(&self, id: &str) -> Result<()> {
        let path = format!("sources/{}", urlencoding::encode(id));
        self.delete(&path, &[]).await?;
        Ok(())
    }

    /// Replace the full label set attached to a source
    pub async fn replace_source_labels(&self, id: &str, labels: &[Label]) -> Result<()> {
        let path = format!("sources/{}/labels", urlencoding::encode(id));
        self.post(&path, Some(&json!({ "labels": labels }))).await?;
        Ok(())
    }

    /// One page of warehouses connected to a source
    pub async fn list_connected_warehouses(
        &self,
        source_id: &str,
        page: PageRequest,
    ) -> Result<Page<Warehouse>> {
        #[derive(Deserialize)]
        struct Data {
            #[serde(default)]
            warehouses: Vec<Warehouse>,
            #[serde(default)]
            pagination: PaginationOutput,
        }
        let path = format!("sources/{}/connected-warehouses", urlencoding::encode(source_id));
        let data: Data = decode(self.get_page(&path, &page).await?, "connected warehouses")?;
        Ok(Page::new(data.warehouses, data.pagination.next))
    }

    // =========================================================================
    // Destinations
    // =========================================================================

    pub async fn get_destination(&self, id: &str) -> Result<Destination> {
        let path = format!("destinations/{}", urlencoding::encode(id));
        decode_destination(self.get(&path, &[]).await?)
    }

    pub async fn create_destination(&self, body: &Value) -> Result<Destination> {
        decode_destination(self.post("destinations", Some(body)).await?)
    }

    pub async fn update_destination(&self, id: &str, body: &Value) -> Result<Destination> {
        let path = format!("destinations/{}", urlencoding::encode(id));
        decode_destination(self.patch(&path, body).await?)
    }

    pub async fn delete_destination(&self, id: &str) -> Result<()> {
        let path = format!("destinations/{}", urlencoding::encode(id));
        self.delete(&path, &[]).await?;
        Ok(())
    }

    // =========================================================================
    // Warehouses
    // =========================================================================

    pub async fn get_warehouse(&self, id: &str) -> Result<Warehouse> {
        let path = format!("warehouses/{}", urlencoding::encode(id));
        decode_warehouse(self.get(&path, &[]).await?)
    }

    pub async fn create_warehouse(&self, body: &Value) -> Result<Warehouse> {
        decode_warehouse(self.post("warehouses", Some(body)).await?)
    }

    pub async fn update_warehouse(&self, id: &str, body: &Value) -> Result<Warehouse> {
        let path = format!("warehouses/{}", urlencoding::encode(id));
        decode_warehouse(self.patch(&path, body).await?)
    }

    pub async fn delete_warehouse(&self, id: &str) -> Result<()> {
        let path = format!("warehouses/{}", urlencoding::encode(id));
        self.delete(&path, &[]).await?;
        Ok(())
    }

    pub async fn add_connection_from_source_to_warehouse(
        &self,
        warehouse_id: &str,
        source_id: &str,
    ) -> Result<()> {
        let path = format!(
            "warehouses/{}/connected-sources/{}",
            urlencoding::encode(warehouse_id),
            urlencoding::encode(source_id)
        );
        self.post(&path, None).await?;
        Ok(())
    }

    pub async fn remove_source_connection_from_warehouse(
        &self,
        warehouse_id: &str,
        source_id: &str,
    ) -> Result<()> {
        let path = format!(
            "warehouses/{}/connected-sources/{}",
            urlencoding::encode(warehouse_id),
            urlencoding::encode(source_id)
        );
        self.delete(&path, &[]).await?;
        Ok(())
    }

    // =========================================================================
    // Tracking plans
    // =========================================================================

    pub async fn get_tracking_plan(&self, id: &str) -> Result<TrackingPlan> {
        let path = format!("tracking-plans/{}", urlencoding::encode(id));
        decode_tracking_plan(self.get(&path, &[]).await?)
    }

    pub async fn create_tracking_plan(&self, body: &Value) -> Result<TrackingPlan> {
        decode_tracking_plan(self.post("tracking-plans", Some(body)).await?)
    }

    pub async fn update_tracking_plan(&self, id: &str, body: &Value) -> Result<TrackingPlan> {
        let path = format!("tracking-plans/{}", urlencoding::encode(id));
        decode_tracking_plan(self.patch(&path, body).await?)
    }

    pub async fn delete_tracking_plan(&self, id: &str) -> Result<()> {
        let path = format!("tracking-plans/{}", urlencoding::encode(id));
        self.delete(&path, &[]).await?;
        Ok(())
    }

    /// One page of rules in a tracking plan
    pub async fn list_rules(
        &self,
        tracking_plan_id: &str,
        page: PageRequest,
    ) -> Result<Page<Rule>> {
        #[derive(Deserialize)]
        struct Data {
            #[serde(default)]
            rules: Vec<Rule>,
            #[serde(default)]
            pagination: PaginationOutput,
        }
        let path = format!("tracking-plans/{}/rules", urlencoding::encode(tracking_plan_id));
        let data: Data = decode(self.get_page(&path, &page).await?, "tracking plan rules")?;
        Ok(Page::new(data.rules, data.pagination.next))
    }

    /// Every rule in a tracking plan, across all pages
    pub async fn list_all_rules(&self, tracking_plan_id: &str) -> Result<Vec<Rule>> {
        collect_all(MAX_PAGE_SIZE, |page| self.list_rules(tracking_plan_id, page)).await
    }

    /// Replace every rule in a tracking plan
    pub async fn replace_rules(&self, tracking_plan_id: &str, rules: &[RuleInput]) -> Result<()> {
        let path = format!("tracking-plans/{}/rules", urlencoding::encode(tracking_plan_id));
        self.put(&path, &json!({ "rules": rules })).await?;
        Ok(())
    }

    /// One page of sources connected to a tracking plan
    pub async fn list_tracking_plan_sources(
        &self,
        tracking_plan_id: &str,
        page: PageRequest,
    ) -> Result<Page<Source>> {
        #[derive(Deserialize)]
        struct Data {
            #[serde(default)]
            sources: Vec<Source>,
            #[serde(default)]
            pagination: PaginationOutput,
        }
        let path = format!("tracking-plans/{}/sources", urlencoding::encode(tracking_plan_id));
        let data: Data = decode(self.get_page(&path, &page).await?, "tracking plan sources")?;
        Ok(Page::new(data.sources, data.pagination.next))
    }

    pub async fn add_source_to_tracking_plan(
        &self,
        tracking_plan_id: &str,
        source_id: &str,
    ) -> Result<()> {
        let path = format!("tracking-plans/{}/sources", urlencoding::encode(tracking_plan_id));
        self.post(&path, Some(&json!({ "sourceId": source_id }))).await?;
        Ok(())
    }

    pub async fn remove_source_from_tracking_plan(
        &self,
        tracking_plan_id: &str,
        source_id: &str,
    ) -> Result<()> {
        let path = format!("tracking-plans/{}/sources", urlencoding::encode(tracking_plan_id));
        self.delete(&path, &[("sourceId", source_id)]).await?;
        Ok(())
    }

    // =========================================================================
    // Labels
    // =========================================================================

    pub async fn list_labels(&self) -> Result<Vec<Label>> {
        #[derive(Deserialize)]
        struct Data {
            #[serde(default)]
            labels: Vec<Label>,
        }
        let data: Data = decode(self.get("labels", &[]).await?, "labels")?;
        Ok(data.labels)
    }

    pub async fn create_label(&self, label: &Label) -> Result<Label> {
        #[derive(Deserialize)]
        struct Data {
            label: Label,
        }
        let data: Data = decode(
            self.post("labels", Some(&json!({ "label": label }))).await?,
            "label",
        )?;
        Ok(data.label)
    }

    pub async fn delete_label(&self, key: &str, value: &str) -> Result<()> {
        let path = format!(
            "labels/{}:{}",
            urlencoding::encode(key),
            urlencoding::encode(value)
        );
        self.delete(&path, &[]).await?;
        Ok(())
    }

    // =========================================================================
    // Roles, users, invites
    // =========================================================================

    /// One page of workspace roles
    pub async fn list_roles(&self, page: PageRequest) -> Result<Page<Role>> {
        #[derive(Deserialize)]
        struct Data {
            #[serde(default)]
            roles: Vec<Role>,
            #[serde(default)]
            pagination: PaginationOutput,
        }
        let data: Data = decode(self.get_page("roles", &page).await?, "roles")?;
        Ok(Page::new(data.roles, data.pagination.next))
    }

    pub async fn get_user(&self, id: &str) -> Result<User> {
        #[derive(Deserialize)]
        struct Data {
            user: User,
        }
        let path = format!("users/{}", urlencoding::encode(id));
        let data: Data = decode(self.get(&path, &[]).await?, "user")?;
        Ok(data.user)
    }

    /// One page of workspace users
    pub async fn list_users(&self, page: PageRequest) -> Result<Page<User>> {
        #[derive(Deserialize)]
        struct Data {
            #[serde(default)]
            users: Vec<User>,
            #[serde(default)]
            pagination: PaginationOutput,
        }
        let data: Data = decode(self.get_page("users", &page).await?, "users")?;
        Ok(Page::new(data.users, data.pagination.next))
    }

    pub async fn replace_user_permissions(
        &self,
        id: &str,
        permissions: &[PermissionInput],
    ) -> Result<()> {
        let path = format!("users/{}/permissions", urlencoding::encode(id));
        self.put(&path, &json!({ "permissions": permissions })).await?;
        Ok(())
    }

    pub async fn delete_user(&self, id: &str) -> Result<()> {
        self.delete("users", &[("userIds", id)]).await?;
        Ok(())
    }

    /// One page of pending invite emails
    pub async fn list_invites(&self, page: PageRequest) -> Result<Page<String>> {
        #[derive(Deserialize)]
        struct Data {
            #[serde(default)]
            invites: Vec<String>,
            #[serde(default)]
            pagination: PaginationOutput,
        }
        let data: Data = decode(self.get_page("invites", &page).await?, "invites")?;
        Ok(Page::new(data.invites, data.pagination.next))
    }

    pub async fn create_invite(&self, email: &str, permissions: &[PermissionInput]) -> Result<()> {
        let body = json!({
            "invites": [{ "email": email, "permissions": permissions }]
        });
        self.post("invites", Some(&body)).await?;
        Ok(())
    }

    pub async fn delete_invite(&self, email: &str) -> Result<()> {
        self.delete("invites", &[("emails", email)]).await?;
        Ok(())
    }
}

fn decode_source(response: Value) -> Result<Source> {
    #[derive(Deserialize)]
    struct Data {
        source: Source,
    }
    let data: Data = decode(response, "source")?;
    Ok(data.source)
}

fn decode_destination(response: Value) -> Result<Destination> {
    #[derive(Deserialize)]
    struct Data {
        destination: Destination,
    }
    let data: Data = decode(response, "destination")?;
    Ok(data.destination)
}

fn decode_warehouse(response: Value) -> Result<Warehouse> {
    #[derive(Deserialize)]
    struct Data {
        warehouse: Warehouse,
    }
    let data: Data = decode(response, "warehouse")?;
    Ok(data.warehouse)
}

fn decode_tracking_plan(response: Value) -> Result<TrackingPlan> {
    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Data {
        tracking_plan: TrackingPlan,
    }
    let data: Data = decode(response, "tracking plan")?;
    Ok(data.tracking_plan)
}

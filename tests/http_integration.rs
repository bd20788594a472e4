//! Integration tests for the Segment provider using wiremock
//!
//! These tests drive resources and data sources through the provider
//! registries against mocked Public API endpoints, checking request counts,
//! state mapping and how missing objects are reported.

use serde_json::{json, Value};
use std::sync::Arc;
use terraform_provider_segment::provider::SegmentProvider;
use terraform_provider_segment::segment::SegmentClient;
use wiremock::matchers::{bearer_token, body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider_for(server: &MockServer) -> SegmentProvider {
    let client = SegmentClient::with_base_url(&server.uri(), "test-token")
        .expect("client should build");
    SegmentProvider::new(Arc::new(client))
}

fn page(key: &str, items: Value, next: Option<&str>) -> Value {
    let mut data = serde_json::Map::new();
    data.insert(key.to_string(), items);
    data.insert(
        "pagination".to_string(),
        json!({ "current": "MA==", "next": next, "totalEntries": 5 }),
    );
    json!({ "data": data })
}

fn destination_payload() -> Value {
    json!({
        "id": "dst1",
        "name": "My webhook",
        "enabled": true,
        "workspaceId": "ws1",
        "sourceId": "src1",
        "settings": { "hooks": [{ "hook": "https://example.com" }] },
        "metadata": {
            "id": "meta-webhooks",
            "name": "Webhooks",
            "slug": "webhooks",
            "options": [],
            "supportedMethods": { "track": true }
        }
    })
}

/// Test module for resource lifecycle behavior
mod resource_tests {
    use super::*;

    /// Destination create issues a single POST and seeds state from the response
    #[tokio::test]
    async fn test_destination_create_uses_one_request() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/destinations"))
            .and(bearer_token("test-token"))
            .and(body_json(json!({
                "sourceId": "src1",
                "metadataId": "meta-webhooks",
                "enabled": true,
                "name": "My webhook",
                "settings": { "hooks": [{ "hook": "https://example.com" }] }
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "data": { "destination": destination_payload() } })),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let resources = provider.resources();
        let destination = resources.get("segment_destination").unwrap();

        let state = destination
            .create(json!({
                "name": "My webhook",
                "enabled": true,
                "source_id": "src1",
                "metadata": { "id": "meta-webhooks" },
                "settings": "{\"hooks\":[{\"hook\":\"https://example.com\"}]}"
            }))
            .await
            .expect("create should succeed");

        assert_eq!(state["id"], "dst1");
        assert_eq!(state["workspace_id"], "ws1");
        assert_eq!(state["metadata"]["name"], "Webhooks");
        assert_eq!(state["metadata"]["supported_methods"]["track"], true);
        assert_eq!(state["metadata"]["supported_methods"]["pageview"], Value::Null);
        assert_eq!(
            state["settings"],
            "{\"hooks\":[{\"hook\":\"https://example.com\"}]}"
        );
    }

    /// Source read drops the resource when the API answers 404
    #[tokio::test]
    async fn test_source_404_removes_from_state() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/sources/src-gone"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({
                    "errors": [{ "type": "not-found", "message": "Source not found" }]
                })),
            )
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let resources = provider.resources();
        let state = resources
            .get("segment_source")
            .unwrap()
            .read(json!({
                "id": "src-gone",
                "slug": "gone",
                "enabled": true,
                "metadata": { "id": "m" }
            }))
            .await
            .expect("read should not fail");

        assert!(state.is_none());
    }

    /// Destination read reports 404 as an error carrying the response body
    #[tokio::test]
    async fn test_destination_404_is_an_error_with_pretty_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/destinations/dst-gone"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({
                    "errors": [{ "type": "not-found", "message": "Destination not found" }]
                })),
            )
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let resources = provider.resources();
        let err = resources
            .get("segment_destination")
            .unwrap()
            .read(json!({
                "id": "dst-gone",
                "source_id": "src1",
                "enabled": true,
                "metadata": { "id": "m" }
            }))
            .await
            .expect_err("404 should be reported");

        assert_eq!(err.summary, "Unable to read Destination");
        assert!(err.detail.contains("404"));
        assert!(err.detail.contains("\"message\": \"Destination not found\""));
    }

    /// Missing id is rejected before any request is made
    #[tokio::test]
    async fn test_missing_id_makes_no_request() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let resources = provider.resources();
        let err = resources
            .get("segment_warehouse")
            .unwrap()
            .read(json!({ "enabled": true, "metadata": { "id": "m" } }))
            .await
            .expect_err("missing id should fail");

        assert_eq!(err.summary, "Invalid configuration");
        assert!(err.detail.contains("`id`"));
    }

    /// Source-warehouse connection absent after the full walk yields the sentinel pair
    #[tokio::test]
    async fn test_source_warehouse_connection_absent_yields_sentinel() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/sources/src1/connected-warehouses"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(
                "warehouses",
                json!([{
                    "id": "other-warehouse",
                    "workspaceId": "ws1",
                    "enabled": true,
                    "metadata": { "id": "postgres" }
                }]),
                None,
            )))
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let resources = provider.resources();
        let state = resources
            .get("segment_source_warehouse_connection")
            .unwrap()
            .read(json!({ "source_id": "src1", "warehouse_id": "wh1" }))
            .await
            .expect("read should succeed")
            .expect("state should be kept");

        assert_eq!(state, json!({ "source_id": "not_found", "warehouse_id": "not_found" }));
    }

    /// Source-tracking-plan connection stops walking at the page holding the source
    #[tokio::test]
    async fn test_tracking_plan_connection_stops_at_matching_page() {
        let server = MockServer::start().await;

        let source = |id: &str| {
            json!({
                "id": id,
                "slug": id,
                "workspaceId": "ws1",
                "enabled": true,
                "metadata": { "id": "js" }
            })
        };

        Mock::given(method("GET"))
            .and(path("/tracking-plans/tp1/sources"))
            .and(query_param("pagination.cursor", "MA=="))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(
                "sources",
                json!([source("src-a")]),
                Some("cursor-2"),
            )))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/tracking-plans/tp1/sources"))
            .and(query_param("pagination.cursor", "cursor-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(
                "sources",
                json!([source("src-b")]),
                Some("cursor-3"),
            )))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/tracking-plans/tp1/sources"))
            .and(query_param("pagination.cursor", "cursor-3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(
                "sources",
                json!([source("src-c")]),
                None,
            )))
            .expect(0)
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let resources = provider.resources();
        let state = resources
            .get("segment_source_tracking_plan_connection")
            .unwrap()
            .read(json!({ "source_id": "src-b", "tracking_plan_id": "tp1" }))
            .await
            .expect("read should succeed")
            .expect("state should be kept");

        assert_eq!(state, json!({ "source_id": "src-b", "tracking_plan_id": "tp1" }));
    }

    /// Label read removes the label once it is gone from the label list
    #[tokio::test]
    async fn test_label_missing_from_list_is_removed() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/labels"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "labels": [{ "key": "env", "value": "staging" }] }
            })))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let resources = provider.resources();
        let label = resources.get("segment_label").unwrap();

        let kept = label
            .read(json!({ "key": "env", "value": "staging" }))
            .await
            .unwrap();
        assert_eq!(
            kept,
            Some(json!({ "key": "env", "value": "staging", "description": null }))
        );

        let removed = label.read(json!({ "key": "env", "value": "prod" })).await.unwrap();
        assert!(removed.is_none());
    }

    /// User read falls back to pending invites before dropping the user
    #[tokio::test]
    async fn test_user_with_pending_invite_is_kept_without_id() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page("users", json!([]), None)))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/invites"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(
                "invites",
                json!(["jane@example.com"]),
                None,
            )))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let resources = provider.resources();
        let user = resources.get("segment_user").unwrap();

        let plan = json!({
            "email": "jane@example.com",
            "permissions": [{ "role_id": "role1", "resources": [{ "id": "ws1", "type": "WORKSPACE" }] }]
        });
        let state = user.read(plan).await.unwrap().expect("invite keeps the user");
        assert_eq!(state["id"], Value::Null);
        assert_eq!(state["permissions"][0]["role_id"], "role1");

        let gone = user
            .read(json!({ "email": "nobody@example.com", "permissions": [] }))
            .await
            .unwrap();
        assert!(gone.is_none());
    }
}

/// Test module for data sources and pagination
mod data_source_tests {
    use super::*;

    fn rule(key: &str) -> Value {
        json!({
            "type": "TRACK",
            "key": key,
            "version": 1,
            "jsonSchema": { "properties": {} }
        })
    }

    /// A tracking plan with rules spread over three pages issues three rule requests
    #[tokio::test]
    async fn test_tracking_plan_rules_fetch_every_page() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/tracking-plans/tp1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "trackingPlan": {
                    "id": "tp1",
                    "name": "Main plan",
                    "slug": "main-plan",
                    "type": "LIVE",
                    "createdAt": "2024-01-01T00:00:00Z",
                    "updatedAt": "2024-01-02T00:00:00Z"
                } }
            })))
            .expect(1)
            .mount(&server)
            .await;

        for (cursor, key, next) in [
            ("MA==", "Button Clicked", Some("Mg==")),
            ("Mg==", "Page Viewed", Some("NA==")),
            ("NA==", "Order Completed", None),
        ] {
            Mock::given(method("GET"))
                .and(path("/tracking-plans/tp1/rules"))
                .and(query_param("pagination.cursor", cursor))
                .and(query_param("pagination.count", "200"))
                .respond_with(ResponseTemplate::new(200).set_body_json(page(
                    "rules",
                    json!([rule(key)]),
                    next,
                )))
                .expect(1)
                .mount(&server)
                .await;
        }

        let provider = provider_for(&server);
        let data_sources = provider.data_sources();
        let state = data_sources
            .get("segment_tracking_plan")
            .unwrap()
            .read(json!({ "id": "tp1" }))
            .await
            .expect("read should succeed");

        let rules = state["rules"].as_array().unwrap();
        assert_eq!(rules.len(), 3);
        assert_eq!(rules[0]["key"], "Button Clicked");
        assert_eq!(rules[2]["key"], "Order Completed");
        assert_eq!(state["type"], "LIVE");
        assert_eq!(state["description"], Value::Null);
    }

    /// Role lookup that exhausts every page fails with "Role not found"
    #[tokio::test]
    async fn test_role_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/roles"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(
                "roles",
                json!([
                    { "id": "my-role-id-1", "name": "Workspace Owner" },
                    { "id": "my-role-id-2", "name": "Source Admin" }
                ]),
                None,
            )))
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let data_sources = provider.data_sources();
        let err = data_sources
            .get("segment_role")
            .unwrap()
            .read(json!({ "id": "my-role-id-3" }))
            .await
            .expect_err("absent role should fail");

        assert_eq!(err.summary, "Role not found");
        assert!(err.detail.contains("my-role-id-3"));
    }

    /// Role lookup returns the matching role with a null description
    #[tokio::test]
    async fn test_role_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/roles"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(
                "roles",
                json!([
                    { "id": "role1", "name": "Workspace Owner", "description": "Full access" },
                    { "id": "role2", "name": "Source Admin" }
                ]),
                None,
            )))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let data_sources = provider.data_sources();
        let state = data_sources
            .get("segment_role")
            .unwrap()
            .read(json!({ "id": "role2" }))
            .await
            .unwrap();

        assert_eq!(state, json!({ "id": "role2", "name": "Source Admin", "description": null }));
    }

    /// Destination metadata maps absent optional blocks to explicit nulls
    #[tokio::test]
    async fn test_destination_metadata_absent_fields_are_null() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/catalog/destinations/meta1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "destinationMetadata": {
                    "id": "meta1",
                    "name": "Amplitude",
                    "slug": "amplitude",
                    "options": [{ "name": "apiKey", "type": "string", "required": true, "defaultValue": "default" }]
                } }
            })))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let data_sources = provider.data_sources();
        let state = data_sources
            .get("segment_destination_metadata")
            .unwrap()
            .read(json!({ "id": "meta1" }))
            .await
            .unwrap();

        assert_eq!(state["supported_methods"]["track"], Value::Null);
        assert_eq!(state["supported_features"]["replay"], Value::Null);
        assert_eq!(state["options"][0]["default_value"], "\"default\"");
        assert_eq!(state["contacts"], Value::Null);
    }

    /// Workspace data source needs no configuration
    #[tokio::test]
    async fn test_workspace_read() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/workspace"))
            .and(bearer_token("test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "workspace": { "id": "ws1", "name": "Acme", "slug": "acme" } }
            })))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let data_sources = provider.data_sources();
        let state = data_sources
            .get("segment_workspace")
            .unwrap()
            .read(json!({}))
            .await
            .unwrap();

        assert_eq!(state, json!({ "id": "ws1", "name": "Acme", "slug": "acme" }));
    }
}

/// Test module for HTTP client error handling
mod http_client_tests {
    use super::*;
    use terraform_provider_segment::segment::{format_api_error, is_not_found};

    /// Test 401 response surfaces the status and the pretty-printed body
    #[tokio::test]
    async fn test_401_error_detail_includes_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/workspace"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({ "errors": [{ "type": "unauthorized" }] })),
            )
            .mount(&server)
            .await;

        let client = SegmentClient::with_base_url(&server.uri(), "bad-token").unwrap();
        let err = client.get_workspace().await.unwrap_err();

        assert!(!is_not_found(&err));
        let detail = format_api_error(&err);
        assert!(detail.contains("401"));
        assert!(detail.contains("\"type\": \"unauthorized\""));
    }

    /// Test non-JSON error bodies are reported without a body section
    #[tokio::test]
    async fn test_plain_text_error_body() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/sources/src1"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let client = SegmentClient::with_base_url(&server.uri(), "test-token").unwrap();
        let err = client.delete_source("src1").await.unwrap_err();

        assert_eq!(format_api_error(&err), "API request failed: 502 Bad Gateway");
    }

    /// Test empty success bodies are accepted
    #[tokio::test]
    async fn test_empty_body_on_success() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/labels/env:prod"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = SegmentClient::with_base_url(&server.uri(), "test-token").unwrap();
        client.delete_label("env", "prod").await.unwrap();
    }
}

/// Test module for provider configuration
mod config_tests {
    use super::*;
    use terraform_provider_segment::config::ProviderConfig;

    /// A missing token fails configuration without contacting the API
    #[tokio::test]
    async fn test_missing_token_makes_no_request() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let config = ProviderConfig {
            url: Some(server.uri()),
            token: None,
        };
        let err = SegmentProvider::from_config(&config).err().expect("should fail");

        assert_eq!(err.summary, "Invalid configuration");
        assert!(err.detail.contains("token"));
    }

    /// A malformed URL is rejected up front
    #[tokio::test]
    async fn test_invalid_url_is_rejected() {
        let config = ProviderConfig {
            url: Some("not a url".to_string()),
            token: Some("t".to_string()),
        };
        let err = SegmentProvider::from_config(&config).err().expect("should fail");

        assert!(err.detail.contains("Invalid API URL"));
    }
}

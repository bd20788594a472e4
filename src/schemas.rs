//! Attribute blocks reused by several resources and data sources

use crate::framework::schema::{label_attributes, logos_attributes, option_attributes};
use crate::framework::{Attribute, AttributeType};

fn string() -> AttributeType {
    AttributeType::String
}

fn computed_object(name: &'static str, attributes: Vec<Attribute>) -> Attribute {
    Attribute::computed(name, AttributeType::Object(attributes))
}

fn computed_list(name: &'static str, attributes: Vec<Attribute>) -> Attribute {
    Attribute::computed(name, AttributeType::list_of(AttributeType::Object(attributes)))
}

/// Catalog attributes shared by every metadata block
fn catalog_common(id: Attribute) -> Vec<Attribute> {
    vec![
        id,
        Attribute::computed("name", string())
            .describe("The user-friendly name of this integration."),
        Attribute::computed("slug", string())
            .describe("The slug that identifies this integration in the Segment app."),
        Attribute::computed("description", string())
            .describe("The description of this integration."),
        computed_object("logos", logos_attributes()).describe("The logos for this integration."),
        computed_list("options", option_attributes()).describe("Options for this integration."),
    ]
}

/// `id` of a metadata block: required when managing, required lookup key for
/// the catalog data sources
pub fn metadata_id(requires_replace: bool) -> Attribute {
    let attr = Attribute::required("id", string())
        .describe("The id of this integration in the Segment catalog.");
    if requires_replace {
        attr.requires_replace()
    } else {
        attr
    }
}

pub fn source_metadata_attributes(id: Attribute) -> Vec<Attribute> {
    let mut attributes = catalog_common(id);
    attributes.push(
        Attribute::computed("categories", AttributeType::list_of(string()))
            .describe("A list of categories this Source belongs to."),
    );
    attributes.push(
        Attribute::computed("is_cloud_event_source", AttributeType::Bool)
            .describe("True if this is a Cloud Event Source."),
    );
    attributes
}

pub fn warehouse_metadata_attributes(id: Attribute) -> Vec<Attribute> {
    catalog_common(id)
}

pub fn destination_metadata_attributes(id: Attribute) -> Vec<Attribute> {
    let bool_attr = |name: &'static str| Attribute::computed(name, AttributeType::Bool);

    let mut attributes = catalog_common(id);
    attributes.extend([
        Attribute::computed("categories", AttributeType::list_of(string()))
            .describe("A list of categories with which the Destination is associated."),
        Attribute::computed("website", string()).describe("A website URL for this Destination."),
        Attribute::computed("status", string()).describe("Support status of the Destination."),
        Attribute::computed("previous_names", AttributeType::list_of(string()))
            .describe("A list of names previously used by the Destination."),
        computed_list(
            "components",
            vec![
                Attribute::computed("code", string()),
                Attribute::computed("owner", string()),
                Attribute::computed("type", string()),
            ],
        )
        .describe("A list of components this Destination provides."),
        computed_object(
            "supported_methods",
            vec![
                bool_attr("track"),
                bool_attr("pageview"),
                bool_attr("identify"),
                bool_attr("group"),
                bool_attr("alias"),
            ],
        )
        .describe("Methods that this Destination supports."),
        computed_object(
            "supported_platforms",
            vec![bool_attr("browser"), bool_attr("server"), bool_attr("mobile")],
        )
        .describe("Platforms from which the Destination receives events."),
        computed_object(
            "supported_features",
            vec![
                Attribute::computed("cloud_mode_instances", string()),
                Attribute::computed("device_mode_instances", string()),
                bool_attr("replay"),
                bool_attr("browser_unbundling"),
                bool_attr("browser_unbundling_public"),
            ],
        )
        .describe("Features that this Destination supports."),
        computed_list(
            "actions",
            vec![
                Attribute::computed("id", string()),
                Attribute::computed("slug", string()),
                Attribute::computed("name", string()),
                Attribute::computed("description", string()),
                Attribute::computed("platform", string()),
                bool_attr("hidden"),
                Attribute::computed("default_trigger", string()),
                computed_list(
                    "fields",
                    vec![
                        Attribute::computed("id", string()),
                        Attribute::computed("sort_order", AttributeType::Number),
                        Attribute::computed("field_key", string()),
                        Attribute::computed("label", string()),
                        Attribute::computed("type", string()),
                        Attribute::computed("description", string()),
                        Attribute::computed("placeholder", string()),
                        Attribute::computed("default_value", AttributeType::Json),
                        bool_attr("required"),
                        bool_attr("multiple"),
                        Attribute::computed("choices", AttributeType::Json),
                        bool_attr("dynamic"),
                        bool_attr("allow_null"),
                    ],
                ),
            ],
        )
        .describe("Actions available for the Destination."),
        computed_list(
            "presets",
            vec![
                Attribute::computed("action_id", string()),
                Attribute::computed("name", string()),
                Attribute::computed("fields", AttributeType::Json),
                Attribute::computed("trigger", string()),
            ],
        )
        .describe("Predefined Destination subscriptions that can optionally be applied."),
        computed_list(
            "contacts",
            vec![
                Attribute::computed("name", string()),
                Attribute::computed("email", string()),
                Attribute::computed("role", string()),
                bool_attr("is_primary"),
            ],
        )
        .describe("Contact info for Integration Owners."),
        bool_attr("partner_owned").describe("Partner Owned flag."),
        Attribute::computed("supported_regions", AttributeType::list_of(string()))
            .describe("A list of supported regions for this Destination."),
        Attribute::computed("region_endpoints", AttributeType::list_of(string()))
            .describe("The list of regional endpoints for this Destination."),
    ]);
    attributes
}

/// Labels block attached to sources
pub fn labels_attribute() -> Attribute {
    Attribute::optional_computed(
        "labels",
        AttributeType::set_of(AttributeType::Object(label_attributes())),
    )
    .describe("A list containing any labels associated with this Source.")
}

pub fn rule_attributes() -> Vec<Attribute> {
    vec![
        Attribute::required("type", string()).describe("The type for this Tracking Plan rule."),
        Attribute::optional("key", string())
            .describe("Key to this rule (free-form string like 'Button clicked')."),
        Attribute::required("version", AttributeType::Number).describe("Version of this rule."),
        Attribute::required("json_schema", AttributeType::Json)
            .describe("JSON Schema of this rule."),
        Attribute::computed("created_at", string())
            .describe("The timestamp of this rule's creation."),
        Attribute::computed("updated_at", string())
            .describe("The timestamp of this rule's last change."),
        Attribute::computed("deprecated_at", string())
            .describe("The timestamp of this rule's deprecation."),
    ]
}

pub fn permission_attributes() -> Vec<Attribute> {
    vec![
        Attribute::required("role_id", string()).describe("The id of the role."),
        Attribute::computed("role_name", string()).describe("The name of the role."),
        Attribute::optional(
            "resources",
            AttributeType::set_of(AttributeType::Object(vec![
                Attribute::required("id", string()).describe("The id of this resource."),
                Attribute::required("type", string()).describe("The type for this resource."),
                Attribute::optional(
                    "labels",
                    AttributeType::set_of(AttributeType::Object(label_attributes())),
                )
                .describe("The labels that further refine access to this resource."),
            ])),
        )
        .describe("The resources associated with the permission."),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::Mode;

    #[test]
    fn test_destination_metadata_block_is_read_only_except_id() {
        let attributes = destination_metadata_attributes(metadata_id(true));
        let (id, rest) = attributes.split_first().unwrap();

        assert_eq!(id.name, "id");
        assert!(id.requires_replace);
        assert!(rest.iter().all(|a| a.mode == Mode::Computed));
    }
}

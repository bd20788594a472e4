//! Schema - attribute declarations for resources and data sources
//!
//! Every resource and data source declares its attributes here. The
//! declaration drives the `schema` command and the up-front check of
//! required attributes, which runs before any request is made.

use serde::Serialize;
use serde_json::Value;

use super::diagnostics::{DiagResult, Diagnostic};

/// Attribute type
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "element", rename_all = "snake_case")]
pub enum AttributeType {
    String,
    Bool,
    Number,
    /// String holding normalized JSON
    Json,
    List(Box<AttributeType>),
    /// Unordered collection
    Set(Box<AttributeType>),
    /// Nested block of attributes
    Object(Vec<Attribute>),
}

impl AttributeType {
    pub fn list_of(inner: AttributeType) -> Self {
        Self::List(Box::new(inner))
    }

    pub fn set_of(inner: AttributeType) -> Self {
        Self::Set(Box::new(inner))
    }
}

/// Who supplies the attribute value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Required,
    Optional,
    /// Set by the API, never by configuration
    Computed,
    /// Configurable, otherwise filled in by the API
    OptionalComputed,
}

#[derive(Debug, Clone, Serialize)]
pub struct Attribute {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub attr_type: AttributeType,
    pub mode: Mode,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub description: &'static str,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub sensitive: bool,
    /// Changing the value destroys and recreates the resource
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub requires_replace: bool,
}

impl Attribute {
    pub fn new(name: &'static str, attr_type: AttributeType, mode: Mode) -> Self {
        Self {
            name,
            attr_type,
            mode,
            description: "",
            sensitive: false,
            requires_replace: false,
        }
    }

    pub fn required(name: &'static str, attr_type: AttributeType) -> Self {
        Self::new(name, attr_type, Mode::Required)
    }

    pub fn optional(name: &'static str, attr_type: AttributeType) -> Self {
        Self::new(name, attr_type, Mode::Optional)
    }

    pub fn computed(name: &'static str, attr_type: AttributeType) -> Self {
        Self::new(name, attr_type, Mode::Computed)
    }

    pub fn optional_computed(name: &'static str, attr_type: AttributeType) -> Self {
        Self::new(name, attr_type, Mode::OptionalComputed)
    }

    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn requires_replace(mut self) -> Self {
        self.requires_replace = true;
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Schema {
    pub version: i64,
    pub description: &'static str,
    pub attributes: Vec<Attribute>,
}

impl Schema {
    pub fn new(description: &'static str, attributes: Vec<Attribute>) -> Self {
        Self {
            version: 0,
            description,
            attributes,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Reject configuration whose required attributes are null or empty
    pub fn check_required(&self, config: &Value) -> DiagResult<()> {
        check_attributes(&self.attributes, config, "")
    }
}

fn check_attributes(attributes: &[Attribute], object: &Value, prefix: &str) -> DiagResult<()> {
    for attribute in attributes {
        let path = if prefix.is_empty() {
            attribute.name.to_string()
        } else {
            format!("{}.{}", prefix, attribute.name)
        };
        let value = object.get(attribute.name).unwrap_or(&Value::Null);

        let missing = match value {
            Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            _ => false,
        };
        if attribute.mode == Mode::Required && missing {
            return Err(Diagnostic::missing_attribute(&path));
        }

        if let (AttributeType::Object(nested), Value::Object(_)) = (&attribute.attr_type, value) {
            check_attributes(nested, value, &path)?;
        }
    }
    Ok(())
}

// =============================================================================
// Shared nested blocks
// =============================================================================

/// `key` / `value` / `description` label block
pub fn label_attributes() -> Vec<Attribute> {
    vec![
        Attribute::required("key", AttributeType::String)
            .describe("The key that represents the name of this label."),
        Attribute::required("value", AttributeType::String)
            .describe("The value associated with the key of this label."),
        Attribute::optional("description", AttributeType::String)
            .describe("An optional description of the purpose of this label."),
    ]
}

pub fn logos_attributes() -> Vec<Attribute> {
    vec![
        Attribute::computed("default", AttributeType::String)
            .describe("The default URL for this logo."),
        Attribute::computed("mark", AttributeType::String).describe("The logo mark."),
        Attribute::computed("alt", AttributeType::String)
            .describe("The alternative text for this logo."),
    ]
}

pub fn option_attributes() -> Vec<Attribute> {
    vec![
        Attribute::computed("name", AttributeType::String)
            .describe("The name identifying this option in the context of a Segment Integration."),
        Attribute::computed("type", AttributeType::String)
            .describe("Defines the type for this option in the schema."),
        Attribute::computed("required", AttributeType::Bool)
            .describe("Whether this is a required option when setting up the Integration."),
        Attribute::computed("description", AttributeType::String)
            .describe("An optional short text that describes the option."),
        Attribute::computed("default_value", AttributeType::Json)
            .describe("An optional default value for the field, encoded as JSON."),
        Attribute::computed("label", AttributeType::String)
            .describe("An optional label for this field."),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn metadata_schema() -> Schema {
        Schema::new(
            "test",
            vec![
                Attribute::required("slug", AttributeType::String),
                Attribute::optional("name", AttributeType::String),
                Attribute::required(
                    "metadata",
                    AttributeType::Object(vec![
                        Attribute::required("id", AttributeType::String),
                        Attribute::computed("name", AttributeType::String),
                    ]),
                ),
            ],
        )
    }

    #[test]
    fn test_check_required_accepts_complete_config() {
        let config = json!({ "slug": "web", "metadata": { "id": "IqDTy1TpoU" } });
        assert!(metadata_schema().check_required(&config).is_ok());
    }

    #[test]
    fn test_check_required_rejects_empty_string() {
        let config = json!({ "slug": "", "metadata": { "id": "IqDTy1TpoU" } });
        let diag = metadata_schema().check_required(&config).unwrap_err();
        assert!(diag.detail.contains("`slug`"));
    }

    #[test]
    fn test_check_required_descends_into_nested_objects() {
        let config = json!({ "slug": "web", "metadata": { "id": null } });
        let diag = metadata_schema().check_required(&config).unwrap_err();
        assert!(diag.detail.contains("`metadata.id`"));
    }

    #[test]
    fn test_schema_serializes_replace_flag_only_when_set() {
        let attr = Attribute::required("id", AttributeType::String).requires_replace();
        let value = serde_json::to_value(&attr).unwrap();
        assert_eq!(value["requires_replace"], json!(true));
        assert_eq!(value["type"], json!({ "kind": "string" }));
        assert!(value.get("sensitive").is_none());
    }
}

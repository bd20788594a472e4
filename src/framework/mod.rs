//! Provider framework
//!
//! The lifecycle surface the plugin protocol layer drives:
//!
//! - [`schema`] - Attribute declarations and the required-attribute check
//! - [`resource`] - `Resource` / `DataSource` traits and their type-erased forms
//! - [`diagnostics`] - Errors surfaced to the operator

pub mod diagnostics;
pub mod resource;
pub mod schema;

pub use diagnostics::{DiagResult, Diagnostic, Severity};
pub use resource::{DataSource, DynamicDataSource, DynamicResource, Resource};
pub use schema::{Attribute, AttributeType, Mode, Schema};

use serde_json::Value;

/// Look up a state attribute by its dotted address, e.g.
/// `metadata.options.0.default_value`. Numeric segments index into lists.
///
/// Returns `None` when the path does not exist and `Some(&Value::Null)` when
/// the attribute exists but is null.
pub fn attribute_at<'a>(state: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = state;

    for part in path.split('.') {
        current = match part.parse::<usize>() {
            Ok(idx) => current.get(idx)?,
            Err(_) => current.get(part)?,
        };
    }

    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attribute_at_walks_objects_and_lists() {
        let state = json!({
            "metadata": { "options": [ { "name": "apiKey", "default_value": null } ] }
        });

        assert_eq!(
            attribute_at(&state, "metadata.options.0.name"),
            Some(&json!("apiKey"))
        );
        assert_eq!(
            attribute_at(&state, "metadata.options.0.default_value"),
            Some(&Value::Null)
        );
        assert_eq!(attribute_at(&state, "metadata.options.1.name"), None);
        assert_eq!(attribute_at(&state, "metadata.logos"), None);
    }
}

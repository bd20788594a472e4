//! Nested blocks shared across entities: labels, logos and catalog options

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::convert::json_string;
use crate::segment::models::{IntegrationOption, Label, Logos};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelState {
    pub key: String,
    pub value: String,
    pub description: Option<String>,
}

impl From<&Label> for LabelState {
    fn from(label: &Label) -> Self {
        Self {
            key: label.key.clone(),
            value: label.value.clone(),
            description: label.description.clone(),
        }
    }
}

impl From<&LabelState> for Label {
    fn from(label: &LabelState) -> Self {
        Self {
            key: label.key.clone(),
            value: label.value.clone(),
            description: label.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogosState {
    pub default: Option<String>,
    pub mark: Option<String>,
    pub alt: Option<String>,
}

impl From<&Logos> for LogosState {
    fn from(logos: &Logos) -> Self {
        Self {
            default: logos.default.clone(),
            mark: logos.mark.clone(),
            alt: logos.alt.clone(),
        }
    }
}

/// Catalog configuration option
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionState {
    pub name: String,
    #[serde(rename = "type")]
    pub option_type: String,
    pub required: bool,
    pub description: Option<String>,
    /// JSON-encoded default, e.g. `"\"default\""` for the string `default`
    pub default_value: Option<String>,
    pub label: Option<String>,
}

impl OptionState {
    pub fn from_api(option: &IntegrationOption) -> Result<Self> {
        Ok(Self {
            name: option.name.clone(),
            option_type: option.option_type.clone(),
            required: option.required,
            description: option.description.clone(),
            default_value: json_string(option.default_value.as_ref())?,
            label: option.label.clone(),
        })
    }
}

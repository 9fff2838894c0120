// File: rusty-forms/src/config.rs
// Purpose: Attribute-name configuration, parsed from TOML

use anyhow::{Context, Result};
use rusty_forms_validation::{parse_bound, parse_length_bound, FieldRules, RuleError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::element::Element;

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StateConfig {
    #[serde(default)]
    pub attributes: AttributeNames,
}

/// Which element attributes declare a field's name and rules.
///
/// The state attributes (`valid`, `dirty`, `touched`, `pristine`) are not
/// configurable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttributeNames {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_required")]
    pub required: String,

    /// Checked in order; the first attribute present supplies the pattern.
    #[serde(default = "default_pattern")]
    pub pattern: Vec<String>,

    #[serde(default = "default_min")]
    pub min: String,

    #[serde(default = "default_max")]
    pub max: String,

    #[serde(default = "default_min_length")]
    pub min_length: String,

    #[serde(default = "default_max_length")]
    pub max_length: String,

    #[serde(rename = "type", default = "default_type")]
    pub input_type: String,

    /// Value of the type attribute that turns on the email check.
    #[serde(default = "default_email_type")]
    pub email_type: String,
}

// Default values
fn default_name() -> String {
    "name".to_string()
}

fn default_required() -> String {
    "required".to_string()
}

fn default_pattern() -> Vec<String> {
    vec!["regex".to_string(), "pattern".to_string()]
}

fn default_min() -> String {
    "min".to_string()
}

fn default_max() -> String {
    "max".to_string()
}

fn default_min_length() -> String {
    "minStrLength".to_string()
}

fn default_max_length() -> String {
    "maxStrLength".to_string()
}

fn default_type() -> String {
    "type".to_string()
}

fn default_email_type() -> String {
    "email".to_string()
}

impl Default for AttributeNames {
    fn default() -> Self {
        Self {
            name: default_name(),
            required: default_required(),
            pattern: default_pattern(),
            min: default_min(),
            max: default_max(),
            min_length: default_min_length(),
            max_length: default_max_length(),
            input_type: default_type(),
            email_type: default_email_type(),
        }
    }
}

impl AttributeNames {
    /// The element's name, if present and non-empty.
    pub fn read_name(&self, element: &dyn Element) -> Option<String> {
        element.attribute(&self.name).filter(|name| !name.is_empty())
    }

    /// Resolves the element's rule attributes into a [`FieldRules`].
    ///
    /// Bounds that fail to parse are treated as absent. Only an uncompilable
    /// pattern is an error.
    pub fn read_rules(&self, element: &dyn Element) -> Result<FieldRules, RuleError> {
        let mut rules = FieldRules::new();

        rules.required = element.attribute(&self.required).is_some();

        if let Some(source) = self
            .pattern
            .iter()
            .find_map(|attr| element.attribute(attr))
        {
            rules = rules.pattern(&source)?;
        }

        rules.min = element.attribute(&self.min).as_deref().and_then(parse_bound);
        rules.max = element.attribute(&self.max).as_deref().and_then(parse_bound);
        rules.min_length = element
            .attribute(&self.min_length)
            .as_deref()
            .and_then(parse_length_bound);
        rules.max_length = element
            .attribute(&self.max_length)
            .as_deref()
            .and_then(parse_length_bound);

        rules.email = element
            .attribute(&self.input_type)
            .is_some_and(|t| t.eq_ignore_ascii_case(&self.email_type));

        Ok(rules)
    }
}

impl StateConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: StateConfig = toml::from_str(content)?;
        Ok(config)
    }
}

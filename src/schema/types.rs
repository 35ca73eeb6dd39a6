//! Schema definition types.
//!
//! A [`ConfigSchema`] describes the shape of one configuration file type as a
//! *constraint* set: required property names plus per-property constraints.
//! Properties not declared in the schema are ignored during validation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::issue::Severity;

/// Declared type of a schema property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    String,
    Number,
    Boolean,
    Array,
    Object,
}

impl PropertyType {
    /// Lowercase type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::String => "string",
            PropertyType::Number => "number",
            PropertyType::Boolean => "boolean",
            PropertyType::Array => "array",
            PropertyType::Object => "object",
        }
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Constraints on one property.
///
/// String constraints (`min_length`, `max_length`, `pattern`, `enum_values`)
/// apply only to `string` properties; numeric bounds apply only to `number`
/// properties. Constraints that do not match the declared type are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Regular expression the whole value must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
}

impl PropertySchema {
    /// A property of the given type with no constraints.
    pub fn of(property_type: PropertyType) -> Self {
        Self {
            property_type,
            description: None,
            min_length: None,
            max_length: None,
            pattern: None,
            enum_values: None,
            minimum: None,
            maximum: None,
        }
    }

    pub fn string() -> Self {
        Self::of(PropertyType::String)
    }

    pub fn number() -> Self {
        Self::of(PropertyType::Number)
    }

    pub fn boolean() -> Self {
        Self::of(PropertyType::Boolean)
    }

    pub fn array() -> Self {
        Self::of(PropertyType::Array)
    }

    pub fn object() -> Self {
        Self::of(PropertyType::Object)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Closed length interval `[min, max]` in characters.
    pub fn with_length(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_enum<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Inclusive numeric range `[min, max]`.
    pub fn with_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.minimum = min;
        self.maximum = max;
        self
    }
}

/// Shape of one configuration file type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigSchema {
    pub title: String,
    pub description: String,
    /// Property names that must be present.
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(default)]
    pub properties: BTreeMap<String, PropertySchema>,
}

impl ConfigSchema {
    /// Create a schema without properties.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            required: Vec::new(),
            properties: BTreeMap::new(),
        }
    }

    /// Add required property names.
    pub fn require<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            if !self.required.contains(&name) {
                self.required.push(name);
            }
        }
        self
    }

    /// Declare a property.
    pub fn property(mut self, name: impl Into<String>, schema: PropertySchema) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }
}

/// Category of a catalog rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleCategory {
    Structure,
    Security,
    Style,
    BestPractice,
}

impl std::fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RuleCategory::Structure => "structure",
            RuleCategory::Security => "security",
            RuleCategory::Style => "style",
            RuleCategory::BestPractice => "best-practice",
        };
        f.pad(name)
    }
}

/// A named, togglable rule bound to one or more file types.
///
/// Catalog rules carry reporting metadata independent of the structural
/// schema. `enabled` is a live toggle on the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSchemaRule {
    pub id: String,
    pub name: String,
    pub description: String,
    pub file_types: Vec<String>,
    pub category: RuleCategory,
    pub severity: Severity,
    pub enabled: bool,
}

impl ValidationSchemaRule {
    /// Create an enabled rule for a single file type.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        file_type: impl Into<String>,
        category: RuleCategory,
        severity: Severity,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            file_types: vec![file_type.into()],
            category,
            severity,
            enabled: true,
        }
    }

    /// Whether this rule applies to `file_type`.
    pub fn applies_to(&self, file_type: &str) -> bool {
        self.file_types.iter().any(|t| t == file_type)
    }
}

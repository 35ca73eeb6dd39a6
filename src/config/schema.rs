//! `.trellis.yml` schema.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::structure::StructureOptions;

/// Root of `.trellis.yml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ProjectConfig {
    /// Directory names the structure walk does not descend into.
    pub ignore: Vec<String>,

    /// Rule IDs whose issues are dropped from results.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub disabled_rules: Vec<String>,

    /// Naming convention settings.
    pub naming: NamingConfig,

    /// Which checks run.
    pub checks: ChecksConfig,

    /// Report defaults.
    pub report: ReportConfig,
}

fn default_ignore() -> Vec<String> {
    vec![".git".to_string(), "node_modules".to_string()]
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            ignore: default_ignore(),
            disabled_rules: Vec::new(),
            naming: NamingConfig::default(),
            checks: ChecksConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

/// Naming convention settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct NamingConfig {
    /// Names exempt from naming rules, in addition to the built-in list.
    pub allow: Vec<String>,
}

/// Toggles for the structure checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ChecksConfig {
    /// Check file and directory names.
    pub naming: bool,
    /// Check file permission bits (unix only).
    pub permissions: bool,
    /// Emit project-type layout recommendations.
    pub recommendations: bool,
    /// Directory whose files must carry the `.tmpl` suffix.
    pub templates_dir: PathBuf,
}

impl Default for ChecksConfig {
    fn default() -> Self {
        Self {
            naming: true,
            permissions: true,
            recommendations: true,
            templates_dir: PathBuf::from("templates"),
        }
    }
}

/// Report defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ReportConfig {
    /// Default format for `trellis validate --output` (json, html, markdown).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl ProjectConfig {
    /// Structure checker options derived from this config.
    pub fn structure_options(&self) -> StructureOptions {
        StructureOptions {
            ignore: self.ignore.clone(),
            naming_allow: self.naming.allow.clone(),
            naming: self.checks.naming,
            permissions: self.checks.permissions,
            recommendations: self.checks.recommendations,
            templates_dir: self.checks.templates_dir.clone(),
        }
    }

    /// JSON Schema of the config file.
    pub fn json_schema() -> serde_json::Value {
        serde_json::to_value(schemars::schema_for!(ProjectConfig)).unwrap_or_default()
    }
}

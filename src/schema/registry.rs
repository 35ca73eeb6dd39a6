//! Schema registry.
//!
//! The [`SchemaRegistry`] owns named [`ConfigSchema`]s and the per-file-type
//! rule catalog. It is a plain value: each caller constructs its own instance,
//! so there is no shared global state. The registry is not designed for
//! concurrent mutation; give each worker its own instance instead.

use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use super::builtin::{self, builtin_rules, builtin_schemas};
use super::types::{ConfigSchema, ValidationSchemaRule};
use super::validate::{compile_full_match, validate_against_schema};
use crate::error::{Result, TrellisError};
use crate::issue::ValidationResult;

/// Registry of configuration schemas and catalog rules.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<String, ConfigSchema>,
    rules: Vec<ValidationSchemaRule>,
}

impl SchemaRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry seeded with the built-in schemas and rule catalog.
    ///
    /// Seeding only populates this registry's own maps; calling it twice
    /// produces two equal, independent registries.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for (name, schema) in builtin_schemas() {
            registry.schemas.insert(name.to_string(), schema);
        }
        registry.rules = builtin_rules();
        registry
    }

    /// Look up a schema by file-type key.
    pub fn get(&self, name: &str) -> Option<&ConfigSchema> {
        self.schemas.get(name)
    }

    /// Register (or replace) a schema.
    ///
    /// Fails with [`TrellisError::InvalidSchema`] if a property pattern does
    /// not compile; the registry is left unchanged in that case.
    pub fn add(&mut self, name: impl Into<String>, schema: ConfigSchema) -> Result<()> {
        let name = name.into();
        for (prop, def) in &schema.properties {
            if let Some(pattern) = &def.pattern {
                compile_full_match(pattern).map_err(|e| TrellisError::InvalidSchema {
                    name: name.clone(),
                    message: format!("property '{}': {}", prop, e),
                })?;
            }
        }
        debug!("Registering schema {}", name);
        self.schemas.insert(name, schema);
        Ok(())
    }

    /// Remove a schema, returning it if it was registered.
    pub fn remove(&mut self, name: &str) -> Option<ConfigSchema> {
        debug!("Removing schema {}", name);
        self.schemas.remove(name)
    }

    /// Registered schema names in sorted order.
    pub fn list(&self) -> Vec<String> {
        self.schemas.keys().cloned().collect()
    }

    /// Number of registered schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Check if no schema is registered.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Validate `data` against the schema registered as `name`.
    pub fn validate(
        &self,
        name: &str,
        file: &Path,
        data: &Value,
        result: &mut ValidationResult,
    ) -> Result<()> {
        let schema = self.get(name).ok_or_else(|| TrellisError::SchemaNotFound {
            name: name.to_string(),
        })?;
        validate_against_schema(file, data, schema, result);
        Ok(())
    }

    /// Map a file path to the key of the schema that describes it.
    pub fn schema_key_for(&self, path: &Path) -> Option<&'static str> {
        let file_name = path.file_name()?.to_str()?;
        let key = match file_name {
            "package.json" => builtin::PACKAGE_JSON,
            "tsconfig.json" => builtin::TSCONFIG_JSON,
            ".eslintrc" | ".eslintrc.json" => builtin::ESLINTRC,
            "docker-compose.yml" | "docker-compose.yaml" | "compose.yml" | "compose.yaml" => {
                builtin::DOCKER_COMPOSE
            }
            name if (name.ends_with(".yml") || name.ends_with(".yaml"))
                && is_workflow_dir(path) =>
            {
                builtin::GITHUB_WORKFLOW
            }
            _ => return None,
        };
        self.schemas.contains_key(key).then_some(key)
    }

    /// Add a catalog rule.
    pub fn add_rule(&mut self, rule: ValidationSchemaRule) {
        self.rules.retain(|r| r.id != rule.id);
        self.rules.push(rule);
    }

    /// All catalog rules.
    pub fn rules(&self) -> &[ValidationSchemaRule] {
        &self.rules
    }

    /// Catalog rules bound to `file_type`, enabled or not.
    pub fn rules_for(&self, file_type: &str) -> Vec<&ValidationSchemaRule> {
        self.rules.iter().filter(|r| r.applies_to(file_type)).collect()
    }

    /// Enable a catalog rule. Returns false if no rule has this ID.
    pub fn enable_rule(&mut self, id: &str) -> bool {
        self.set_rule_enabled(id, true)
    }

    /// Disable a catalog rule. Returns false if no rule has this ID.
    pub fn disable_rule(&mut self, id: &str) -> bool {
        self.set_rule_enabled(id, false)
    }

    fn set_rule_enabled(&mut self, id: &str, enabled: bool) -> bool {
        match self.rules.iter_mut().find(|r| r.id == id) {
            Some(rule) => {
                rule.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Whether the catalog rule `id` exists and is enabled.
    pub fn is_rule_enabled(&self, id: &str) -> bool {
        self.rules.iter().any(|r| r.id == id && r.enabled)
    }

    /// Run the enabled catalog rules for `file_type` against `data`.
    pub fn evaluate_rules(
        &self,
        file_type: &str,
        file: &Path,
        data: &Value,
        result: &mut ValidationResult,
    ) {
        for rule in self.rules_for(file_type).into_iter().filter(|r| r.enabled) {
            result.extend(builtin::evaluate_builtin_rule(rule, file, data));
        }
    }
}

fn is_workflow_dir(path: &Path) -> bool {
    let mut parents = path.parent().into_iter().flat_map(|p| p.components().rev());
    let workflows = parents.next().map(|c| c.as_os_str() == "workflows");
    let github = parents.next().map(|c| c.as_os_str() == ".github");
    workflows == Some(true) && github == Some(true)
}

//! Project-level validation.
//!
//! [`ProjectValidator`] combines the structure walk, the format dispatcher,
//! schema validation and manifest checks into one [`ValidationResult`], then
//! drops issues from rules the project config disables.

use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::ProjectConfig;
use crate::error::Result;
use crate::formats::{self, manifest, FileKind};
use crate::issue::{rules, ValidationIssue, ValidationResult};
use crate::schema::{builtin, validate_against_schema, yaml_to_json, SchemaRegistry};
use crate::structure::{self, StructureChecker};

/// Root files checked by format and schema when present.
pub const KNOWN_ROOT_FILES: &[&str] = &[
    "package.json",
    "tsconfig.json",
    ".eslintrc.json",
    "docker-compose.yml",
    "docker-compose.yaml",
    "compose.yml",
    "compose.yaml",
    "Dockerfile",
    "Makefile",
    ".env",
    ".gitignore",
    ".dockerignore",
    "go.mod",
];

/// Validates a whole project.
#[derive(Debug, Clone)]
pub struct ProjectValidator {
    root: PathBuf,
    config: ProjectConfig,
    registry: SchemaRegistry,
}

impl ProjectValidator {
    /// Create a validator with default config and the built-in registry.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            config: ProjectConfig::default(),
            registry: SchemaRegistry::with_builtins(),
        }
    }

    /// Use `config`. Catalog rules listed in `disabled_rules` are toggled off.
    pub fn with_config(mut self, config: ProjectConfig) -> Self {
        for id in &config.disabled_rules {
            self.registry.disable_rule(id);
        }
        self.config = config;
        self
    }

    /// Use `registry` instead of the built-in one.
    pub fn with_registry(mut self, registry: SchemaRegistry) -> Self {
        self.registry = registry;
        for id in &self.config.disabled_rules {
            self.registry.disable_rule(id);
        }
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Project-relative paths of the known files present in the project.
    pub fn known_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = KNOWN_ROOT_FILES
            .iter()
            .map(PathBuf::from)
            .filter(|rel| self.root.join(rel).is_file())
            .collect();

        let workflows = Path::new(".github").join("workflows");
        if let Ok(dir) = std::fs::read_dir(self.root.join(&workflows)) {
            let mut found: Vec<PathBuf> = dir
                .filter_map(|entry| entry.ok())
                .map(|entry| workflows.join(entry.file_name()))
                .filter(|rel| matches!(FileKind::detect(rel), FileKind::Yaml))
                .collect();
            found.sort();
            files.extend(found);
        }

        files
    }

    /// Validate the whole project: structure plus every known file.
    pub fn validate(&self) -> Result<ValidationResult> {
        info!("Validating {}", self.root.display());
        let checker =
            StructureChecker::new(&self.root).with_options(self.config.structure_options());
        let (entries, mut issues) = checker.inspect()?;

        for rel in self.known_files() {
            issues.extend(self.check_file(&rel).issues().iter().cloned());
        }

        let issues = issues.into_iter().filter(|i| !self.is_disabled(i));
        Ok(structure::tally(&entries, issues))
    }

    /// Validate explicit files only, without the structure walk.
    pub fn validate_files(&self, files: &[PathBuf]) -> ValidationResult {
        let mut result = ValidationResult::new();
        for file in files {
            result.merge(self.check_file(file));
        }
        result.without_rules(&self.config.disabled_rules)
    }

    fn is_disabled(&self, issue: &ValidationIssue) -> bool {
        self.config
            .disabled_rules
            .iter()
            .any(|d| issue.rule == d.as_str())
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Check one file by format, schema and manifest rules.
    ///
    /// `path` labels the issues and is resolved against the root for reading.
    /// The result counts exactly one file.
    pub fn check_file(&self, path: &Path) -> ValidationResult {
        let text = match std::fs::read_to_string(self.resolve(path)) {
            Ok(text) => text,
            Err(e) => {
                let mut result = ValidationResult::new();
                result.push(
                    ValidationIssue::error(rules::FORMAT_READ, format!("Cannot read file: {}", e))
                        .in_file(path),
                );
                result.record_file(false);
                return result;
            }
        };

        let issues = self.file_issues(path, &text);
        let mut result = ValidationResult::new();
        result.extend(issues);
        result.record_file(result.is_valid());
        result
    }

    fn file_issues(&self, path: &Path, text: &str) -> Vec<ValidationIssue> {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();

        // Manifests without a registered schema fall back to the minimum checks.
        if name == "go.mod" {
            return manifest::check_go_mod(path, text);
        }
        if name == "package.json" && self.registry.get(builtin::PACKAGE_JSON).is_none() {
            return manifest::check_package_json(path, text);
        }

        let kind = FileKind::detect(path);
        let format_result = formats::validate_content(kind, path, text);
        let mut issues = format_result.issues().to_vec();

        if !format_result.is_valid() {
            return issues;
        }

        if let Some(key) = self.registry.schema_key_for(path) {
            if let Some(data) = parse_data(kind, text) {
                debug!("Applying schema {} to {}", key, path.display());
                let mut schema_result = ValidationResult::new();
                if let Some(schema) = self.registry.get(key) {
                    validate_against_schema(path, &data, schema, &mut schema_result);
                }
                self.registry.evaluate_rules(key, path, &data, &mut schema_result);
                issues.extend(schema_result.issues().iter().cloned());
            }
        }

        issues
    }
}

/// Parse JSON or single-document YAML into a JSON value for schema checks.
fn parse_data(kind: FileKind, text: &str) -> Option<Value> {
    match kind {
        FileKind::Json => serde_json::from_str(text).ok(),
        FileKind::Yaml => serde_yaml::from_str::<serde_yaml::Value>(text)
            .ok()
            .and_then(|v| yaml_to_json(v).ok()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChecksConfig;
    use std::fs;
    use tempfile::TempDir;

    fn quiet_config() -> ProjectConfig {
        ProjectConfig {
            checks: ChecksConfig {
                permissions: false,
                ..ChecksConfig::default()
            },
            ..ProjectConfig::default()
        }
    }

    fn scaffold() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("README.md"), "# demo\n").unwrap();
        fs::write(temp.path().join("LICENSE"), "MIT\n").unwrap();
        fs::write(
            temp.path().join(".gitignore"),
            "node_modules/\n*.log\n.env\ndist/\nbuild/\n",
        )
        .unwrap();
        temp
    }

    #[test]
    fn clean_project_is_valid() {
        let temp = scaffold();
        let result = ProjectValidator::new(temp.path())
            .with_config(quiet_config())
            .validate()
            .unwrap();

        assert!(result.is_valid(), "{:?}", result.issues());
        assert!(result.issues().is_empty());
        assert_eq!(result.summary().total_files, 3);
    }

    #[test]
    fn package_json_gets_schema_and_catalog_checks() {
        let temp = scaffold();
        fs::write(temp.path().join("package.json"), r#"{"name": "demo"}"#).unwrap();
        fs::create_dir(temp.path().join("src")).unwrap();

        let result = ProjectValidator::new(temp.path())
            .with_config(quiet_config())
            .validate()
            .unwrap();

        assert!(!result.is_valid());
        assert_eq!(result.summary().missing_required, 1);
        assert!(result.has_rule("package.scripts.test"));
        assert_eq!(result.summary().valid_files, 3);
    }

    #[test]
    fn disabled_rules_are_filtered() {
        let temp = scaffold();
        fs::remove_file(temp.path().join("LICENSE")).unwrap();
        fs::write(temp.path().join("tsconfig.json"), r#"{"include": ["src"]}"#).unwrap();

        let config = ProjectConfig {
            disabled_rules: vec![
                rules::LICENSE_REQUIRED.to_string(),
                "tsconfig.strict".to_string(),
            ],
            ..quiet_config()
        };
        let validator = ProjectValidator::new(temp.path()).with_config(config);
        assert!(!validator.registry().is_rule_enabled("tsconfig.strict"));

        let result = validator.validate().unwrap();
        assert!(result.is_valid());
        assert!(!result.has_rule(rules::LICENSE_REQUIRED));
        assert!(!result.has_rule("tsconfig.strict"));
    }

    #[test]
    fn dockerfile_and_env_are_dispatched() {
        let temp = scaffold();
        fs::write(temp.path().join("Dockerfile"), "FROM node:18\nCOPY . .\n").unwrap();
        fs::write(temp.path().join(".env"), "TOKEN=abcdefghijklmnopqrstuvwxyz\n").unwrap();

        let result = ProjectValidator::new(temp.path())
            .with_config(quiet_config())
            .validate()
            .unwrap();

        assert!(result.has_rule(rules::DOCKER_WORKDIR_MISSING));
        assert!(result.has_rule(rules::ENV_VALUE_UNQUOTED));
    }

    #[test]
    fn workflows_are_discovered() {
        let temp = scaffold();
        fs::create_dir_all(temp.path().join(".github/workflows")).unwrap();
        fs::write(
            temp.path().join(".github/workflows/ci.yml"),
            "name: CI\non: push\n",
        )
        .unwrap();

        let validator = ProjectValidator::new(temp.path()).with_config(quiet_config());
        assert_eq!(
            validator.known_files().last(),
            Some(&PathBuf::from(".github/workflows/ci.yml"))
        );

        let result = validator.validate().unwrap();
        assert!(result.issues().iter().any(|i| i.rule == rules::SCHEMA_MISSING_REQUIRED
            && i.file == Path::new(".github/workflows/ci.yml")));
    }

    #[test]
    fn syntax_errors_skip_schema() {
        let temp = scaffold();
        fs::write(temp.path().join("package.json"), "{ broken").unwrap();

        let result = ProjectValidator::new(temp.path())
            .with_config(quiet_config())
            .check_file(Path::new("package.json"));

        assert_eq!(result.issues().len(), 1);
        assert!(result.has_rule(rules::JSON_SYNTAX));
    }

    #[test]
    fn manifest_fallback_without_schema() {
        let temp = scaffold();
        fs::write(temp.path().join("package.json"), "{}").unwrap();
        let mut registry = SchemaRegistry::with_builtins();
        registry.remove(builtin::PACKAGE_JSON);

        let result = ProjectValidator::new(temp.path())
            .with_registry(registry)
            .check_file(Path::new("package.json"));

        assert!(result.has_rule(rules::PACKAGE_NAME_REQUIRED));
        assert!(result.has_rule(rules::PACKAGE_VERSION_REQUIRED));
    }

    #[test]
    fn go_mod_uses_manifest_checks() {
        let temp = scaffold();
        fs::write(temp.path().join("go.mod"), "module example.com/app\n").unwrap();

        let result = ProjectValidator::new(temp.path()).check_file(Path::new("go.mod"));
        assert!(result.has_rule(rules::GOMOD_GO_MISSING));
        assert_eq!(result.summary().total_files, 1);
    }

    #[test]
    fn unreadable_file_is_reported() {
        let temp = scaffold();
        let result = ProjectValidator::new(temp.path()).validate_files(&[PathBuf::from("nope.yml")]);
        assert!(result.has_rule(rules::FORMAT_READ));
        assert!(!result.is_valid());
    }
}

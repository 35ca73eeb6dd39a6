//! Built-in schemas and rule catalog.
//!
//! Five schemas are registered on construction of a default registry:
//! `package.json`, `tsconfig.json`, `.eslintrc.json`, `docker-compose.yml` and
//! `github-workflow`. Each file type also gets a starter catalog of
//! [`ValidationSchemaRule`]s; the checks behind those rules live in
//! [`evaluate_builtin_rule`].

use serde_json::Value;
use std::path::Path;

use super::types::{ConfigSchema, PropertySchema, RuleCategory, ValidationSchemaRule};
use crate::issue::{Severity, ValidationIssue};

pub const PACKAGE_JSON: &str = "package.json";
pub const TSCONFIG_JSON: &str = "tsconfig.json";
pub const ESLINTRC: &str = ".eslintrc.json";
pub const DOCKER_COMPOSE: &str = "docker-compose.yml";
pub const GITHUB_WORKFLOW: &str = "github-workflow";

/// npm package name, optionally scoped.
pub const PACKAGE_NAME_PATTERN: &str = r"^(@[a-z0-9\-~][a-z0-9\-._~]*/)?[a-z0-9\-~][a-z0-9\-._~]*$";

/// Semantic version with optional pre-release and build metadata.
pub const SEMVER_PATTERN: &str =
    r"^\d+\.\d+\.\d+(-[0-9A-Za-z\-.]+)?(\+[0-9A-Za-z\-.]+)?$";

/// All built-in schemas as `(key, schema)` pairs.
pub fn builtin_schemas() -> Vec<(&'static str, ConfigSchema)> {
    vec![
        (PACKAGE_JSON, package_json_schema()),
        (TSCONFIG_JSON, tsconfig_schema()),
        (ESLINTRC, eslint_schema()),
        (DOCKER_COMPOSE, docker_compose_schema()),
        (GITHUB_WORKFLOW, github_workflow_schema()),
    ]
}

fn package_json_schema() -> ConfigSchema {
    ConfigSchema::new("package.json", "Node.js package manifest")
        .require(["name", "version"])
        .property(
            "name",
            PropertySchema::string()
                .with_description("Package name")
                .with_length(Some(1), Some(214))
                .with_pattern(PACKAGE_NAME_PATTERN),
        )
        .property(
            "version",
            PropertySchema::string()
                .with_description("Semantic version")
                .with_pattern(SEMVER_PATTERN),
        )
        .property("description", PropertySchema::string())
        .property("main", PropertySchema::string())
        .property("license", PropertySchema::string())
        .property(
            "type",
            PropertySchema::string().with_enum(["module", "commonjs"]),
        )
        .property("private", PropertySchema::boolean())
        .property("keywords", PropertySchema::array())
        .property("files", PropertySchema::array())
        .property("scripts", PropertySchema::object())
        .property("dependencies", PropertySchema::object())
        .property("devDependencies", PropertySchema::object())
        .property("peerDependencies", PropertySchema::object())
        .property("engines", PropertySchema::object())
}

fn tsconfig_schema() -> ConfigSchema {
    ConfigSchema::new("tsconfig.json", "TypeScript compiler configuration")
        .property("compilerOptions", PropertySchema::object())
        .property("extends", PropertySchema::string())
        .property("include", PropertySchema::array())
        .property("exclude", PropertySchema::array())
        .property("files", PropertySchema::array())
        .property("references", PropertySchema::array())
}

fn eslint_schema() -> ConfigSchema {
    ConfigSchema::new(".eslintrc.json", "ESLint configuration")
        .property("root", PropertySchema::boolean())
        .property("env", PropertySchema::object())
        .property("globals", PropertySchema::object())
        .property("parser", PropertySchema::string())
        .property("parserOptions", PropertySchema::object())
        .property("plugins", PropertySchema::array())
        .property("rules", PropertySchema::object())
        .property("overrides", PropertySchema::array())
        .property("ignorePatterns", PropertySchema::array())
}

fn docker_compose_schema() -> ConfigSchema {
    ConfigSchema::new("docker-compose.yml", "Docker Compose application definition")
        .require(["services"])
        .property(
            "version",
            PropertySchema::string().with_pattern(r"^\d+(\.\d+)?$"),
        )
        .property("name", PropertySchema::string())
        .property("services", PropertySchema::object())
        .property("volumes", PropertySchema::object())
        .property("networks", PropertySchema::object())
        .property("configs", PropertySchema::object())
        .property("secrets", PropertySchema::object())
}

fn github_workflow_schema() -> ConfigSchema {
    ConfigSchema::new("GitHub workflow", "GitHub Actions CI workflow")
        .require(["on", "jobs"])
        .property("name", PropertySchema::string().with_length(Some(1), None))
        .property("jobs", PropertySchema::object())
        .property("env", PropertySchema::object())
        .property("defaults", PropertySchema::object())
        .property("concurrency", PropertySchema::object())
}

/// The starter rule catalog.
pub fn builtin_rules() -> Vec<ValidationSchemaRule> {
    vec![
        ValidationSchemaRule::new(
            "package.scripts.test",
            "Test script",
            "Define a `test` script so CI can run the suite",
            PACKAGE_JSON,
            RuleCategory::BestPractice,
            Severity::Info,
        ),
        ValidationSchemaRule::new(
            "package.license",
            "License field",
            "Declare the package license",
            PACKAGE_JSON,
            RuleCategory::BestPractice,
            Severity::Warning,
        ),
        ValidationSchemaRule::new(
            "package.description",
            "Description field",
            "Describe the package in one line",
            PACKAGE_JSON,
            RuleCategory::Style,
            Severity::Info,
        ),
        ValidationSchemaRule::new(
            "tsconfig.strict",
            "Strict mode",
            "Recommend strict TypeScript mode (`compilerOptions.strict: true`)",
            TSCONFIG_JSON,
            RuleCategory::BestPractice,
            Severity::Info,
        ),
        ValidationSchemaRule::new(
            "tsconfig.include",
            "Explicit inputs",
            "Declare `include` or `files` so the compiler does not scan the whole tree",
            TSCONFIG_JSON,
            RuleCategory::Structure,
            Severity::Info,
        ),
        ValidationSchemaRule::new(
            "eslint.root",
            "Root config",
            "Set `root: true` to stop ESLint searching parent directories",
            ESLINTRC,
            RuleCategory::BestPractice,
            Severity::Info,
        ),
        ValidationSchemaRule::new(
            "compose.restart-policy",
            "Restart policy",
            "Give every service an explicit `restart` policy",
            DOCKER_COMPOSE,
            RuleCategory::BestPractice,
            Severity::Info,
        ),
        ValidationSchemaRule::new(
            "compose.image-tag",
            "Pinned images",
            "Pin service images to a tag other than `latest`",
            DOCKER_COMPOSE,
            RuleCategory::Security,
            Severity::Warning,
        ),
        ValidationSchemaRule::new(
            "workflow.name",
            "Workflow name",
            "Name the workflow so it is recognisable in the Actions tab",
            GITHUB_WORKFLOW,
            RuleCategory::Style,
            Severity::Info,
        ),
        ValidationSchemaRule::new(
            "workflow.timeout",
            "Job timeouts",
            "Set `timeout-minutes` on every job",
            GITHUB_WORKFLOW,
            RuleCategory::BestPractice,
            Severity::Info,
        ),
    ]
}

/// Run the check behind a built-in catalog rule.
///
/// Returns no issues for rule IDs without a built-in check, so custom catalog
/// entries added at runtime are metadata only.
pub fn evaluate_builtin_rule(
    rule: &ValidationSchemaRule,
    file: &Path,
    data: &Value,
) -> Vec<ValidationIssue> {
    let issue = |message: String| {
        ValidationIssue::new(rule.id.as_str(), rule.severity, message).in_file(file)
    };

    match rule.id.as_str() {
        "package.scripts.test" => {
            if data.pointer("/scripts/test").is_none() {
                return vec![issue("package.json has no `test` script".to_string())];
            }
        }
        "package.license" => {
            if data.get("license").is_none() {
                return vec![issue("package.json does not declare a license".to_string())];
            }
        }
        "package.description" => {
            if data.get("description").is_none() {
                return vec![issue("package.json has no description".to_string())];
            }
        }
        "tsconfig.strict" => {
            if data.pointer("/compilerOptions/strict") != Some(&Value::Bool(true)) {
                return vec![issue(
                    "Enable `compilerOptions.strict` for strict type checking".to_string(),
                )];
            }
        }
        "tsconfig.include" => {
            if data.get("include").is_none() && data.get("files").is_none() {
                return vec![issue(
                    "tsconfig.json declares neither `include` nor `files`".to_string(),
                )];
            }
        }
        "eslint.root" => {
            if data.get("root") != Some(&Value::Bool(true)) {
                return vec![issue("Set `root: true` in the ESLint config".to_string())];
            }
        }
        "compose.restart-policy" => {
            return services(data)
                .filter(|(_, svc)| svc.get("restart").is_none())
                .map(|(name, _)| issue(format!("Service '{}' has no restart policy", name)))
                .collect();
        }
        "compose.image-tag" => {
            return services(data)
                .filter_map(|(name, svc)| {
                    let image = svc.get("image")?.as_str()?;
                    let unpinned = match image.rsplit_once(':') {
                        Some((_, tag)) => tag == "latest" || tag.contains('/'),
                        None => true,
                    };
                    unpinned.then(|| {
                        issue(format!(
                            "Service '{}' uses unpinned image '{}'",
                            name, image
                        ))
                    })
                })
                .collect();
        }
        "workflow.name" => {
            if data.get("name").is_none() {
                return vec![issue("Workflow has no name".to_string())];
            }
        }
        "workflow.timeout" => {
            if let Some(jobs) = data.get("jobs").and_then(Value::as_object) {
                return jobs
                    .iter()
                    .filter(|(_, job)| job.get("timeout-minutes").is_none())
                    .map(|(name, _)| issue(format!("Job '{}' has no timeout-minutes", name)))
                    .collect();
            }
        }
        _ => {}
    }

    Vec::new()
}

fn services(data: &Value) -> impl Iterator<Item = (&String, &Value)> {
    data.get("services")
        .and_then(Value::as_object)
        .into_iter()
        .flat_map(|s| s.iter())
}

//! Package manifest checks for `package.json` and `go.mod`.
//!
//! These complement the generic JSON checker and the `package.json` schema
//! with the minimum markers a scaffolded project must carry.

use serde_json::Value;
use std::path::Path;

use crate::issue::{rules, ValidationIssue};
use crate::schema::validate_package_name;

/// Check a `package.json` manifest.
pub fn check_package_json(path: &Path, text: &str) -> Vec<ValidationIssue> {
    let data: Value = match serde_json::from_str(text) {
        Ok(data) => data,
        Err(e) => {
            return vec![ValidationIssue::error(
                rules::PACKAGE_SYNTAX,
                format!("package.json is not valid JSON: {}", e),
            )
            .in_file(path)];
        }
    };

    let mut issues = Vec::new();

    match data.get("name") {
        None => issues.push(
            ValidationIssue::error(rules::PACKAGE_NAME_REQUIRED, "package.json has no name")
                .in_file(path),
        ),
        Some(Value::String(name)) => {
            if let Err(e) = check_name(name) {
                issues.push(
                    ValidationIssue::error(rules::PACKAGE_NAME_FORMAT, e.to_string())
                        .in_file(path)
                        .with_suggestion(name.to_lowercase().replace(' ', "-")),
                );
            }
        }
        // Non-string names are reported by the schema as type errors.
        Some(_) => {}
    }

    match data.get("version") {
        None => issues.push(
            ValidationIssue::error(rules::PACKAGE_VERSION_REQUIRED, "package.json has no version")
                .in_file(path),
        ),
        Some(Value::String(v)) if v.trim().is_empty() => issues.push(
            ValidationIssue::error(rules::PACKAGE_VERSION_EMPTY, "package.json version is empty")
                .in_file(path),
        ),
        Some(_) => {}
    }

    issues
}

/// Validate a possibly scoped (`@scope/name`) package name.
fn check_name(name: &str) -> crate::Result<()> {
    match name.strip_prefix('@').and_then(|rest| rest.split_once('/')) {
        Some((scope, pkg)) => {
            validate_package_name(scope)?;
            validate_package_name(pkg)
        }
        None => validate_package_name(name),
    }
}

/// Check a `go.mod` file.
pub fn check_go_mod(path: &Path, text: &str) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    // A directive is its keyword followed by whitespace or the end of the line.
    let directive = |name: &str| {
        text.lines().enumerate().find_map(|(idx, line)| {
            let rest = line.trim_start().strip_prefix(name)?;
            (rest.is_empty() || rest.starts_with(char::is_whitespace))
                .then(|| (idx + 1, rest.trim().to_string()))
        })
    };

    if !matches!(directive("module"), Some((_, module)) if !module.is_empty()) {
        issues.push(
            ValidationIssue::error(rules::GOMOD_MODULE_MISSING, "go.mod has no module directive")
                .in_file(path),
        );
    }

    match directive("go") {
        None => issues.push(
            ValidationIssue::error(rules::GOMOD_GO_MISSING, "go.mod has no go version directive")
                .in_file(path),
        ),
        Some((line, version)) if version.is_empty() || version == "1" => issues.push(
            ValidationIssue::error(
                rules::GOMOD_GO_INVALID,
                format!("go.mod declares an invalid go version '{}'", version),
            )
            .in_file(path)
            .at_line(line),
        ),
        Some(_) => {}
    }

    issues
}

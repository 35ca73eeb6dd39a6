//! Makefile checker.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

use crate::issue::{rules, ValidationIssue};

/// A rule line: `targets: prerequisites`, excluding `:=` / `::=` assignments.
static RULE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^\s:=#][^:=#]*?)\s*::?(?:$|[^=:])").expect("valid rule regex")
});

/// A line opening with a make function call such as `$(info ...)`.
static FUNCTION_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\$[({][a-z-]+\s").expect("valid function call regex"));

/// The target list of a rule line, or `None` for any other line.
fn rule_targets(line: &str) -> Option<&str> {
    if FUNCTION_CALL.is_match(line) {
        return None;
    }
    RULE_LINE.captures(line).and_then(|caps| caps.get(1)).map(|m| m.as_str())
}

/// Targets declared by rule lines, in declaration order.
///
/// Special targets (those starting with `.`) and targets named by a
/// variable reference are not included.
pub fn targets(text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for line in text.lines() {
        let Some(names) = rule_targets(line) else {
            continue;
        };
        for name in names.split_whitespace() {
            if !name.starts_with(['.', '$']) && !found.iter().any(|t| t == name) {
                found.push(name.to_string());
            }
        }
    }
    found
}

/// Check targets, recipe indentation and the `.PHONY` declaration.
pub fn check(path: &Path, text: &str) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let declared = targets(text);

    if declared.is_empty() {
        issues.push(
            ValidationIssue::error(rules::MAKEFILE_TARGETS_MISSING, "Makefile declares no targets")
                .in_file(path),
        );
    }

    let mut in_recipe = false;
    let mut continued = false;
    for (idx, line) in text.lines().enumerate() {
        let was_continued = continued;
        continued = line.ends_with('\\');

        if line.trim().is_empty() {
            continue;
        }

        if line.starts_with('\t') {
            continue;
        }

        if line.starts_with(' ') {
            if in_recipe && !was_continued && !line.trim_start().starts_with('#') {
                issues.push(
                    ValidationIssue::error(
                        rules::MAKEFILE_RECIPE_INDENT,
                        "Recipe line is indented with spaces instead of a tab",
                    )
                    .in_file(path)
                    .at_line(idx + 1)
                    .fixable()
                    .with_suggestion(format!("\t{}", line.trim_start())),
                );
            }
            continue;
        }

        in_recipe = rule_targets(line).is_some();
    }

    if !declared.is_empty() && !text.lines().any(|l| l.starts_with(".PHONY")) {
        issues.push(
            ValidationIssue::info(
                rules::MAKEFILE_PHONY_MISSING,
                "Makefile does not declare its targets as .PHONY",
            )
            .in_file(path)
            .at_line(1)
            .fixable()
            .with_suggestion(format!(".PHONY: {}", declared.join(" "))),
        );
    }

    issues
}

//! Dockerfile checker.
//!
//! Instruction presence is a substring search, not a Dockerfile parser.

use std::path::Path;

use crate::issue::{rules, ValidationIssue};

/// Instruction inserted by the WORKDIR fix.
pub const DEFAULT_WORKDIR: &str = "WORKDIR /app";

/// Check that `FROM`, `WORKDIR` and `COPY` each appear at least once.
///
/// Every missing instruction is a separate error. A missing `WORKDIR` is
/// fixable when a `FROM` line exists to insert it after.
pub fn check(path: &Path, text: &str) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if !text.contains("FROM ") {
        issues.push(
            ValidationIssue::error(rules::DOCKER_FROM_MISSING, "Dockerfile has no FROM instruction")
                .in_file(path),
        );
    }

    if !text.contains("WORKDIR ") {
        let issue = ValidationIssue::error(
            rules::DOCKER_WORKDIR_MISSING,
            "Dockerfile has no WORKDIR instruction",
        )
        .in_file(path);

        issues.push(match from_line(text) {
            Some(line) => issue
                .at_line(line + 1)
                .fixable()
                .with_suggestion(DEFAULT_WORKDIR),
            None => issue,
        });
    }

    if !text.contains("COPY ") {
        issues.push(
            ValidationIssue::error(rules::DOCKER_COPY_MISSING, "Dockerfile has no COPY instruction")
                .in_file(path),
        );
    }

    issues
}

/// 1-based line of the first `FROM` instruction.
fn from_line(text: &str) -> Option<usize> {
    text.lines()
        .position(|l| l.trim_start().starts_with("FROM "))
        .or_else(|| text.lines().position(|l| l.contains("FROM ")))
        .map(|idx| idx + 1)
}

//! JSON syntax checker.

use serde_json::Value;
use std::path::Path;

use crate::issue::{rules, ValidationIssue};

/// Check that `text` parses as JSON.
///
/// A syntax failure is a single error carrying the parser's message and
/// line. Success yields no issues.
pub fn check(path: &Path, text: &str) -> Vec<ValidationIssue> {
    match serde_json::from_str::<Value>(text) {
        Ok(_) => Vec::new(),
        Err(e) => vec![syntax_issue(path, &e)],
    }
}

fn syntax_issue(path: &Path, err: &serde_json::Error) -> ValidationIssue {
    let issue = ValidationIssue::error(rules::JSON_SYNTAX, format!("Invalid JSON: {}", err))
        .in_file(path);
    if err.line() > 0 {
        issue.at_line(err.line())
    } else {
        issue
    }
}

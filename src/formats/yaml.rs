//! YAML syntax checker.

use serde::Deserialize;
use std::path::Path;

use crate::issue::{rules, ValidationIssue};

/// Check that every document in `text` parses as YAML.
///
/// Parsing stops at the first broken document; later documents are not
/// reported separately.
pub fn check(path: &Path, text: &str) -> Vec<ValidationIssue> {
    for document in serde_yaml::Deserializer::from_str(text) {
        if let Err(e) = serde_yaml::Value::deserialize(document) {
            let issue = ValidationIssue::error(rules::YAML_SYNTAX, format!("Invalid YAML: {}", e))
                .in_file(path);
            let issue = match e.location() {
                Some(loc) => issue.at_line(loc.line()),
                None => issue,
            };
            return vec![issue];
        }
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_yaml_has_no_issues() {
        let text = "services:\n  web:\n    image: nginx:1.25\n";
        assert!(check(Path::new("compose.yml"), text).is_empty());
    }

    #[test]
    fn empty_yaml_is_valid() {
        assert!(check(Path::new("empty.yml"), "").is_empty());
    }

    #[test]
    fn syntax_error_is_one_error() {
        let issues = check(Path::new("bad.yml"), "key: [unclosed\nother: 1\n");
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
        assert_eq!(issues[0].rule, rules::YAML_SYNTAX);
    }

    #[test]
    fn later_documents_are_checked() {
        let text = "a: 1\n---\nb: [oops\n";
        let issues = check(Path::new("multi.yml"), text);
        assert_eq!(issues.len(), 1);
    }

    #[test]
    fn multiple_valid_documents() {
        assert!(check(Path::new("multi.yml"), "a: 1\n---\nb: 2\n").is_empty());
    }
}

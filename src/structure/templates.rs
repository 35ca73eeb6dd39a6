//! Template directory conventions.

use std::path::Path;

use super::walk::Entry;
use crate::issue::{rules, ValidationIssue};

/// Suffix every file under the templates directory must carry.
pub const TEMPLATE_SUFFIX: &str = ".tmpl";

/// Flag files under `templates_dir` that lack the template suffix.
pub fn check(entries: &[Entry], templates_dir: &Path) -> Vec<ValidationIssue> {
    entries
        .iter()
        .filter(|e| !e.is_dir && e.is_under(templates_dir))
        .filter(|e| !e.name().ends_with(TEMPLATE_SUFFIX))
        .map(|e| {
            ValidationIssue::warning(
                rules::TEMPLATE_FILE_EXTENSION,
                format!("Template {} should end with {}", e.path.display(), TEMPLATE_SUFFIX),
            )
            .in_file(&e.path)
            .fixable()
            .with_suggestion(format!("{}{}", e.name(), TEMPLATE_SUFFIX))
        })
        .collect()
}

//! Required root files.

use std::io::ErrorKind;
use std::path::Path;

use crate::error::{Result, TrellisError};
use crate::issue::{rules, ValidationIssue};

/// Files every project root must contain, with the rule reporting each.
pub const REQUIRED_FILES: &[(&str, &str)] = &[
    ("README.md", rules::README_REQUIRED),
    ("LICENSE", rules::LICENSE_REQUIRED),
    (".gitignore", rules::GITIGNORE_REQUIRED),
];

/// One fixable error per missing required file.
///
/// Only "not found" counts as missing; any other stat failure is returned.
pub fn check(root: &Path) -> Result<Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    for (name, rule) in REQUIRED_FILES {
        let path = root.join(name);
        match std::fs::symlink_metadata(&path) {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => issues.push(
                ValidationIssue::error(*rule, format!("Required file {} is missing", name))
                    .in_file(name)
                    .fixable(),
            ),
            Err(source) => return Err(TrellisError::Walk { path, source }),
        }
    }

    Ok(issues)
}

//! File permission checks (unix only).

use super::walk::Entry;
use crate::issue::{rules, ValidationIssue};

/// Any group or other permission bit.
pub const GROUP_OTHER_MASK: u32 = 0o077;

/// Any executable bit.
pub const EXEC_MASK: u32 = 0o111;

/// Extensions that should never carry an executable bit.
pub const NON_EXECUTABLE_EXTENSIONS: &[&str] = &[
    "md", "txt", "json", "yaml", "yml", "xml", "html", "css", "js", "ts",
];

/// Check the permission bits of one non-directory entry.
///
/// Entries without a mode (non-unix platforms) are never flagged.
pub fn check(entry: &Entry) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let Some(mode) = entry.mode else {
        return issues;
    };
    if entry.is_dir {
        return issues;
    }

    if mode & GROUP_OTHER_MASK != 0 {
        issues.push(
            ValidationIssue::warning(
                rules::FILE_PERMISSIONS,
                format!(
                    "{} is accessible beyond its owner (mode {:o})",
                    entry.path.display(),
                    mode
                ),
            )
            .in_file(&entry.path)
            .with_suggestion(format!("chmod 600 {}", entry.path.display())),
        );
    }

    let ext = entry
        .path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);
    let plain_file = ext.is_some_and(|e| NON_EXECUTABLE_EXTENSIONS.contains(&e.as_str()));
    if mode & EXEC_MASK != 0 && plain_file {
        issues.push(
            ValidationIssue::info(
                rules::FILE_EXECUTABLE,
                format!("{} is executable but does not look like a program", entry.path.display()),
            )
            .in_file(&entry.path)
            .with_suggestion(format!("chmod -x {}", entry.path.display())),
        );
    }

    issues
}

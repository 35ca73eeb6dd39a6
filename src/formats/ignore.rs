//! `.gitignore` / `.dockerignore` heuristics.
//!
//! These files are never invalid. Each common pattern that is absent
//! produces one info issue. Every such issue suggests the same edit, which
//! appends all missing patterns in their listed order, so a batch fix
//! applies it once.

use std::path::Path;

use crate::issue::{rules, ValidationIssue};

/// Patterns every `.gitignore` is expected to carry.
pub const GITIGNORE_PATTERNS: &[&str] = &["node_modules/", "*.log", ".env", "dist/", "build/"];

/// Patterns every `.dockerignore` is expected to carry.
pub const DOCKERIGNORE_PATTERNS: &[&str] =
    &["node_modules", ".git", "*.md", "Dockerfile", ".dockerignore"];

/// Which ignore file is being checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreKind {
    Git,
    Docker,
}

impl IgnoreKind {
    /// Expected patterns for this kind.
    pub fn patterns(self) -> &'static [&'static str] {
        match self {
            IgnoreKind::Git => GITIGNORE_PATTERNS,
            IgnoreKind::Docker => DOCKERIGNORE_PATTERNS,
        }
    }

    fn rule(self) -> &'static str {
        match self {
            IgnoreKind::Git => rules::GITIGNORE_PATTERN_MISSING,
            IgnoreKind::Docker => rules::DOCKERIGNORE_PATTERN_MISSING,
        }
    }

    fn file_name(self) -> &'static str {
        match self {
            IgnoreKind::Git => ".gitignore",
            IgnoreKind::Docker => ".dockerignore",
        }
    }
}

/// Whether `text` already ignores `pattern`.
///
/// A trailing `/` is not significant, so `dist` satisfies `dist/`.
pub fn has_pattern(text: &str, pattern: &str) -> bool {
    let wanted = pattern.trim_end_matches('/');
    text.lines()
        .map(str::trim)
        .any(|line| line.trim_end_matches('/') == wanted)
}

/// Report each expected pattern missing from `text`.
pub fn check(kind: IgnoreKind, path: &Path, text: &str) -> Vec<ValidationIssue> {
    let append_at = text.lines().count() + 1;
    let missing: Vec<&str> = kind
        .patterns()
        .iter()
        .copied()
        .filter(|pattern| !has_pattern(text, pattern))
        .collect();
    let appended = missing.join("\n");

    missing
        .iter()
        .map(|pattern| {
            ValidationIssue::info(
                kind.rule(),
                format!("{} does not ignore {}", kind.file_name(), pattern),
            )
            .in_file(path)
            .at_line(append_at)
            .fixable()
            .with_suggestion(appended.clone())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_gitignore_is_clean() {
        let text = "node_modules/\n*.log\n.env\ndist/\nbuild/\n";
        assert!(check(IgnoreKind::Git, Path::new(".gitignore"), text).is_empty());
    }

    #[test]
    fn one_info_per_missing_pattern() {
        let issues = check(IgnoreKind::Git, Path::new(".gitignore"), "node_modules\n*.log\n");

        assert_eq!(issues.len(), 3);
        assert!(issues.iter().all(|i| !i.is_error() && i.fixable));
        assert!(issues.iter().all(|i| i.line == Some(3)));
        assert!(issues[0].message.ends_with(".env"));
        assert!(issues
            .iter()
            .all(|i| i.suggestion.as_deref() == Some(".env\ndist/\nbuild/")));
    }

    #[test]
    fn empty_dockerignore_reports_all() {
        let issues = check(IgnoreKind::Docker, Path::new(".dockerignore"), "");
        assert_eq!(issues.len(), DOCKERIGNORE_PATTERNS.len());
        assert_eq!(issues[0].line, Some(1));
        assert_eq!(issues[0].rule, rules::DOCKERIGNORE_PATTERN_MISSING);
    }

    #[test]
    fn similar_names_do_not_count() {
        assert!(!has_pattern(".env.local\n", ".env"));
        assert!(has_pattern("  .env  \n", ".env"));
    }
}

//! Validation issues.
//!
//! A [`ValidationIssue`] is created by exactly one checker and never mutated
//! once it has been pushed into a [`ValidationResult`](super::ValidationResult).
//! The builder methods below consume and return the issue so it is fully
//! formed before it is emitted.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::severity::{RuleId, Severity};

/// One detected deviation from an expected convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Severity of the issue.
    pub kind: Severity,
    /// Human-readable message.
    pub message: String,
    /// File the issue was found in (project-relative where possible).
    pub file: PathBuf,
    /// 1-based line number, when the issue is tied to a line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// The check that produced this issue.
    pub rule: RuleId,
    /// Whether a fix may be derivable for this issue.
    pub fixable: bool,
    /// Concrete replacement text or advice for resolving the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    /// Create a new issue that is not tied to a file yet.
    pub fn new(rule: impl Into<RuleId>, kind: Severity, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            file: PathBuf::new(),
            line: None,
            rule: rule.into(),
            fixable: false,
            suggestion: None,
        }
    }

    /// Shorthand for an error-severity issue.
    pub fn error(rule: impl Into<RuleId>, message: impl Into<String>) -> Self {
        Self::new(rule, Severity::Error, message)
    }

    /// Shorthand for a warning-severity issue.
    pub fn warning(rule: impl Into<RuleId>, message: impl Into<String>) -> Self {
        Self::new(rule, Severity::Warning, message)
    }

    /// Shorthand for an info-severity issue.
    pub fn info(rule: impl Into<RuleId>, message: impl Into<String>) -> Self {
        Self::new(rule, Severity::Info, message)
    }

    /// Attach the file this issue was found in.
    pub fn in_file(mut self, file: impl AsRef<Path>) -> Self {
        self.file = file.as_ref().to_path_buf();
        self
    }

    /// Attach a 1-based line number.
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Mark the issue as fixable.
    pub fn fixable(mut self) -> Self {
        self.fixable = true;
        self
    }

    /// Add a suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Whether this issue blocks validity.
    pub fn is_error(&self) -> bool {
        self.kind == Severity::Error
    }

    /// `file:line` for display, or just `file` when there is no line.
    pub fn location(&self) -> String {
        match self.line {
            Some(line) => format!("{}:{}", self.file.display(), line),
            None => self.file.display().to_string(),
        }
    }
}

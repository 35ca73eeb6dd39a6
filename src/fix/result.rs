//! Batch outcomes of fix apply and preview.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use super::action::{Fix, FixActionKind};
use crate::issue::ValidationIssue;

/// The effect of one fix on one file.
///
/// Preview produces these without touching disk; apply returns the same
/// value for the edit it performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileChange {
    pub file: PathBuf,
    pub action: FixActionKind,
    /// Line count before the edit; `None` for create and rename.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines_before: Option<usize>,
    /// Line count after the edit; for create, the lines written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines_after: Option<usize>,
    /// New path, for rename.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<PathBuf>,
    pub description: String,
    /// Full text of the file after the change; `None` for rename.
    #[serde(skip)]
    pub contents: Option<String>,
}

/// A fix together with its change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixOutcome {
    pub fix: Fix,
    pub change: FileChange,
}

/// A fix that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedFix {
    pub fix: Fix,
    pub reason: String,
}

/// Why an issue produced no fix attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The issue is not flagged fixable.
    NotFixable,
    /// No fix is derivable for the issue's rule.
    NoFix,
    /// The caller's filter rejected the derived fix.
    Declined,
    /// An earlier issue in the batch derived the identical fix.
    Covered,
}

/// An issue that was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedIssue {
    pub issue: ValidationIssue,
    pub reason: SkipReason,
}

/// Batch counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixSummary {
    pub applied: usize,
    pub failed: usize,
    pub skipped: usize,
    /// Distinct files among applied fixes only.
    pub files_modified: usize,
}

fn summarize(applied: &[FixOutcome], failed: usize, skipped: usize) -> FixSummary {
    let files: BTreeSet<&Path> = applied.iter().map(|o| o.fix.file.as_path()).collect();
    FixSummary {
        applied: applied.len(),
        failed,
        skipped,
        files_modified: files.len(),
    }
}

/// Outcome of applying a batch of fixes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixResult {
    pub applied: Vec<FixOutcome>,
    pub failed: Vec<FailedFix>,
    pub skipped: Vec<SkippedIssue>,
}

impl FixResult {
    pub fn summary(&self) -> FixSummary {
        summarize(&self.applied, self.failed.len(), self.skipped.len())
    }

    /// Whether every attempted fix succeeded.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Outcome of previewing a batch of fixes.
///
/// `changes` lists what apply would do; `failed` lists fixes apply would
/// reject (e.g. a create over an existing file).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixPreview {
    pub changes: Vec<FixOutcome>,
    pub failed: Vec<FailedFix>,
    pub skipped: Vec<SkippedIssue>,
}

impl FixPreview {
    pub fn summary(&self) -> FixSummary {
        summarize(&self.changes, self.failed.len(), self.skipped.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fix::action::FixAction;
    use crate::issue::RuleId;

    fn outcome(file: &str, line: usize) -> FixOutcome {
        let fix = Fix::new(
            &RuleId::new("r"),
            file,
            FixAction::Delete { line },
        );
        FixOutcome {
            change: FileChange {
                file: fix.file.clone(),
                action: fix.kind(),
                lines_before: Some(2),
                lines_after: Some(1),
                target: None,
                description: String::new(),
                contents: None,
            },
            fix,
        }
    }

    #[test]
    fn files_modified_counts_distinct_applied_files() {
        let result = FixResult {
            applied: vec![outcome("a", 1), outcome("a", 2), outcome("b", 1)],
            failed: vec![FailedFix {
                fix: outcome("c", 1).fix,
                reason: "boom".into(),
            }],
            skipped: Vec::new(),
        };

        let summary = result.summary();
        assert_eq!(summary.applied, 3);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.files_modified, 2);
        assert!(!result.is_success());
    }

    #[test]
    fn empty_result_is_success() {
        let result = FixResult::default();
        assert!(result.is_success());
        assert_eq!(result.summary(), FixSummary::default());
    }

    #[test]
    fn skip_reason_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(SkipReason::NotFixable).unwrap(),
            "not_fixable"
        );
    }
}

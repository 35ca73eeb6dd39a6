//! Aggregated validation results.

use serde::{Deserialize, Serialize};

use super::validation_issue::ValidationIssue;
use super::rules;
use super::severity::Severity;

/// Counters describing a [`ValidationResult`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    /// Number of files that were checked.
    pub total_files: usize,
    /// Number of checked files without error-severity issues.
    pub valid_files: usize,
    /// Number of error-severity issues.
    pub error_count: usize,
    /// Number of warning-severity issues.
    pub warning_count: usize,
    /// Number of info-severity issues.
    pub info_count: usize,
    /// Schema properties that were required but absent.
    pub missing_required: usize,
    /// Schema properties whose runtime type did not match.
    pub type_errors: usize,
    /// Other schema constraint failures (length, pattern, enum, range).
    pub constraint_violations: usize,
}

/// The outcome of one or more checks.
///
/// `valid` is false iff at least one error-severity issue has been recorded;
/// warnings and infos never flip it. Issues can only be appended, which keeps
/// the flag and the summary in step with the issue list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    valid: bool,
    issues: Vec<ValidationIssue>,
    summary: ValidationSummary,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationResult {
    /// Create an empty, valid result.
    pub fn new() -> Self {
        Self {
            valid: true,
            issues: Vec::new(),
            summary: ValidationSummary::default(),
        }
    }

    /// Record one issue.
    pub fn push(&mut self, issue: ValidationIssue) {
        match issue.kind {
            Severity::Error => {
                self.summary.error_count += 1;
                self.valid = false;
            }
            Severity::Warning => self.summary.warning_count += 1,
            Severity::Info => self.summary.info_count += 1,
        }

        match issue.rule.as_str() {
            rules::SCHEMA_MISSING_REQUIRED => self.summary.missing_required += 1,
            rules::SCHEMA_TYPE_ERROR => self.summary.type_errors += 1,
            other if other.starts_with(rules::SCHEMA_PREFIX) => {
                self.summary.constraint_violations += 1
            }
            _ => {}
        }

        self.issues.push(issue);
    }

    /// Record several issues.
    pub fn extend(&mut self, issues: impl IntoIterator<Item = ValidationIssue>) {
        for issue in issues {
            self.push(issue);
        }
    }

    /// Fold another result into this one, including its file counters.
    pub fn merge(&mut self, other: ValidationResult) {
        self.summary.total_files += other.summary.total_files;
        self.summary.valid_files += other.summary.valid_files;
        self.extend(other.issues);
    }

    /// Count one checked file.
    pub fn record_file(&mut self, file_valid: bool) {
        self.summary.total_files += 1;
        if file_valid {
            self.summary.valid_files += 1;
        }
    }

    /// Whether no error-severity issue was recorded.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// All issues in emission order.
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Summary counters.
    pub fn summary(&self) -> &ValidationSummary {
        &self.summary
    }

    /// Issues of the given severity.
    pub fn by_severity(&self, kind: Severity) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(move |i| i.kind == kind)
    }

    /// Error-severity issues.
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.by_severity(Severity::Error)
    }

    /// Warning-severity issues.
    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.by_severity(Severity::Warning)
    }

    /// Info-severity issues.
    pub fn infos(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.by_severity(Severity::Info)
    }

    /// Issues flagged as fixable.
    pub fn fixable(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.fixable)
    }

    /// Whether any issue was produced by `rule`.
    pub fn has_rule(&self, rule: &str) -> bool {
        self.issues.iter().any(|i| i.rule == rule)
    }

    /// Rebuild the result without issues produced by the given rules.
    ///
    /// File counters are carried over unchanged.
    pub fn without_rules(self, disabled: &[String]) -> Self {
        if disabled.is_empty() {
            return self;
        }

        let mut filtered = Self::new();
        filtered.summary.total_files = self.summary.total_files;
        filtered.summary.valid_files = self.summary.valid_files;
        filtered.extend(
            self.issues
                .into_iter()
                .filter(|i| !disabled.iter().any(|d| i.rule == d.as_str())),
        );
        filtered
    }
}

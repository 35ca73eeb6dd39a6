//! Issue and severity model.
//!
//! Every checker in the crate reports into the same vocabulary:
//!
//! - [`Severity`] - `info`, `warning` or `error`
//! - [`RuleId`] - stable dotted identifier of the semantic check
//! - [`ValidationIssue`] - one detected problem
//! - [`ValidationResult`] - an aggregate of issues with a summary
//!
//! # Example
//!
//! ```
//! use trellis::issue::{rules, Severity, ValidationIssue, ValidationResult};
//!
//! let mut result = ValidationResult::new();
//! result.push(
//!     ValidationIssue::new(rules::README_REQUIRED, Severity::Error, "README.md is missing")
//!         .in_file("README.md")
//!         .fixable(),
//! );
//!
//! assert!(!result.is_valid());
//! assert_eq!(result.summary().error_count, 1);
//! ```

pub mod result;
pub mod rules;
pub mod severity;
pub mod validation_issue;

pub use result::{ValidationResult, ValidationSummary};
pub use severity::{RuleId, Severity};
pub use validation_issue::ValidationIssue;

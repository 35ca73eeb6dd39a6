//! Fix derivation and application.
//!
//! Issues flow in, [`Fix`]es flow out:
//!
//! 1. [`derive_fix`] maps a fixable issue to at most one fix, keyed on its
//!    rule ID
//! 2. [`FixEngine::apply_fix`] performs the edit; [`FixEngine::preview_fix`]
//!    computes the same [`FileChange`] without writing
//! 3. [`FixEngine::fix_issues`] runs a batch, isolating failures per fix
//!
//! # Example
//!
//! ```
//! use trellis::fix::FixEngine;
//! use trellis::issue::{rules, ValidationIssue};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let engine = FixEngine::new(dir.path());
//! let issues = vec![
//!     ValidationIssue::error(rules::README_REQUIRED, "README.md is missing")
//!         .in_file("README.md")
//!         .fixable(),
//! ];
//!
//! let preview = engine.preview_issues(&issues);
//! let result = engine.fix_issues(&issues);
//!
//! assert_eq!(preview.summary(), result.summary());
//! assert_eq!(result.summary().files_modified, 1);
//! ```

pub mod action;
pub mod content;
pub mod derive;
pub mod engine;
pub mod lines;
pub mod result;

pub use action::{Fix, FixAction, FixActionKind};
pub use derive::derive_fix;
pub use engine::FixEngine;
pub use lines::LineBuffer;
pub use result::{
    FailedFix, FileChange, FixOutcome, FixPreview, FixResult, FixSummary, SkipReason,
    SkippedIssue,
};

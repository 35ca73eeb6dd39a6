//! Structure checker.
//!
//! Walks a project tree once and applies, per visited entry:
//!
//! - required root files ([`required`])
//! - naming conventions ([`naming`])
//! - permission bits ([`permissions`], unix only)
//! - project-type recommendations ([`project`])
//! - template suffixes under the templates directory ([`templates`])
//!
//! A walk failure (permission denied, broken symlink) aborts the whole check
//! with [`TrellisError::Walk`](crate::TrellisError::Walk). Missing optional
//! artifacts are issues, never errors.

pub mod naming;
pub mod permissions;
pub mod project;
pub mod required;
pub mod templates;
pub mod walk;

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::Result;
use crate::issue::{ValidationIssue, ValidationResult};

pub use project::ProjectType;
pub use walk::{walk, Entry};

/// Which parts of the structure check run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureOptions {
    /// Directory names the walk does not descend into.
    pub ignore: Vec<String>,
    /// Names exempt from naming rules in addition to the built-in list.
    pub naming_allow: Vec<String>,
    pub naming: bool,
    pub permissions: bool,
    pub recommendations: bool,
    /// Project-relative templates directory.
    pub templates_dir: PathBuf,
}

impl Default for StructureOptions {
    fn default() -> Self {
        Self {
            ignore: vec![".git".to_string(), "node_modules".to_string()],
            naming_allow: Vec::new(),
            naming: true,
            permissions: true,
            recommendations: true,
            templates_dir: PathBuf::from("templates"),
        }
    }
}

/// Checks the layout of one project root.
#[derive(Debug, Clone)]
pub struct StructureChecker {
    root: PathBuf,
    options: StructureOptions,
}

impl StructureChecker {
    /// Create a checker with default options.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            options: StructureOptions::default(),
        }
    }

    /// Replace the options.
    pub fn with_options(mut self, options: StructureOptions) -> Self {
        self.options = options;
        self
    }

    /// The project root being checked.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Detect the project type of the root.
    pub fn project_type(&self) -> ProjectType {
        project::detect(&self.root)
    }

    /// Walk the tree and collect structure issues, without file counters.
    ///
    /// Returns the visited entries alongside the issues so callers can add
    /// their own per-file issues before [`tally`]ing.
    pub fn inspect(&self) -> Result<(Vec<Entry>, Vec<ValidationIssue>)> {
        info!("Checking project structure in {}", self.root.display());
        let opts = &self.options;
        let mut issues = Vec::new();

        let entries = walk(&self.root, &opts.ignore)?;
        issues.extend(required::check(&self.root)?);

        for entry in &entries {
            if opts.naming {
                issues.extend(naming::check(entry, &opts.naming_allow));
            }
            if opts.permissions {
                issues.extend(permissions::check(entry));
            }
        }

        if opts.recommendations {
            let project_type = self.project_type();
            debug!("Detected {} project", project_type);
            issues.extend(project::recommendations(&self.root, project_type));
        }

        if self.root.join(&opts.templates_dir).is_dir() {
            issues.extend(templates::check(&entries, &opts.templates_dir));
        }

        debug!("Structure check found {} issues", issues.len());
        Ok((entries, issues))
    }

    /// Run the structure check.
    pub fn check(&self) -> Result<ValidationResult> {
        let (entries, issues) = self.inspect()?;
        Ok(tally(&entries, issues))
    }
}

/// Build a result from `issues`, counting every file in `entries`.
///
/// A file is valid when no error-severity issue points at it.
pub fn tally(
    entries: &[Entry],
    issues: impl IntoIterator<Item = ValidationIssue>,
) -> ValidationResult {
    let mut result = ValidationResult::new();
    result.extend(issues);

    for entry in entries.iter().filter(|e| !e.is_dir) {
        let file_valid = !result
            .errors()
            .any(|issue| issue.file.as_path() == entry.path.as_path());
        result.record_file(file_valid);
    }

    result
}

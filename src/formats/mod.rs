//! Format dispatcher.
//!
//! Maps a file path to exactly one checker, in order:
//!
//! 1. lowercase extension: `json`, `yaml`/`yml`, `env`
//! 2. exact basename: `Dockerfile`, `Makefile`, `.gitignore`, `.dockerignore`
//! 3. anything else is [`FileKind::Unknown`]: valid, with one info issue
//!
//! Dispatch is total. Every path yields a [`ValidationResult`]; a file that
//! cannot be read becomes a `format.read` error issue rather than an `Err`.
//!
//! The dispatcher only checks syntax and format conventions. Schema-aware
//! validation of parsed data is layered on top by
//! [`ProjectValidator`](crate::validator::ProjectValidator).

pub mod dockerfile;
pub mod env;
pub mod ignore;
pub mod json;
pub mod makefile;
pub mod manifest;
pub mod yaml;

use std::fmt;
use std::path::Path;
use tracing::debug;

use crate::issue::{rules, ValidationIssue, ValidationResult};

/// The closed set of formats the dispatcher knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Json,
    Yaml,
    Env,
    Dockerfile,
    Makefile,
    GitIgnore,
    DockerIgnore,
    Unknown,
}

/// Extension table, consulted first.
const BY_EXTENSION: &[(&str, FileKind)] = &[
    ("json", FileKind::Json),
    ("yaml", FileKind::Yaml),
    ("yml", FileKind::Yaml),
    ("env", FileKind::Env),
];

/// Basename table, consulted when no extension matched.
const BY_BASENAME: &[(&str, FileKind)] = &[
    ("Dockerfile", FileKind::Dockerfile),
    ("Makefile", FileKind::Makefile),
    (".gitignore", FileKind::GitIgnore),
    (".dockerignore", FileKind::DockerIgnore),
];

impl FileKind {
    /// Select the checker for `path`.
    pub fn detect(path: &Path) -> Self {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return FileKind::Unknown;
        };

        if let Some(ext) = extension(name) {
            let ext = ext.to_lowercase();
            if let Some((_, kind)) = BY_EXTENSION.iter().find(|(e, _)| *e == ext) {
                return *kind;
            }
        }

        BY_BASENAME
            .iter()
            .find(|(base, _)| *base == name)
            .map(|(_, kind)| *kind)
            .unwrap_or(FileKind::Unknown)
    }

    /// Short name used in logs and CLI output.
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Json => "json",
            FileKind::Yaml => "yaml",
            FileKind::Env => "env",
            FileKind::Dockerfile => "dockerfile",
            FileKind::Makefile => "makefile",
            FileKind::GitIgnore => "gitignore",
            FileKind::DockerIgnore => "dockerignore",
            FileKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything after the last `.` of a file name, dotfiles included.
fn extension(name: &str) -> Option<&str> {
    name.rfind('.').map(|i| &name[i + 1..]).filter(|e| !e.is_empty())
}

/// Read `path` and run the matching checker.
pub fn validate_file(path: &Path) -> ValidationResult {
    let kind = FileKind::detect(path);

    if kind == FileKind::Unknown {
        return validate_content(kind, path, "");
    }

    match std::fs::read_to_string(path) {
        Ok(text) => validate_content(kind, path, &text),
        Err(e) => {
            let mut result = ValidationResult::new();
            result.push(
                ValidationIssue::error(rules::FORMAT_READ, format!("Cannot read file: {}", e))
                    .in_file(path),
            );
            result.record_file(false);
            result
        }
    }
}

/// Run the checker for `kind` over already-loaded `text`.
///
/// `path` is only used to label the issues.
pub fn validate_content(kind: FileKind, path: &Path, text: &str) -> ValidationResult {
    debug!("Checking {} as {}", path.display(), kind);

    let issues = match kind {
        FileKind::Json => json::check(path, text),
        FileKind::Yaml => yaml::check(path, text),
        FileKind::Env => env::check(path, text),
        FileKind::Dockerfile => dockerfile::check(path, text),
        FileKind::Makefile => makefile::check(path, text),
        FileKind::GitIgnore => ignore::check(ignore::IgnoreKind::Git, path, text),
        FileKind::DockerIgnore => ignore::check(ignore::IgnoreKind::Docker, path, text),
        FileKind::Unknown => vec![ValidationIssue::info(
            rules::FORMAT_UNKNOWN,
            "Unknown file type, no format checks applied",
        )
        .in_file(path)],
    };

    let mut result = ValidationResult::new();
    result.extend(issues);
    result.record_file(result.is_valid());
    result
}

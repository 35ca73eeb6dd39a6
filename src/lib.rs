//! Trellis - project structure validation and auto-remediation.
//!
//! Trellis checks a scaffolded repository against structural conventions
//! (required files, naming, permissions, layout), validates well-known
//! configuration files by format and schema, and derives concrete fixes for
//! the issues it finds.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - `.trellis.yml` loading
//! - [`error`] - Error types and result aliases
//! - [`fix`] - Fix derivation, preview and application
//! - [`formats`] - Per-format syntax and convention checks
//! - [`issue`] - Issues, severities and validation results
//! - [`report`] - JSON, HTML, Markdown and terminal reports
//! - [`schema`] - Schema registry and rule catalog
//! - [`structure`] - Project walk and structure checks
//! - [`ui`] - Terminal output and prompts
//! - [`validator`] - Whole-project validation
//!
//! # Example
//!
//! ```
//! use trellis::formats::{validate_content, FileKind};
//! use std::path::Path;
//!
//! let result = validate_content(FileKind::Env, Path::new(".env"), "PORT=8080\n");
//! assert!(result.is_valid());
//! ```
//!
//! For whole-project validation, see the integration tests.

pub mod cli;
pub mod config;
pub mod error;
pub mod fix;
pub mod formats;
pub mod issue;
pub mod report;
pub mod schema;
pub mod structure;
pub mod ui;
pub mod validator;

pub use error::{Result, TrellisError};

//! Error types for Trellis operations.
//!
//! This module defines [`TrellisError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - A *validation* failure is never an error: it is a successful
//!   [`ValidationResult`](crate::issue::ValidationResult) with `valid == false`
//! - `TrellisError` is reserved for hard failures: filesystem walks that cannot
//!   complete, unparsable configuration, unsupported formats or fix actions
//! - Use `anyhow::Error` (via `TrellisError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for Trellis operations.
#[derive(Debug, Error)]
pub enum TrellisError {
    /// Configuration file not found at an explicitly requested location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// A schema definition is malformed (e.g. an uncompilable pattern).
    #[error("Invalid schema '{name}': {message}")]
    InvalidSchema { name: String, message: String },

    /// No schema is registered under the requested name.
    #[error("Unknown schema: {name}")]
    SchemaNotFound { name: String },

    /// Package name violates npm naming rules.
    #[error("Invalid package name '{name}': {reason}")]
    InvalidPackageName { name: String, reason: String },

    /// Environment variable key is not UPPER_SNAKE_CASE.
    #[error("Invalid environment key '{key}': must match ^[A-Z][A-Z0-9_]*$")]
    InvalidEnvKey { key: String },

    /// Report format string is not one of json, html, markdown.
    #[error("Unsupported report format: {format}")]
    UnsupportedFormat { format: String },

    /// Fix action string is not one of create, replace, insert, delete, rename.
    #[error("Unsupported fix action: {action}")]
    UnsupportedFixAction { action: String },

    /// A create or rename fix would overwrite an existing file.
    #[error("File already exists: {path}")]
    FileExists { path: PathBuf },

    /// The project walk could not visit an entry.
    #[error("Failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Trellis operations.
pub type Result<T> = std::result::Result<T, TrellisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_displays_path() {
        let err = TrellisError::ConfigNotFound {
            path: PathBuf::from("/foo/.trellis.yml"),
        };
        assert!(err.to_string().contains("/foo/.trellis.yml"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = TrellisError::ConfigParseError {
            path: PathBuf::from("/.trellis.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/.trellis.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn unsupported_format_displays_format() {
        let err = TrellisError::UnsupportedFormat {
            format: "pdf".into(),
        };
        assert_eq!(err.to_string(), "Unsupported report format: pdf");
    }

    #[test]
    fn unsupported_fix_action_displays_action() {
        let err = TrellisError::UnsupportedFixAction {
            action: "chmod".into(),
        };
        assert!(err.to_string().contains("chmod"));
    }

    #[test]
    fn file_exists_displays_path() {
        let err = TrellisError::FileExists {
            path: PathBuf::from("README.md"),
        };
        assert_eq!(err.to_string(), "File already exists: README.md");
    }

    #[test]
    fn walk_error_keeps_source() {
        use std::error::Error as _;

        let err = TrellisError::Walk {
            path: PathBuf::from("/project/secret"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/project/secret"));
        assert!(err.source().is_some());
    }

    #[test]
    fn invalid_package_name_displays_reason() {
        let err = TrellisError::InvalidPackageName {
            name: "My-Package".into(),
            reason: "must be lowercase".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("My-Package"));
        assert!(msg.contains("must be lowercase"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: TrellisError = io_err.into();
        assert!(matches!(err, TrellisError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(TrellisError::SchemaNotFound {
                name: "test".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}

//! Configuration file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::schema::ProjectConfig;
use crate::error::{Result, TrellisError};

/// File names looked up at the project root, in order.
pub const CONFIG_FILE_NAMES: &[&str] = &[".trellis.yml", ".trellis.yaml"];

/// Find the project config file, if any.
pub fn find_config_file(project_root: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| project_root.join(name))
        .find(|path| path.is_file())
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<ProjectConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            TrellisError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            TrellisError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into a [`ProjectConfig`].
///
/// An empty document yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<ProjectConfig> {
    let parse_error = |e: serde_yaml::Error| TrellisError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    };

    let value: serde_yaml::Value = if content.trim().is_empty() {
        serde_yaml::Value::Null
    } else {
        serde_yaml::from_str(content).map_err(parse_error)?
    };

    if value.is_null() {
        return Ok(ProjectConfig::default());
    }
    serde_yaml::from_value(value).map_err(parse_error)
}

/// Load config with optional path override.
///
/// An explicit override must exist. Without one, a missing project config
/// means defaults.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<ProjectConfig> {
    if let Some(path) = config_override {
        debug!("Loading config from {}", path.display());
        return load_config_file(path);
    }

    match find_config_file(project_root) {
        Some(path) => {
            debug!("Loading config from {}", path.display());
            load_config_file(&path)
        }
        None => {
            debug!("No config file in {}, using defaults", project_root.display());
            Ok(ProjectConfig::default())
        }
    }
}

//! Project configuration (`.trellis.yml`).
//!
//! The file is optional. When present it tunes the structure walk, disables
//! rules and sets report defaults:
//!
//! ```yaml
//! ignore: [.git, node_modules, target]
//! disabled_rules: [structure.license.required]
//! naming:
//!   allow: [Cargo.toml, Cargo.lock]
//! checks:
//!   permissions: false
//!   templates_dir: templates
//! report:
//!   format: markdown
//! ```
//!
//! # Example
//!
//! ```
//! use trellis::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(".trellis.yml"), "checks:\n  permissions: false\n").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert!(!config.checks.permissions);
//! ```

pub mod loader;
pub mod schema;

pub use loader::{find_config_file, load_config, load_config_file, parse_config, CONFIG_FILE_NAMES};
pub use schema::{ChecksConfig, NamingConfig, ProjectConfig, ReportConfig};

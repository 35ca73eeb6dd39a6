//! Schema registry and schema-driven validation.
//!
//! - [`SchemaRegistry`] - named [`ConfigSchema`]s plus a togglable rule catalog
//! - [`validate_against_schema`] - stateless validation of parsed data
//! - [`validate_package_name`], [`validate_env_key`], [`is_potential_secret`] -
//!   standalone naming validators
//!
//! This is not a general JSON-Schema engine: there is no `$ref`
//! and arrays/objects are checked by type tag only.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use std::path::Path;
//! use trellis::issue::ValidationResult;
//! use trellis::schema::SchemaRegistry;
//!
//! let registry = SchemaRegistry::with_builtins();
//! let mut result = ValidationResult::new();
//! registry
//!     .validate("package.json", Path::new("package.json"), &json!({"name": "x"}), &mut result)
//!     .unwrap();
//!
//! assert_eq!(result.summary().missing_required, 1);
//! ```

pub mod builtin;
pub mod naming;
pub mod registry;
pub mod types;
pub mod validate;

pub use naming::{is_potential_secret, validate_env_key, validate_package_name};
pub use registry::SchemaRegistry;
pub use types::{ConfigSchema, PropertySchema, PropertyType, RuleCategory, ValidationSchemaRule};
pub use validate::{validate_against_schema, validate_property, yaml_to_json};

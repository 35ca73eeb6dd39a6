//! Standalone naming validators.
//!
//! These are pure functions, not schema driven. [`is_potential_secret`] is an
//! advisory keyword/length heuristic and must not be treated as a security
//! control.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Result, TrellisError};

/// Maximum length of an npm package name.
pub const MAX_PACKAGE_NAME_LENGTH: usize = 214;

/// Keywords that make an environment key look like it holds a secret.
pub const SECRET_KEYWORDS: &[&str] = &["password", "secret", "key", "token", "api", "auth"];

/// Minimum value length (exclusive) for [`is_potential_secret`].
pub const SECRET_MIN_VALUE_LENGTH: usize = 10;

static PACKAGE_NAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9\-._~]+$").expect("valid package name regex"));

static ENV_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Z0-9_]*$").expect("valid env key regex"));

/// Validate an npm-style package name.
///
/// The name must be non-empty, at most 214 characters, equal to its own
/// lowercase form, must not start with `.` or `_`, and may only contain
/// `[a-z0-9-._~]`.
///
/// # Example
///
/// ```
/// use trellis::schema::validate_package_name;
///
/// assert!(validate_package_name("my-package").is_ok());
/// assert!(validate_package_name("My-Package").is_err());
/// ```
pub fn validate_package_name(name: &str) -> Result<()> {
    let invalid = |reason: &str| TrellisError::InvalidPackageName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("name cannot be empty"));
    }
    if name.len() > MAX_PACKAGE_NAME_LENGTH {
        return Err(invalid("name cannot exceed 214 characters"));
    }
    if name != name.to_lowercase() {
        return Err(invalid("name must be lowercase"));
    }
    if name.starts_with('.') || name.starts_with('_') {
        return Err(invalid("name cannot start with '.' or '_'"));
    }
    if !PACKAGE_NAME_CHARS.is_match(name) {
        return Err(invalid(
            "name may only contain lowercase letters, digits and '-._~'",
        ));
    }
    Ok(())
}

/// Validate an environment variable key against `^[A-Z][A-Z0-9_]*$`.
///
/// # Example
///
/// ```
/// use trellis::schema::validate_env_key;
///
/// assert!(validate_env_key("API_KEY").is_ok());
/// assert!(validate_env_key("api-key").is_err());
/// ```
pub fn validate_env_key(key: &str) -> Result<()> {
    if ENV_KEY.is_match(key) {
        Ok(())
    } else {
        Err(TrellisError::InvalidEnvKey {
            key: key.to_string(),
        })
    }
}

/// Heuristic: does this key/value pair look like a secret?
///
/// True iff the lowercase key contains one of [`SECRET_KEYWORDS`] and the
/// value is longer than [`SECRET_MIN_VALUE_LENGTH`] characters. Advisory only.
pub fn is_potential_secret(key: &str, value: &str) -> bool {
    let key = key.to_lowercase();
    SECRET_KEYWORDS.iter().any(|kw| key.contains(kw))
        && value.chars().count() > SECRET_MIN_VALUE_LENGTH
}

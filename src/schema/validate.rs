//! Schema-driven validation of parsed configuration data.
//!
//! Data arrives as a [`serde_json::Value`] regardless of the source format;
//! YAML documents are converted with [`yaml_to_json`] first.

use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{LazyLock, RwLock};

use super::types::{ConfigSchema, PropertySchema, PropertyType};
use crate::issue::{rules, ValidationIssue, ValidationResult};

/// Validate `data` against `schema`, appending issues to `result`.
///
/// - every name in `schema.required` absent from `data` is a
///   `schema.missing_required` error
/// - every key of `data` declared in `schema.properties` is checked by
///   [`validate_property`]
/// - keys not declared in the schema are ignored
pub fn validate_against_schema(
    file: &Path,
    data: &Value,
    schema: &ConfigSchema,
    result: &mut ValidationResult,
) {
    let Some(object) = data.as_object() else {
        result.push(
            ValidationIssue::error(
                rules::SCHEMA_TYPE_ERROR,
                format!(
                    "{} must be an object, found {}",
                    schema.title,
                    json_type_name(data)
                ),
            )
            .in_file(file),
        );
        return;
    };

    for name in &schema.required {
        if !object.contains_key(name) {
            result.push(
                ValidationIssue::error(
                    rules::SCHEMA_MISSING_REQUIRED,
                    format!("Missing required property '{}'", name),
                )
                .in_file(file),
            );
        }
    }

    for (name, value) in object {
        if let Some(property) = schema.properties.get(name) {
            validate_property(file, name, value, property, result);
        }
    }
}

/// Validate one property value.
///
/// A type mismatch produces exactly one `schema.type_error` and skips the
/// remaining checks. String constraints are independent of each other: a value
/// can violate its length bounds and its pattern at the same time.
pub fn validate_property(
    file: &Path,
    name: &str,
    value: &Value,
    property: &PropertySchema,
    result: &mut ValidationResult,
) {
    if !matches_type(value, property.property_type) {
        result.push(
            ValidationIssue::error(
                rules::SCHEMA_TYPE_ERROR,
                format!(
                    "Property '{}' must be of type {}, found {}",
                    name,
                    property.property_type,
                    json_type_name(value)
                ),
            )
            .in_file(file),
        );
        return;
    }

    match (property.property_type, value) {
        (PropertyType::String, Value::String(s)) => {
            validate_string(file, name, s, property, result)
        }
        (PropertyType::Number, Value::Number(n)) => {
            if let Some(n) = n.as_f64() {
                validate_number(file, name, n, property, result);
            }
        }
        _ => {}
    }
}

fn validate_string(
    file: &Path,
    name: &str,
    value: &str,
    property: &PropertySchema,
    result: &mut ValidationResult,
) {
    let length = value.chars().count();

    if let Some(min) = property.min_length {
        if length < min {
            result.push(
                ValidationIssue::error(
                    rules::SCHEMA_MIN_LENGTH,
                    format!(
                        "Property '{}' must be at least {} characters (got {})",
                        name, min, length
                    ),
                )
                .in_file(file),
            );
        }
    }

    if let Some(max) = property.max_length {
        if length > max {
            result.push(
                ValidationIssue::error(
                    rules::SCHEMA_MAX_LENGTH,
                    format!(
                        "Property '{}' must be at most {} characters (got {})",
                        name, max, length
                    ),
                )
                .in_file(file),
            );
        }
    }

    if let Some(pattern) = &property.pattern {
        match cached_full_match(pattern) {
            Ok(re) if !re.is_match(value) => result.push(
                ValidationIssue::error(
                    rules::SCHEMA_PATTERN,
                    format!("Property '{}' does not match pattern {}", name, pattern),
                )
                .in_file(file),
            ),
            Ok(_) => {}
            Err(e) => result.push(
                ValidationIssue::error(
                    rules::SCHEMA_PATTERN,
                    format!("Property '{}' has an invalid pattern: {}", name, e),
                )
                .in_file(file),
            ),
        }
    }

    if let Some(allowed) = &property.enum_values {
        if !allowed.iter().any(|a| a == value) {
            result.push(
                ValidationIssue::error(
                    rules::SCHEMA_ENUM,
                    format!(
                        "Property '{}' must be one of [{}], got '{}'",
                        name,
                        allowed.join(", "),
                        value
                    ),
                )
                .in_file(file),
            );
        }
    }
}

fn validate_number(
    file: &Path,
    name: &str,
    value: f64,
    property: &PropertySchema,
    result: &mut ValidationResult,
) {
    if let Some(min) = property.minimum {
        if value < min {
            result.push(
                ValidationIssue::error(
                    rules::SCHEMA_MINIMUM,
                    format!("Property '{}' must be >= {} (got {})", name, min, value),
                )
                .in_file(file),
            );
        }
    }

    if let Some(max) = property.maximum {
        if value > max {
            result.push(
                ValidationIssue::error(
                    rules::SCHEMA_MAXIMUM,
                    format!("Property '{}' must be <= {} (got {})", name, max, value),
                )
                .in_file(file),
            );
        }
    }
}

/// Compile `pattern` anchored at both ends so it must match the whole value.
pub fn compile_full_match(pattern: &str) -> std::result::Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{})$", pattern))
}

/// Compiled property patterns, keyed by the pattern source.
static PATTERN_CACHE: LazyLock<RwLock<HashMap<String, Regex>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// [`compile_full_match`] with each pattern compiled once per process.
///
/// Invalid patterns are not cached; the registry rejects them on `add`.
fn cached_full_match(pattern: &str) -> std::result::Result<Regex, regex::Error> {
    if let Some(re) = PATTERN_CACHE
        .read()
        .ok()
        .and_then(|cache| cache.get(pattern).cloned())
    {
        return Ok(re);
    }

    let re = compile_full_match(pattern)?;
    if let Ok(mut cache) = PATTERN_CACHE.write() {
        cache.insert(pattern.to_string(), re.clone());
    }
    Ok(re)
}

fn matches_type(value: &Value, expected: PropertyType) -> bool {
    matches!(
        (expected, value),
        (PropertyType::String, Value::String(_))
            | (PropertyType::Number, Value::Number(_))
            | (PropertyType::Boolean, Value::Bool(_))
            | (PropertyType::Array, Value::Array(_))
            | (PropertyType::Object, Value::Object(_))
    )
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Convert a YAML value into the JSON data model used by schema validation.
///
/// Fails for YAML that has no JSON equivalent, such as non-string mapping keys
/// that are themselves mappings.
pub fn yaml_to_json(value: serde_yaml::Value) -> std::result::Result<Value, serde_json::Error> {
    serde_json::to_value(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn name_version_schema() -> ConfigSchema {
        ConfigSchema::new("package", "test")
            .require(["name", "version"])
            .property("name", PropertySchema::string())
            .property("version", PropertySchema::string())
    }

    fn check(data: Value, schema: &ConfigSchema) -> ValidationResult {
        let mut result = ValidationResult::new();
        validate_against_schema(Path::new("test.json"), &data, schema, &mut result);
        result
    }

    #[test]
    fn detects_missing_required_property() {
        let result = check(json!({"name": "x"}), &name_version_schema());

        assert!(!result.is_valid());
        assert_eq!(result.summary().error_count, 1);
        assert_eq!(result.summary().missing_required, 1);
        assert!(result.issues()[0].message.contains("version"));
        assert_eq!(result.issues()[0].rule, rules::SCHEMA_MISSING_REQUIRED);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let result = check(
            json!({"name": "x", "version": "1.0.0", "extra": 42}),
            &name_version_schema(),
        );
        assert!(result.is_valid());
        assert!(result.issues().is_empty());
    }

    #[test]
    fn string_length_bounds() {
        let schema = ConfigSchema::new("t", "d").property(
            "title",
            PropertySchema::string().with_length(Some(5), Some(10)),
        );

        let short = check(json!({"title": "abc"}), &schema);
        assert_eq!(short.summary().error_count, 1);
        assert_eq!(short.issues()[0].rule, rules::SCHEMA_MIN_LENGTH);

        let long = check(json!({"title": "this is too long"}), &schema);
        assert_eq!(long.summary().error_count, 1);
        assert_eq!(long.issues()[0].rule, rules::SCHEMA_MAX_LENGTH);

        let ok = check(json!({"title": "just fine"}), &schema);
        assert!(ok.is_valid());
    }

    #[test]
    fn length_bounds_are_inclusive() {
        let schema = ConfigSchema::new("t", "d").property(
            "title",
            PropertySchema::string().with_length(Some(5), Some(10)),
        );
        assert!(check(json!({"title": "abcde"}), &schema).is_valid());
        assert!(check(json!({"title": "abcdefghij"}), &schema).is_valid());
    }

    #[test]
    fn pattern_must_match_whole_value() {
        let schema = ConfigSchema::new("t", "d").property(
            "version",
            PropertySchema::string().with_pattern(r"^\d+\.\d+\.\d+$"),
        );

        assert!(check(json!({"version": "1.0.0"}), &schema).is_valid());

        let bad = check(json!({"version": "invalid-version"}), &schema);
        assert_eq!(bad.summary().error_count, 1);
        assert_eq!(bad.issues()[0].rule, rules::SCHEMA_PATTERN);

        let unanchored = ConfigSchema::new("t", "d")
            .property("v", PropertySchema::string().with_pattern(r"\d+"));
        assert!(!check(json!({"v": "v1"}), &unanchored).is_valid());
    }

    #[test]
    fn patterns_are_compiled_once_and_reused() {
        let pattern = r"[a-f]{3}-cache";
        let schema = ConfigSchema::new("t", "d")
            .property("id", PropertySchema::string().with_pattern(pattern));

        assert!(check(json!({"id": "abc-cache"}), &schema).is_valid());
        let first = PATTERN_CACHE.read().unwrap().get(pattern).cloned().unwrap();

        assert!(!check(json!({"id": "xyz-cache"}), &schema).is_valid());
        let second = PATTERN_CACHE.read().unwrap().get(pattern).cloned().unwrap();
        assert_eq!(first.as_str(), second.as_str());
        assert_eq!(first.as_str(), "^(?:[a-f]{3}-cache)$");
    }

    #[test]
    fn invalid_patterns_are_reported_not_cached() {
        let schema = ConfigSchema::new("t", "d")
            .property("id", PropertySchema::string().with_pattern("(open"));

        let result = check(json!({"id": "x"}), &schema);
        assert!(result.issues()[0].message.contains("invalid pattern"));
        assert!(!PATTERN_CACHE.read().unwrap().contains_key("(open"));
    }

    #[test]
    fn length_and_pattern_fire_independently() {
        let schema = ConfigSchema::new("t", "d").property(
            "code",
            PropertySchema::string()
                .with_length(None, Some(3))
                .with_pattern("[a-z]+"),
        );

        let result = check(json!({"code": "ABCDEF"}), &schema);
        assert_eq!(result.summary().error_count, 2);
        assert!(result.has_rule(rules::SCHEMA_MAX_LENGTH));
        assert!(result.has_rule(rules::SCHEMA_PATTERN));
    }

    #[test]
    fn enum_membership() {
        let schema = ConfigSchema::new("t", "d").property(
            "type",
            PropertySchema::string().with_enum(["module", "commonjs"]),
        );
        assert!(check(json!({"type": "module"}), &schema).is_valid());

        let bad = check(json!({"type": "esm"}), &schema);
        assert!(bad.has_rule(rules::SCHEMA_ENUM));
    }

    #[test]
    fn number_range_accepts_integers_and_decimals() {
        let schema = ConfigSchema::new("t", "d").property(
            "port",
            PropertySchema::number().with_range(Some(1.0), Some(65535.0)),
        );

        assert!(check(json!({"port": 8080}), &schema).is_valid());
        assert!(check(json!({"port": 1.5}), &schema).is_valid());
        assert!(check(json!({"port": 65535}), &schema).is_valid());
        assert!(check(json!({"port": 0}), &schema).has_rule(rules::SCHEMA_MINIMUM));
        assert!(check(json!({"port": 70000}), &schema).has_rule(rules::SCHEMA_MAXIMUM));
    }

    #[test]
    fn type_mismatch_short_circuits() {
        let schema = ConfigSchema::new("t", "d").property(
            "name",
            PropertySchema::string()
                .with_length(Some(3), None)
                .with_pattern("[a-z]+"),
        );

        let result = check(json!({"name": 5}), &schema);
        assert_eq!(result.issues().len(), 1);
        assert_eq!(result.summary().type_errors, 1);
    }

    #[test]
    fn mismatched_constraints_are_ignored() {
        let mut prop = PropertySchema::number();
        prop.min_length = Some(100);
        prop.pattern = Some("never".to_string());
        let schema = ConfigSchema::new("t", "d").property("n", prop);

        assert!(check(json!({"n": 3}), &schema).is_valid());
    }

    #[test]
    fn container_types_are_tag_checks_only() {
        let schema = ConfigSchema::new("t", "d")
            .property("scripts", PropertySchema::object())
            .property("files", PropertySchema::array())
            .property("private", PropertySchema::boolean());

        assert!(check(
            json!({"scripts": {"a": 1}, "files": [1, "x"], "private": true}),
            &schema
        )
        .is_valid());

        let bad = check(json!({"scripts": [], "files": {}, "private": "yes"}), &schema);
        assert_eq!(bad.summary().type_errors, 3);
    }

    #[test]
    fn non_object_document_is_a_type_error() {
        let result = check(json!(["not", "an", "object"]), &name_version_schema());
        assert_eq!(result.issues().len(), 1);
        assert_eq!(result.summary().type_errors, 1);
    }

    #[test]
    fn yaml_values_convert_for_validation() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("name: demo\nversion: '1.0.0'\n").unwrap();
        let json = yaml_to_json(yaml).unwrap();
        assert!(check(json, &name_version_schema()).is_valid());
    }
}

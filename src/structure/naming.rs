//! File and directory naming conventions.
//!
//! Patterns are compiled once and are part of the observable contract since
//! they decide the proposed rename:
//!
//! - [`CAMEL_CASE`]: `^[a-z]+([A-Z][a-z]*)+$`, matched against the stem
//!   (name up to the last `.`)
//! - [`LOWER_UPPER`]: `([a-z0-9])([A-Z])`, a lower-to-upper boundary
//! - [`UPPER_RUN`]: `([A-Z]+)([A-Z][a-z])`, the end of a run of capitals
//!
//! [`to_kebab_case`] and [`to_snake_case`] split at both boundaries, so
//! `thisIsALongVariableName` becomes `this-is-a-long-variable-name`.

use regex::Regex;
use std::sync::LazyLock;

use super::walk::Entry;
use crate::issue::{rules, ValidationIssue};

/// Names that are conventionally capitalised.
pub const ALLOW_LIST: &[&str] = &[
    "README.md",
    "LICENSE",
    "CHANGELOG.md",
    "CONTRIBUTING.md",
    "Dockerfile",
    "Makefile",
];

/// Extensions exempt from the camelCase rule.
pub const JS_FAMILY_EXTENSIONS: &[&str] = &["js", "ts", "jsx", "tsx"];

pub static CAMEL_CASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]+([A-Z][a-z]*)+$").expect("valid camelCase regex"));

pub static LOWER_UPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("valid boundary regex"));

pub static UPPER_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").expect("valid boundary regex"));

fn split_words(s: &str, sep: &str) -> String {
    let replacement = format!("${{1}}{}${{2}}", sep);
    let s = UPPER_RUN.replace_all(s, replacement.as_str());
    LOWER_UPPER
        .replace_all(&s, replacement.as_str())
        .to_lowercase()
}

/// `myFileName` -> `my-file-name`.
pub fn to_kebab_case(s: &str) -> String {
    split_words(s, "-")
}

/// `myFileName` -> `my_file_name`.
pub fn to_snake_case(s: &str) -> String {
    split_words(s, "_")
}

/// Split a file name at its last `.` into stem and extension.
///
/// Dotfiles without a further dot have no extension.
fn split_name(name: &str) -> (&str, Option<&str>) {
    match name.rfind('.') {
        Some(0) | None => (name, None),
        Some(i) => (&name[..i], Some(&name[i + 1..])),
    }
}

fn join_name(stem: &str, ext: Option<&str>) -> String {
    match ext {
        Some(ext) => format!("{}.{}", stem, ext),
        None => stem.to_string(),
    }
}

/// Check the name of one entry. At most one issue is produced.
pub fn check(entry: &Entry, extra_allow: &[String]) -> Option<ValidationIssue> {
    let name = entry.name();
    if ALLOW_LIST.contains(&name) || extra_allow.iter().any(|a| a == name) {
        return None;
    }

    let issue = |message: String| {
        ValidationIssue::warning(rules::NAMING_CONVENTIONS, message).in_file(&entry.path)
    };

    if name.contains(' ') {
        return Some(
            issue(format!("'{}' contains a space", name))
                .fixable()
                .with_suggestion(name.replace(' ', "-")),
        );
    }

    let (stem, ext) = split_name(name);
    let js_family = !entry.is_dir
        && ext.is_some_and(|e| JS_FAMILY_EXTENSIONS.contains(&e.to_lowercase().as_str()));

    if !js_family && CAMEL_CASE.is_match(stem) {
        let kebab = join_name(&to_kebab_case(stem), ext);
        let snake = join_name(&to_snake_case(stem), ext);
        return Some(
            issue(format!(
                "'{}' uses camelCase; use kebab-case ({}) or snake_case ({})",
                name, kebab, snake
            ))
            .with_suggestion(kebab),
        );
    }

    if name != name.to_lowercase() {
        return Some(
            issue(format!("'{}' is not lowercase", name)).with_suggestion(name.to_lowercase()),
        );
    }

    None
}

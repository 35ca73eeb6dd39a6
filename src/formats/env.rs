//! `.env` file checker.
//!
//! Line-oriented: blank lines and `#` comments are skipped. Each `KEY=value`
//! line is checked for an upper-snake key and for long values left unquoted.
//!
//! The quoting check is an advisory heuristic (a long unquoted value is a
//! rough proxy for "looks like a secret"). It is not a secret scanner.
//!
//! An unquoted value ends at the first `#` preceded by whitespace; the rest
//! of the line is an inline comment and is never folded into the quotes.

use std::path::Path;

use crate::issue::{rules, ValidationIssue};
use crate::schema::{is_potential_secret, validate_env_key};

/// Unquoted values longer than this are flagged.
pub const UNQUOTED_VALUE_LIMIT: usize = 20;

/// One parsed `KEY=value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvEntry<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

impl<'a> EnvEntry<'a> {
    /// Split the raw value into the value proper and an inline comment.
    ///
    /// A quoted value ends at its closing quote. An unquoted value ends at
    /// the first `#` that follows whitespace.
    pub fn split_comment(&self) -> (&'a str, Option<&'a str>) {
        let v = self.value;
        if let Some(end) = closing_quote(v) {
            let (value, rest) = v.split_at(end + 1);
            let rest = rest.trim_start();
            if rest.is_empty() {
                return (value, None);
            }
            if rest.starts_with('#') {
                return (value, Some(rest));
            }
            // Text after the closing quote: treat the whole thing as unquoted.
        }

        let comment = v
            .char_indices()
            .find(|&(i, c)| c == '#' && v[..i].ends_with(char::is_whitespace))
            .map(|(i, _)| i);
        match comment {
            Some(i) => (v[..i].trim_end(), Some(&v[i..])),
            None => (v, None),
        }
    }

    /// The value without any inline comment.
    pub fn bare_value(&self) -> &'a str {
        self.split_comment().0
    }

    /// Whether the value is wrapped in matching single or double quotes.
    pub fn is_quoted(&self) -> bool {
        is_quoted(self.bare_value())
    }

    /// The line rewritten with the value in double quotes. An inline comment
    /// is kept after the closing quote.
    pub fn quoted_line(&self) -> String {
        let (value, comment) = self.split_comment();
        let quoted = format!("{}=\"{}\"", self.key, value.replace('"', "\\\""));
        match comment {
            Some(comment) => format!("{} {}", quoted, comment),
            None => quoted,
        }
    }

    /// Whether quoting the value keeps its meaning for every common dotenv
    /// reader. A `#` inside an unquoted value is read as part of the value by
    /// some readers and as a comment by others.
    pub fn quotes_cleanly(&self) -> bool {
        !self.bare_value().contains('#')
    }
}

fn is_quoted(v: &str) -> bool {
    v.len() >= 2
        && ((v.starts_with('"') && v.ends_with('"')) || (v.starts_with('\'') && v.ends_with('\'')))
}

/// Byte index of the quote closing a value that starts with one.
fn closing_quote(v: &str) -> Option<usize> {
    let quote = v.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let mut escaped = false;
    for (i, c) in v.char_indices().skip(1) {
        match c {
            '\\' if quote == '"' && !escaped => escaped = true,
            c if c == quote && !escaped => return Some(i),
            _ => escaped = false,
        }
    }
    None
}

/// Split one trimmed line at its first `=`.
pub fn parse_line(line: &str) -> Option<EnvEntry<'_>> {
    let (key, value) = line.split_once('=')?;
    Some(EnvEntry {
        key: key.trim(),
        value: value.trim(),
    })
}

/// Check the lines of an env file.
pub fn check(path: &Path, text: &str) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some(entry) = parse_line(line) else {
            issues.push(
                ValidationIssue::warning(
                    rules::ENV_LINE_MALFORMED,
                    format!("Line is not a KEY=value assignment: {}", line),
                )
                .in_file(path)
                .at_line(line_no),
            );
            continue;
        };

        if validate_env_key(entry.key).is_err() {
            issues.push(
                ValidationIssue::info(
                    rules::ENV_KEY_FORMAT,
                    format!("Environment key '{}' should be UPPER_SNAKE_CASE", entry.key),
                )
                .in_file(path)
                .at_line(line_no),
            );
        }

        let value = entry.bare_value();
        if !entry.is_quoted() && value.chars().count() > UNQUOTED_VALUE_LIMIT {
            let message = if is_potential_secret(entry.key, value) {
                format!("Value of {} looks like a secret and should be quoted", entry.key)
            } else {
                format!("Long value of {} should be quoted", entry.key)
            };
            issues.push(
                ValidationIssue::warning(rules::ENV_VALUE_UNQUOTED, message)
                    .in_file(path)
                    .at_line(line_no)
                    .fixable()
                    .with_suggestion(entry.quoted_line()),
            );
        }
    }

    issues
}

//! Report rendering.
//!
//! A [`ValidationResult`] renders to JSON, HTML or Markdown for files and CI,
//! and to a grouped human-readable view for the terminal.

pub mod html;
pub mod human;
pub mod json;
pub mod markdown;

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crate::error::{Result, TrellisError};
use crate::issue::ValidationResult;

pub use html::HtmlFormatter;
pub use human::HumanFormatter;
pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;

/// File report formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Html,
    Markdown,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Html => "html",
            ReportFormat::Markdown => "markdown",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportFormat {
    type Err = TrellisError;

    /// Case-insensitive; `md` is an alias for `markdown`. There is no default.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "html" => Ok(ReportFormat::Html),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            _ => Err(TrellisError::UnsupportedFormat {
                format: s.to_string(),
            }),
        }
    }
}

/// Trait for rendering a validation result.
pub trait ReportFormatter {
    /// Write the report for `result` to `writer`.
    fn format<W: Write>(&self, result: &ValidationResult, writer: &mut W) -> std::io::Result<()>;
}

/// Render `result` in `format`.
pub fn render(result: &ValidationResult, format: ReportFormat) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    match format {
        ReportFormat::Json => JsonFormatter.format(result, &mut out)?,
        ReportFormat::Html => HtmlFormatter.format(result, &mut out)?,
        ReportFormat::Markdown => MarkdownFormatter.format(result, &mut out)?,
    }
    Ok(out)
}

/// Render `result` in the format named by `format`.
///
/// Unknown names fail with [`TrellisError::UnsupportedFormat`].
pub fn render_named(result: &ValidationResult, format: &str) -> Result<Vec<u8>> {
    render(result, format.parse()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::ValidationIssue;

    #[test]
    fn parses_formats_case_insensitively() {
        assert_eq!("json".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert_eq!("HTML".parse::<ReportFormat>().unwrap(), ReportFormat::Html);
        assert_eq!("Markdown".parse::<ReportFormat>().unwrap(), ReportFormat::Markdown);
        assert_eq!("MD".parse::<ReportFormat>().unwrap(), ReportFormat::Markdown);
    }

    #[test]
    fn unknown_format_is_an_error() {
        let err = "pdf".parse::<ReportFormat>().unwrap_err();
        assert!(matches!(err, TrellisError::UnsupportedFormat { format } if format == "pdf"));

        let result = ValidationResult::new();
        assert!(render_named(&result, "").is_err());
        assert!(render_named(&result, "xml").is_err());
    }

    #[test]
    fn render_dispatches() {
        let mut result = ValidationResult::new();
        result.push(ValidationIssue::error("structure.readme.required", "missing").in_file("README.md"));

        let json = String::from_utf8(render(&result, ReportFormat::Json).unwrap()).unwrap();
        let html = String::from_utf8(render(&result, ReportFormat::Html).unwrap()).unwrap();
        let md = String::from_utf8(render_named(&result, "md").unwrap()).unwrap();

        assert!(json.trim_start().starts_with('{'));
        assert!(html.contains("<html"));
        assert!(md.starts_with("# Validation Report"));
    }
}

//! Human-readable terminal report.
//!
//! Issues are grouped by severity, errors first, in the familiar
//! `error[rule]: message` shape with a location and help line.

use console::Style;
use std::io::Write;

use super::ReportFormatter;
use crate::issue::{Severity, ValidationResult};

/// Formats a result for terminal display.
pub struct HumanFormatter {
    /// Whether to use colors (ANSI escape codes).
    pub use_color: bool,
}

impl HumanFormatter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn paint(&self, style: Style, text: &str) -> String {
        if self.use_color {
            style.apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn severity_style(kind: Severity) -> Style {
        match kind {
            Severity::Error => Style::new().red().bold(),
            Severity::Warning => Style::new().yellow().bold(),
            Severity::Info => Style::new().cyan(),
        }
    }
}

impl ReportFormatter for HumanFormatter {
    fn format<W: Write>(&self, result: &ValidationResult, writer: &mut W) -> std::io::Result<()> {
        for kind in [Severity::Error, Severity::Warning, Severity::Info] {
            for issue in result.by_severity(kind) {
                let header = format!("{}[{}]", kind, issue.rule);
                writeln!(
                    writer,
                    "{}: {}",
                    self.paint(Self::severity_style(kind), &header),
                    issue.message
                )?;

                if !issue.file.as_os_str().is_empty() {
                    writeln!(writer, "  --> {}", issue.location())?;
                }

                if let Some(suggestion) = &issue.suggestion {
                    writeln!(writer, "   = help: {}", suggestion)?;
                }

                if issue.fixable {
                    writeln!(writer, "   = note: fixable with `trellis fix`")?;
                }

                writeln!(writer)?;
            }
        }

        let summary = result.summary();
        if result.issues().is_empty() {
            writeln!(
                writer,
                "{} No issues found in {} file(s)",
                self.paint(Style::new().green(), "✓"),
                summary.total_files
            )?;
        } else {
            writeln!(
                writer,
                "Found {} error(s), {} warning(s) and {} info(s) in {} file(s)",
                summary.error_count, summary.warning_count, summary.info_count, summary.total_files
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::ValidationIssue;

    fn render(result: &ValidationResult) -> String {
        let mut out = Vec::new();
        HumanFormatter::new(false).format(result, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn formats_issue_with_location_and_help() {
        let mut result = ValidationResult::new();
        result.push(
            ValidationIssue::warning("env.value.unquoted", "Long value of TOKEN should be quoted")
                .in_file(".env")
                .at_line(4)
                .fixable()
                .with_suggestion("TOKEN=\"...\""),
        );

        let output = render(&result);
        assert!(output.contains("warning[env.value.unquoted]: Long value of TOKEN"));
        assert!(output.contains("  --> .env:4"));
        assert!(output.contains("   = help: TOKEN=\"...\""));
        assert!(output.contains("fixable"));
    }

    #[test]
    fn errors_come_before_warnings() {
        let mut result = ValidationResult::new();
        result.push(ValidationIssue::warning("w", "warn").in_file("a"));
        result.push(ValidationIssue::error("e", "err").in_file("b"));

        let output = render(&result);
        assert!(output.find("error[e]").unwrap() < output.find("warning[w]").unwrap());
        assert!(output.contains("Found 1 error(s), 1 warning(s) and 0 info(s)"));
    }

    #[test]
    fn clean_result() {
        let mut result = ValidationResult::new();
        result.record_file(true);
        assert!(render(&result).contains("No issues found in 1 file(s)"));
    }

    #[test]
    fn no_ansi_without_color() {
        let mut result = ValidationResult::new();
        result.push(ValidationIssue::error("e", "err"));
        assert!(!render(&result).contains('\u{1b}'));
    }
}

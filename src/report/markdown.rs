//! Markdown report.

use std::io::Write;

use super::ReportFormatter;
use crate::issue::{Severity, ValidationIssue, ValidationResult};

/// Markdown with a status banner, summary list and per-severity sections.
pub struct MarkdownFormatter;

fn write_issue<W: Write>(writer: &mut W, issue: &ValidationIssue) -> std::io::Result<()> {
    writeln!(writer, "### {}", issue.message)?;
    writeln!(writer)?;
    writeln!(writer, "- **File:** `{}`", issue.file.display())?;
    if let Some(line) = issue.line {
        writeln!(writer, "- **Line:** {}", line)?;
    }
    writeln!(writer, "- **Rule:** `{}`", issue.rule)?;
    writeln!(
        writer,
        "- **Fixable:** {}",
        if issue.fixable { "yes" } else { "no" }
    )?;
    if let Some(suggestion) = &issue.suggestion {
        writeln!(writer, "- **Suggestion:** `{}`", suggestion)?;
    }
    writeln!(writer)
}

impl ReportFormatter for MarkdownFormatter {
    fn format<W: Write>(&self, result: &ValidationResult, writer: &mut W) -> std::io::Result<()> {
        let summary = result.summary();

        writeln!(writer, "# Validation Report")?;
        writeln!(writer)?;
        if result.is_valid() {
            writeln!(writer, "> **Status:** ✅ Valid")?;
        } else {
            writeln!(writer, "> **Status:** ❌ Invalid")?;
        }
        writeln!(writer)?;

        writeln!(writer, "## Summary")?;
        writeln!(writer)?;
        writeln!(writer, "- Files checked: {}", summary.total_files)?;
        writeln!(writer, "- Valid files: {}", summary.valid_files)?;
        writeln!(writer, "- Errors: {}", summary.error_count)?;
        writeln!(writer, "- Warnings: {}", summary.warning_count)?;
        writeln!(writer, "- Info: {}", summary.info_count)?;
        writeln!(writer)?;

        for (kind, heading) in [
            (Severity::Error, "Errors"),
            (Severity::Warning, "Warnings"),
            (Severity::Info, "Info"),
        ] {
            let mut issues = result.by_severity(kind).peekable();
            if issues.peek().is_none() {
                continue;
            }
            writeln!(writer, "## {}", heading)?;
            writeln!(writer)?;
            for issue in issues {
                write_issue(writer, issue)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(result: &ValidationResult) -> String {
        let mut out = Vec::new();
        MarkdownFormatter.format(result, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn valid_result_has_banner_and_summary_only() {
        let md = render(&ValidationResult::new());
        assert!(md.starts_with("# Validation Report\n"));
        assert!(md.contains("✅ Valid"));
        assert!(md.contains("- Errors: 0"));
        assert!(!md.contains("## Errors"));
    }

    #[test]
    fn issues_are_grouped_with_details() {
        let mut result = ValidationResult::new();
        result.push(ValidationIssue::info("i", "fyi").in_file("c"));
        result.push(
            ValidationIssue::error("docker.workdir.missing", "No WORKDIR")
                .in_file("Dockerfile")
                .at_line(2)
                .fixable(),
        );

        let md = render(&result);
        assert!(md.contains("❌ Invalid"));
        assert!(md.contains("- **File:** `Dockerfile`"));
        assert!(md.contains("- **Line:** 2"));
        assert!(md.contains("- **Rule:** `docker.workdir.missing`"));
        assert!(md.contains("- **Fixable:** yes"));

        let errors_at = md.find("## Errors").unwrap();
        let info_at = md.find("## Info").unwrap();
        assert!(errors_at < info_at);
        assert!(!md.contains("## Warnings"));
    }
}

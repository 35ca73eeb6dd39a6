//! HTML report.
//!
//! A fixed, self-contained page: summary counts followed by one card per
//! issue, colour-coded by severity. Every interpolated value is escaped.

use std::io::Write;

use super::ReportFormatter;
use crate::issue::{Severity, ValidationIssue, ValidationResult};

/// Standalone HTML page.
pub struct HtmlFormatter;

/// Escape text for HTML element and attribute content.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn color(kind: Severity) -> &'static str {
    match kind {
        Severity::Error => "#dc3545",
        Severity::Warning => "#ffc107",
        Severity::Info => "#17a2b8",
    }
}

const STYLE: &str = "\
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 2rem; color: #212529; }
.status { padding: 0.75rem 1rem; border-radius: 4px; color: #fff; font-weight: bold; }
.status.valid { background: #28a745; }
.status.invalid { background: #dc3545; }
.summary { display: flex; gap: 1rem; margin: 1.5rem 0; }
.summary div { padding: 0.5rem 1rem; border: 1px solid #dee2e6; border-radius: 4px; }
.issue { border-left: 6px solid; padding: 0.5rem 1rem; margin: 0.75rem 0; background: #f8f9fa; }
.issue .meta { color: #6c757d; font-size: 0.9em; }
code { background: #e9ecef; padding: 0 0.25rem; }
";

fn write_issue<W: Write>(writer: &mut W, issue: &ValidationIssue) -> std::io::Result<()> {
    writeln!(
        writer,
        "<div class=\"issue {}\" style=\"border-color: {}\">",
        issue.kind,
        color(issue.kind)
    )?;
    writeln!(
        writer,
        "  <div><strong>{}</strong>: {}</div>",
        issue.kind,
        escape(&issue.message)
    )?;
    writeln!(
        writer,
        "  <div class=\"meta\">{} &middot; <code>{}</code>{}</div>",
        escape(&issue.location()),
        escape(issue.rule.as_str()),
        if issue.fixable { " &middot; fixable" } else { "" }
    )?;
    if let Some(suggestion) = &issue.suggestion {
        writeln!(
            writer,
            "  <div class=\"meta\">Suggestion: <code>{}</code></div>",
            escape(suggestion)
        )?;
    }
    writeln!(writer, "</div>")
}

impl ReportFormatter for HtmlFormatter {
    fn format<W: Write>(&self, result: &ValidationResult, writer: &mut W) -> std::io::Result<()> {
        let summary = result.summary();

        writeln!(writer, "<!DOCTYPE html>")?;
        writeln!(writer, "<html lang=\"en\">")?;
        writeln!(writer, "<head>")?;
        writeln!(writer, "<meta charset=\"utf-8\">")?;
        writeln!(writer, "<title>Validation Report</title>")?;
        writeln!(writer, "<style>\n{}</style>", STYLE)?;
        writeln!(writer, "</head>")?;
        writeln!(writer, "<body>")?;
        writeln!(writer, "<h1>Validation Report</h1>")?;

        if result.is_valid() {
            writeln!(writer, "<div class=\"status valid\">Valid</div>")?;
        } else {
            writeln!(writer, "<div class=\"status invalid\">Invalid</div>")?;
        }

        writeln!(writer, "<div class=\"summary\">")?;
        for (label, count) in [
            ("Files", summary.total_files),
            ("Valid files", summary.valid_files),
            ("Errors", summary.error_count),
            ("Warnings", summary.warning_count),
            ("Info", summary.info_count),
        ] {
            writeln!(writer, "  <div>{}: <strong>{}</strong></div>", label, count)?;
        }
        writeln!(writer, "</div>")?;

        if result.issues().is_empty() {
            writeln!(writer, "<p>No issues found.</p>")?;
        }
        for kind in [Severity::Error, Severity::Warning, Severity::Info] {
            for issue in result.by_severity(kind) {
                write_issue(writer, issue)?;
            }
        }

        writeln!(writer, "</body>")?;
        writeln!(writer, "</html>")
    }
}

//! JSON report.

use std::io::Write;

use super::ReportFormatter;
use crate::issue::ValidationResult;

/// Pretty-printed JSON of the whole result.
pub struct JsonFormatter;

impl ReportFormatter for JsonFormatter {
    fn format<W: Write>(&self, result: &ValidationResult, writer: &mut W) -> std::io::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, result)?;
        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::ValidationIssue;

    #[test]
    fn preserves_structure() {
        let mut result = ValidationResult::new();
        result.record_file(false);
        result.push(
            ValidationIssue::warning("env.value.unquoted", "quote me")
                .in_file(".env")
                .at_line(2)
                .fixable(),
        );

        let mut out = Vec::new();
        JsonFormatter.format(&result, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["valid"], true);
        assert_eq!(value["summary"]["totalFiles"], 1);
        assert_eq!(value["summary"]["warningCount"], 1);
        assert_eq!(value["issues"][0]["kind"], "warning");
        assert_eq!(value["issues"][0]["line"], 2);

        let back: ValidationResult = serde_json::from_value(value).unwrap();
        assert_eq!(back, result);
    }
}

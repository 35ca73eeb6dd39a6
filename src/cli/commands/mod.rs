//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations and shares the project root and
//! config override between them.

pub mod check;
pub mod completions;
pub mod dispatcher;
pub mod fix;
pub mod schema;
pub mod validate;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};

use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::issue::ValidationResult;
use crate::report::{render_named, HumanFormatter, ReportFormatter};
use crate::ui::UserInterface;

/// Name of the terminal report format.
pub const HUMAN_FORMAT: &str = "human";

/// Render `result` in `format` and send it to `output` or the UI.
///
/// Files never receive ANSI colors.
pub(crate) fn emit_report(
    ui: &mut dyn UserInterface,
    result: &ValidationResult,
    format: &str,
    output: Option<&Path>,
) -> Result<()> {
    let bytes = if format.eq_ignore_ascii_case(HUMAN_FORMAT) {
        let mut buf = Vec::new();
        let formatter = HumanFormatter::new(output.is_none() && ui.use_color());
        formatter.format(result, &mut buf)?;
        buf
    } else {
        render_named(result, format)?
    };

    match output {
        Some(path) => {
            let mut file = std::fs::File::create(path)?;
            file.write_all(&bytes)?;
            ui.success(&format!("Report written to {}", path.display()));
        }
        None => ui.write_raw(&String::from_utf8_lossy(&bytes)),
    }

    Ok(())
}

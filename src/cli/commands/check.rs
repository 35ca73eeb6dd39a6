//! Check command implementation.
//!
//! The `trellis check` command validates explicit files by format and schema,
//! without walking the project.

use std::path::{Path, PathBuf};

use crate::cli::args::CheckArgs;
use crate::config::load_config;
use crate::error::Result;
use crate::ui::UserInterface;
use crate::validator::ProjectValidator;

use super::dispatcher::{Command, CommandResult};
use super::{emit_report, HUMAN_FORMAT};

/// The check command implementation.
pub struct CheckCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(project_root: &Path, config_path: Option<&Path>, args: CheckArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = load_config(&self.project_root, self.config_path.as_deref())?;
        let validator = ProjectValidator::new(&self.project_root).with_config(config);

        for file in &self.args.files {
            ui.detail(&format!("Checking {}", file.display()));
        }
        let result = validator.validate_files(&self.args.files);

        let format = self.args.format.as_deref().unwrap_or(HUMAN_FORMAT);
        emit_report(ui, &result, format, None)?;

        Ok(CommandResult::from_bool(result.is_valid()))
    }
}

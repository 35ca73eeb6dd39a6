//! Validate command implementation.
//!
//! The `trellis validate` command runs every check over the project and
//! reports the result in the chosen format.

use std::path::{Path, PathBuf};

use crate::cli::args::ValidateArgs;
use crate::config::load_config;
use crate::error::Result;
use crate::ui::UserInterface;
use crate::validator::ProjectValidator;

use super::dispatcher::{Command, CommandResult};
use super::{emit_report, HUMAN_FORMAT};

/// The validate command implementation.
pub struct ValidateCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: ValidateArgs,
}

impl ValidateCommand {
    /// Create a new validate command.
    pub fn new(project_root: &Path, config_path: Option<&Path>, args: ValidateArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ValidateArgs {
        &self.args
    }
}

impl Command for ValidateCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = load_config(&self.project_root, self.config_path.as_deref())?;
        let format = self
            .args
            .format
            .clone()
            .or_else(|| config.report.format.clone())
            .unwrap_or_else(|| HUMAN_FORMAT.to_string());

        let validator = ProjectValidator::new(&self.project_root).with_config(config);
        for file in validator.known_files() {
            ui.detail(&format!("Checking {}", file.display()));
        }

        let mut spinner = ui.start_spinner("Validating project...");
        let result = match validator.validate() {
            Ok(result) => {
                spinner.finish_clear();
                result
            }
            Err(e) => {
                spinner.finish_error("Validation failed");
                return Err(e);
            }
        };

        emit_report(ui, &result, &format, self.args.output.as_deref())?;

        let strict_failure = self.args.strict && result.summary().warning_count > 0;
        Ok(CommandResult::from_bool(result.is_valid() && !strict_failure))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    const QUIET_CONFIG: &str = "checks:\n  permissions: false\n";

    fn setup_project() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("README.md"), "# demo\n").unwrap();
        fs::write(temp.path().join("LICENSE"), "MIT\n").unwrap();
        fs::write(
            temp.path().join(".gitignore"),
            "node_modules/\n*.log\n.env\ndist/\nbuild/\n",
        )
        .unwrap();
        fs::write(temp.path().join(".trellis.yml"), QUIET_CONFIG).unwrap();
        temp
    }

    fn run(temp: &TempDir, args: ValidateArgs) -> (CommandResult, MockUI) {
        let mut ui = MockUI::new();
        let result = ValidateCommand::new(temp.path(), None, args)
            .execute(&mut ui)
            .unwrap();
        (result, ui)
    }

    #[test]
    fn clean_project_succeeds() {
        let temp = setup_project();
        let (result, ui) = run(&temp, ValidateArgs::default());

        assert!(result.success);
        assert!(ui.raw_output().contains("No issues found"));
        assert_eq!(ui.spinners().len(), 1);
    }

    #[test]
    fn missing_license_fails() {
        let temp = setup_project();
        fs::remove_file(temp.path().join("LICENSE")).unwrap();

        let (result, ui) = run(&temp, ValidateArgs::default());
        assert_eq!(result.exit_code, 1);
        assert!(ui.raw_output().contains("error[structure.license.required]"));
    }

    #[test]
    fn strict_fails_on_warnings() {
        let temp = setup_project();
        fs::write(temp.path().join("My File.txt"), "x").unwrap();

        let (lenient, _) = run(&temp, ValidateArgs::default());
        assert!(lenient.success);

        let (strict, _) = run(
            &temp,
            ValidateArgs {
                strict: true,
                ..Default::default()
            },
        );
        assert_eq!(strict.exit_code, 1);
    }

    #[test]
    fn json_report_to_file() {
        let temp = setup_project();
        let out = temp.path().join("report.json");

        let (result, ui) = run(
            &temp,
            ValidateArgs {
                format: Some("json".to_string()),
                output: Some(out.clone()),
                strict: false,
            },
        );

        assert!(result.success);
        assert!(ui.has_success("report.json"));
        let report: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(report["valid"], true);
    }

    #[test]
    fn format_from_config() {
        let temp = setup_project();
        fs::write(
            temp.path().join(".trellis.yml"),
            format!("{}report:\n  format: markdown\n", QUIET_CONFIG),
        )
        .unwrap();

        let (_, ui) = run(&temp, ValidateArgs::default());
        assert!(ui.raw_output().starts_with("# Validation Report"));
    }

    #[test]
    fn unknown_format_is_an_error() {
        let temp = setup_project();
        let mut ui = MockUI::new();
        let err = ValidateCommand::new(
            temp.path(),
            None,
            ValidateArgs {
                format: Some("pdf".to_string()),
                ..Default::default()
            },
        )
        .execute(&mut ui)
        .unwrap_err();
        assert!(err.to_string().contains("pdf"));
    }
}

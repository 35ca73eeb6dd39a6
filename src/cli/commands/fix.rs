//! Fix command implementation.
//!
//! The `trellis fix` command validates the project, derives fixes for the
//! fixable issues and previews or applies them.
//!
//! Automatic fixes are always applied. Fixes that are not automatic (renames)
//! are applied with `--all`, otherwise each one is confirmed through the UI.
//! `--yes` answers every confirmation, including the batch confirmation shown
//! on interactive terminals.

use std::path::{Path, PathBuf};

use crate::cli::args::FixArgs;
use crate::config::load_config;
use crate::error::Result;
use crate::fix::{Fix, FixEngine, FixPreview, FixResult, SkipReason};
use crate::ui::{Prompt, UserInterface};
use crate::validator::ProjectValidator;

use super::dispatcher::{Command, CommandResult};

/// Prompt key for confirming the whole batch.
pub const APPLY_PROMPT_KEY: &str = "fix.apply";

/// The fix command implementation.
pub struct FixCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: FixArgs,
}

impl FixCommand {
    /// Create a new fix command.
    pub fn new(project_root: &Path, config_path: Option<&Path>, args: FixArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &FixArgs {
        &self.args
    }

    fn show_preview(&self, ui: &mut dyn UserInterface, preview: &FixPreview) -> CommandResult {
        for outcome in &preview.changes {
            let note = if outcome.fix.automatic || self.args.all {
                ""
            } else {
                " (needs confirmation)"
            };
            ui.message(&format!(
                "would {}: {}{}",
                outcome.change.action, outcome.change.description, note
            ));
        }
        for failed in &preview.failed {
            ui.error(&format!("{}: {}", failed.fix.id, failed.reason));
        }

        let summary = preview.summary();
        ui.message(&format!(
            "{} fix(es) would modify {} file(s)",
            summary.applied, summary.files_modified
        ));

        CommandResult::from_bool(preview.failed.is_empty())
    }

    fn accept(&self, ui: &mut dyn UserInterface, fix: &Fix) -> bool {
        if fix.automatic || self.args.all || self.args.yes {
            return true;
        }

        let prompt = Prompt::new(
            format!("fix.{}", fix.kind()),
            format!("Apply {} ({})?", fix.kind(), fix.id),
        );
        ui.confirm(&prompt).unwrap_or(false)
    }

    fn show_result(&self, ui: &mut dyn UserInterface, result: &FixResult) -> CommandResult {
        for outcome in &result.applied {
            ui.success(&outcome.change.description);
        }
        for failed in &result.failed {
            ui.error(&format!("{}: {}", failed.fix.id, failed.reason));
        }
        for skipped in &result.skipped {
            if skipped.reason == SkipReason::Declined {
                ui.warning(&format!(
                    "Skipped {} at {}: not confirmed",
                    skipped.issue.rule,
                    skipped.issue.location()
                ));
            }
        }

        let summary = result.summary();
        ui.message(&format!("{} file(s) modified", summary.files_modified));

        CommandResult::from_bool(result.is_success())
    }
}

impl Command for FixCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = load_config(&self.project_root, self.config_path.as_deref())?;
        let validator = ProjectValidator::new(&self.project_root).with_config(config);
        let validation = validator.validate()?;

        let engine = FixEngine::new(&self.project_root);
        let preview = engine.preview_issues(validation.issues());

        if self.args.dry_run {
            return Ok(self.show_preview(ui, &preview));
        }

        if preview.changes.is_empty() && preview.failed.is_empty() {
            ui.success("Nothing to fix");
            return Ok(CommandResult::success());
        }

        if ui.is_interactive() && !self.args.yes {
            let count = preview.changes.len() + preview.failed.len();
            let prompt = Prompt::new(
                APPLY_PROMPT_KEY,
                format!("Apply {} fix(es) to {}?", count, self.project_root.display()),
            )
            .with_default(true);
            if !ui.confirm(&prompt)? {
                ui.message("No changes made");
                return Ok(CommandResult::success());
            }
        }

        let result = engine.fix_issues_with(validation.issues(), |fix| self.accept(&mut *ui, fix));
        Ok(self.show_result(ui, &result))
    }
}

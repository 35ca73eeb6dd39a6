//! Schema command implementation.
//!
//! The `trellis schema` command prints the registered schemas, the rule
//! catalog and the JSON Schema of the project config file.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::cli::args::{SchemaAction, SchemaArgs};
use crate::config::{load_config, ProjectConfig};
use crate::error::{Result, TrellisError};
use crate::ui::UserInterface;
use crate::validator::ProjectValidator;

use super::dispatcher::{Command, CommandResult};

/// The schema command implementation.
pub struct SchemaCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: SchemaArgs,
}

impl SchemaCommand {
    /// Create a new schema command.
    pub fn new(project_root: &Path, config_path: Option<&Path>, args: SchemaArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }

    /// The registry as the project sees it, with disabled rules toggled off.
    fn validator(&self) -> Result<ProjectValidator> {
        let config = load_config(&self.project_root, self.config_path.as_deref())?;
        Ok(ProjectValidator::new(&self.project_root).with_config(config))
    }

    fn render(&self) -> Result<String> {
        let mut out = String::new();

        match &self.args.action {
            SchemaAction::List => {
                let validator = self.validator()?;
                let registry = validator.registry();
                for name in registry.list() {
                    let title = registry.get(&name).map(|s| s.title.as_str()).unwrap_or("");
                    let _ = writeln!(out, "{:<20} {}", name, title);
                }
            }
            SchemaAction::Show { name } => {
                let validator = self.validator()?;
                let schema = validator
                    .registry()
                    .get(name)
                    .ok_or_else(|| TrellisError::SchemaNotFound { name: name.clone() })?;
                out = serde_json::to_string_pretty(schema).map_err(anyhow::Error::from)?;
                out.push('\n');
            }
            SchemaAction::Rules { file_type } => {
                let validator = self.validator()?;
                let rules = match file_type {
                    Some(ft) => validator.registry().rules_for(ft),
                    None => validator.registry().rules().iter().collect(),
                };
                for rule in rules {
                    let state = if rule.enabled { "on" } else { "off" };
                    let _ = writeln!(
                        out,
                        "{:<24} {:<3} {:<7} {:<13} {}",
                        rule.id, state, rule.severity, rule.category, rule.description
                    );
                }
            }
            SchemaAction::Config => {
                out = serde_json::to_string_pretty(&ProjectConfig::json_schema())
                    .map_err(anyhow::Error::from)?;
                out.push('\n');
            }
        }

        Ok(out)
    }
}

impl Command for SchemaCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let out = self.render()?;
        ui.write_raw(&out);
        Ok(CommandResult::success())
    }
}

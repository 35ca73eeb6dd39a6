//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, ValidateArgs};
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// Validation findings are reported through `ui` and the returned
    /// [`CommandResult`]; `Err` is reserved for hard failures.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }

    /// Success when `ok`, otherwise failure with exit code 1.
    pub fn from_bool(ok: bool) -> Self {
        if ok {
            Self::success()
        } else {
            Self::failure(1)
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self {
            project_root,
            config_path: None,
        }
    }

    /// Use an explicit config file instead of discovering one.
    pub fn with_config_path(mut self, config_path: Option<PathBuf>) -> Self {
        self.config_path = config_path;
        self
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let root = &self.project_root;
        let config = self.config_path.as_deref();

        match &cli.command {
            Some(Commands::Validate(args)) => {
                super::validate::ValidateCommand::new(root, config, args.clone()).execute(ui)
            }
            Some(Commands::Check(args)) => {
                super::check::CheckCommand::new(root, config, args.clone()).execute(ui)
            }
            Some(Commands::Fix(args)) => {
                super::fix::FixCommand::new(root, config, args.clone()).execute(ui)
            }
            Some(Commands::Schema(args)) => {
                super::schema::SchemaCommand::new(root, config, args.clone()).execute(ui)
            }
            Some(Commands::Completions(args)) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ui)
            }
            None => {
                super::validate::ValidateCommand::new(root, config, ValidateArgs::default())
                    .execute(ui)
            }
        }
    }
}

//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Trellis - Project structure validation and auto-remediation.
#[derive(Debug, Parser)]
#[command(name = "trellis")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides .trellis.yml in the project root)
    #[arg(short, long, global = true, env = "TRELLIS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate the project (default if no command specified)
    Validate(ValidateArgs),

    /// Validate specific files
    Check(CheckArgs),

    /// Apply or preview fixes for fixable issues
    Fix(FixArgs),

    /// Inspect built-in schemas and rules
    Schema(SchemaArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `validate` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ValidateArgs {
    /// Output format: human, json, html, markdown (default from config, else human)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Files to check
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Output format: human, json, html, markdown
    #[arg(short, long)]
    pub format: Option<String>,
}

/// Arguments for the `fix` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct FixArgs {
    /// Show what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Also apply fixes that normally need confirmation (renames)
    #[arg(long)]
    pub all: bool,

    /// Answer yes to every confirmation
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `schema` command.
#[derive(Debug, Clone, clap::Args)]
pub struct SchemaArgs {
    #[command(subcommand)]
    pub action: SchemaAction,
}

/// `schema` subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum SchemaAction {
    /// List registered schemas
    List,

    /// Print one schema as JSON
    Show {
        /// Schema name (see `trellis schema list`)
        name: String,
    },

    /// List catalog rules, optionally for one file type
    Rules {
        /// File type key, e.g. package.json
        file_type: Option<String>,
    },

    /// Print the JSON Schema of .trellis.yml
    Config,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_parses() {
        let cli = Cli::try_parse_from(["trellis"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn validate_flags() {
        let cli = Cli::try_parse_from([
            "trellis", "validate", "--format", "json", "--output", "r.json", "--strict",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Validate(args)) => {
                assert_eq!(args.format.as_deref(), Some("json"));
                assert_eq!(args.output, Some(PathBuf::from("r.json")));
                assert!(args.strict);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn check_requires_files() {
        assert!(Cli::try_parse_from(["trellis", "check"]).is_err());
        let cli = Cli::try_parse_from(["trellis", "check", "a.json", "b.yml"]).unwrap();
        match cli.command {
            Some(Commands::Check(args)) => assert_eq!(args.files.len(), 2),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["trellis", "fix", "--dry-run", "-q", "--no-color"]).unwrap();
        assert!(cli.quiet);
        assert!(cli.no_color);
        assert!(matches!(cli.command, Some(Commands::Fix(FixArgs { dry_run: true, .. }))));
    }

    #[test]
    fn schema_subcommands() {
        let cli = Cli::try_parse_from(["trellis", "schema", "rules", "package.json"]).unwrap();
        match cli.command {
            Some(Commands::Schema(SchemaArgs {
                action: SchemaAction::Rules { file_type },
            })) => assert_eq!(file_type.as_deref(), Some("package.json")),
            other => panic!("unexpected {:?}", other),
        }
    }
}

//! Shell completions generation.
//!
//! The `trellis completions` command generates shell completion scripts.

use crate::cli::args::{Cli, CompletionsArgs};
use crate::ui::UserInterface;
use clap::CommandFactory;

use super::dispatcher::{Command, CommandResult};

/// The completions command implementation.
pub struct CompletionsCommand {
    args: CompletionsArgs,
}

impl CompletionsCommand {
    /// Create a new completions command.
    pub fn new(args: CompletionsArgs) -> Self {
        Self { args }
    }

    /// Render the completion script.
    pub fn script(&self) -> String {
        let mut cmd = Cli::command();
        let mut buf = Vec::new();
        clap_complete::generate(self.args.shell, &mut cmd, "trellis", &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl Command for CompletionsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> crate::error::Result<CommandResult> {
        ui.write_raw(&self.script());
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use clap_complete::Shell;

    #[test]
    fn generates_bash_completions() {
        let output = CompletionsCommand::new(CompletionsArgs { shell: Shell::Bash }).script();
        assert!(output.contains("trellis"));
        assert!(output.contains("complete"));
    }

    #[test]
    fn generates_zsh_completions() {
        let output = CompletionsCommand::new(CompletionsArgs { shell: Shell::Zsh }).script();
        assert!(output.contains("trellis"));
    }

    #[test]
    fn execute_writes_script() {
        let mut ui = MockUI::new();
        let result = CompletionsCommand::new(CompletionsArgs { shell: Shell::Fish })
            .execute(&mut ui)
            .unwrap();
        assert!(result.success);
        assert!(ui.raw_output().contains("validate"));
    }
}

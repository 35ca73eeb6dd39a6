//! Interactive terminal UI.

use console::Term;
use std::io::Write;

use crate::error::Result;

use super::{
    confirm_on, should_use_colors, NonInteractiveUI, OutputMode, ProgressSpinner, Prompt,
    SpinnerHandle, TrellisTheme, UserInterface,
};

/// Interactive terminal UI implementation.
pub struct TerminalUI {
    term: Term,
    theme: TrellisTheme,
    mode: OutputMode,
    use_color: bool,
}

impl TerminalUI {
    /// Create a new terminal UI.
    ///
    /// Colors are used when `no_color` is unset and stdout supports them.
    pub fn new(mode: OutputMode, no_color: bool) -> Self {
        let use_color = !no_color && should_use_colors();
        Self {
            term: Term::stdout(),
            theme: TrellisTheme::for_color(use_color),
            mode,
            use_color,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(Term::stderr(), "{}", self.theme.format_error(msg)).ok();
    }

    fn write_raw(&mut self, text: &str) {
        self.term.write_all(text.as_bytes()).ok();
        self.term.flush().ok();
    }

    fn confirm(&mut self, prompt: &Prompt) -> Result<bool> {
        confirm_on(prompt, &self.term, self.use_color)
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() {
            Box::new(ProgressSpinner::new(message, self.theme.clone()))
        } else {
            Box::new(ProgressSpinner::hidden())
        }
    }

    fn use_color(&self) -> bool {
        self.use_color
    }

    fn is_interactive(&self) -> bool {
        self.term.is_term()
    }
}

/// Create the appropriate UI based on context.
pub fn create_ui(interactive: bool, mode: OutputMode, no_color: bool) -> Box<dyn UserInterface> {
    if interactive && Term::stdout().is_term() {
        Box::new(TerminalUI::new(mode, no_color))
    } else {
        Box::new(NonInteractiveUI::new(mode))
    }
}

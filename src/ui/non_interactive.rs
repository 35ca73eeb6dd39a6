//! Non-interactive UI for CI/headless environments.

use std::collections::HashMap;
use std::io::Write;

use crate::error::Result;

use super::{NoopSpinner, OutputMode, Prompt, SpinnerHandle, UserInterface};

/// Prefix of environment variables that answer prompts.
pub const PROMPT_ENV_PREFIX: &str = "TRELLIS_PROMPT_";

/// UI implementation for non-interactive mode.
///
/// Output is plain text. Prompts are answered from `TRELLIS_PROMPT_<KEY>`
/// environment variables, falling back to the prompt default.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self {
            mode,
            env_overrides,
        }
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
        }
    }

    fn override_key(key: &str) -> String {
        let key: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
            .collect();
        format!("{}{}", PROMPT_ENV_PREFIX, key)
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn write_raw(&mut self, text: &str) {
        let mut stdout = std::io::stdout();
        stdout.write_all(text.as_bytes()).ok();
        stdout.flush().ok();
    }

    fn confirm(&mut self, prompt: &Prompt) -> Result<bool> {
        let answer = self
            .env_overrides
            .get(&Self::override_key(&prompt.key))
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "y" | "yes" | "true" | "1"));
        Ok(answer.unwrap_or(prompt.default))
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        // Progress goes to stderr so piped reports stay parseable.
        if self.mode.shows_spinners() {
            eprintln!("{}", message);
        }
        Box::new(NoopSpinner)
    }

    fn use_color(&self) -> bool {
        false
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

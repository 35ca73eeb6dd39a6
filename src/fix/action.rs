//! Fix model.

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Result, TrellisError};
use crate::issue::RuleId;

/// The closed set of fix actions, as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixActionKind {
    Create,
    Replace,
    Insert,
    Delete,
    Rename,
}

impl FixActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FixActionKind::Create => "create",
            FixActionKind::Replace => "replace",
            FixActionKind::Insert => "insert",
            FixActionKind::Delete => "delete",
            FixActionKind::Rename => "rename",
        }
    }
}

impl fmt::Display for FixActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FixActionKind {
    type Err = TrellisError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "create" => Ok(FixActionKind::Create),
            "replace" => Ok(FixActionKind::Replace),
            "insert" => Ok(FixActionKind::Insert),
            "delete" => Ok(FixActionKind::Delete),
            "rename" => Ok(FixActionKind::Rename),
            other => Err(TrellisError::UnsupportedFixAction {
                action: other.to_string(),
            }),
        }
    }
}

/// What a fix does. Each variant carries only the fields it uses.
///
/// Lines are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum FixAction {
    /// Write a new file. Fails if the file exists.
    Create { content: String },
    /// Replace one line. Out-of-range lines are a no-op.
    Replace { line: usize, content: String },
    /// Insert before `line`; `len + 1` appends. Out-of-range lines are a no-op.
    Insert { line: usize, content: String },
    /// Remove one line. Out-of-range lines are a no-op.
    Delete { line: usize },
    /// Move the file to `to`. Fails if `to` exists.
    Rename { to: PathBuf },
}

impl FixAction {
    pub fn kind(&self) -> FixActionKind {
        match self {
            FixAction::Create { .. } => FixActionKind::Create,
            FixAction::Replace { .. } => FixActionKind::Replace,
            FixAction::Insert { .. } => FixActionKind::Insert,
            FixAction::Delete { .. } => FixActionKind::Delete,
            FixAction::Rename { .. } => FixActionKind::Rename,
        }
    }

    /// The line this action targets, for line edits.
    pub fn line(&self) -> Option<usize> {
        match self {
            FixAction::Replace { line, .. }
            | FixAction::Insert { line, .. }
            | FixAction::Delete { line } => Some(*line),
            FixAction::Create { .. } | FixAction::Rename { .. } => None,
        }
    }
}

/// A concrete remediation derived from one issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fix {
    /// `{rule}:{file}[:{line}]`, stable across re-derivation.
    pub id: String,
    /// Target file, project-relative or absolute.
    pub file: PathBuf,
    #[serde(flatten)]
    pub action: FixAction,
    /// Whether the fix is safe to apply without confirmation.
    pub automatic: bool,
}

impl Fix {
    /// Create a fix for an issue raised by `rule`.
    pub fn new(rule: &RuleId, file: impl Into<PathBuf>, action: FixAction) -> Self {
        let file = file.into();
        let automatic = action.kind() != FixActionKind::Rename;
        Self {
            id: Self::id_for(rule.as_str(), &file, action.line()),
            file,
            action,
            automatic,
        }
    }

    /// Build a fix from untyped parts.
    ///
    /// `content` is the file content for `create`, the line text for
    /// `replace`/`insert` and the new path for `rename`. Unknown actions are
    /// rejected with [`TrellisError::UnsupportedFixAction`].
    pub fn from_parts(
        rule: &str,
        action: &str,
        file: impl Into<PathBuf>,
        line: Option<usize>,
        content: impl Into<String>,
    ) -> Result<Self> {
        let kind: FixActionKind = action.parse()?;
        let content = content.into();
        let need_line = || {
            line.ok_or_else(|| TrellisError::from(anyhow!("{} fix requires a line", kind)))
        };

        let action = match kind {
            FixActionKind::Create => FixAction::Create { content },
            FixActionKind::Replace => FixAction::Replace {
                line: need_line()?,
                content,
            },
            FixActionKind::Insert => FixAction::Insert {
                line: need_line()?,
                content,
            },
            FixActionKind::Delete => FixAction::Delete { line: need_line()? },
            FixActionKind::Rename => FixAction::Rename {
                to: PathBuf::from(content),
            },
        };

        Ok(Self::new(&RuleId::new(rule), file, action))
    }

    /// Compute a fix ID.
    pub fn id_for(rule: &str, file: &Path, line: Option<usize>) -> String {
        match line {
            Some(line) => format!("{}:{}:{}", rule, file.display(), line),
            None => format!("{}:{}", rule, file.display()),
        }
    }

    /// Mark the fix as requiring confirmation.
    pub fn manual(mut self) -> Self {
        self.automatic = false;
        self
    }

    pub fn kind(&self) -> FixActionKind {
        self.action.kind()
    }
}

//! Rule-ID keyed fix derivation.
//!
//! Each recognised rule maps to exactly one fix constructor. Derivation reads
//! only the issue (its location and suggestion), never the filesystem, so the
//! same issue list always derives the same fixes.
//!
//! | Rule | Fix |
//! |---|---|
//! | `structure.readme.required`, `structure.license.required`, `structure.gitignore.required`, `structure.docker.dockerignore` | create with canned content |
//! | `quality.naming.conventions` (space in name) | rename to the suggested name |
//! | `template.file.extension` | rename, appending `.tmpl` |
//! | `env.value.unquoted`, `makefile.recipe.indent` | replace the line with the suggestion |
//! | `docker.workdir.missing`, `makefile.phony.missing`, `gitignore.pattern.missing`, `dockerignore.pattern.missing` | insert the suggestion at the issue line |

use std::path::{Path, PathBuf};

use super::action::{Fix, FixAction};
use super::content;
use crate::formats::env;
use crate::issue::{rules, ValidationIssue};
use crate::structure::templates::TEMPLATE_SUFFIX;

/// Derive the fix for `issue`, if its rule has one.
///
/// The issue's `fixable` flag is not consulted here; batch callers skip
/// non-fixable issues before deriving.
pub fn derive_fix(issue: &ValidationIssue) -> Option<Fix> {
    let action = match issue.rule.as_str() {
        rules::README_REQUIRED
        | rules::LICENSE_REQUIRED
        | rules::GITIGNORE_REQUIRED
        | rules::DOCKER_DOCKERIGNORE => create(&issue.file)?,

        rules::NAMING_CONVENTIONS if issue.message.contains("space") => FixAction::Rename {
            to: sibling(&issue.file, issue.suggestion.as_deref()?),
        },

        rules::TEMPLATE_FILE_EXTENSION => {
            let name = issue.file.file_name()?.to_str()?;
            FixAction::Rename {
                to: sibling(&issue.file, &format!("{}{}", name, TEMPLATE_SUFFIX)),
            }
        }

        rules::ENV_VALUE_UNQUOTED | rules::MAKEFILE_RECIPE_INDENT => FixAction::Replace {
            line: issue.line?,
            content: issue.suggestion.clone()?,
        },

        rules::DOCKER_WORKDIR_MISSING
        | rules::MAKEFILE_PHONY_MISSING
        | rules::GITIGNORE_PATTERN_MISSING
        | rules::DOCKERIGNORE_PATTERN_MISSING => FixAction::Insert {
            line: issue.line?,
            content: issue.suggestion.clone()?,
        },

        _ => return None,
    };

    let fix = Fix::new(&issue.rule, &issue.file, action);
    if issue.rule.as_str() == rules::ENV_VALUE_UNQUOTED && !quotes_cleanly(issue) {
        return Some(fix.manual());
    }
    Some(fix)
}

/// Whether the quoted `.env` line keeps the value it replaces.
fn quotes_cleanly(issue: &ValidationIssue) -> bool {
    issue
        .suggestion
        .as_deref()
        .and_then(env::parse_line)
        .is_some_and(|entry| entry.quotes_cleanly())
}

fn create(file: &Path) -> Option<FixAction> {
    let name = file.file_name()?.to_str()?;
    Some(FixAction::Create {
        content: content::canned(name)?.to_string(),
    })
}

fn sibling(file: &Path, name: &str) -> PathBuf {
    file.with_file_name(name)
}

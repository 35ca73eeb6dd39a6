//! Fix application.
//!
//! Apply and preview share one planning step: the edit is computed against
//! the current file contents, then either written (apply) or only described
//! (preview). Both return the same [`FileChange`] for the same starting
//! state.
//!
//! Batches run in the same order for apply and preview. Within one file,
//! creates come first, then line edits from the bottom of the file up, then
//! renames, so an edit never shifts the line another edit targets. A batch
//! preview stages each planned change in memory, so every previewed
//! [`FileChange`] equals the one apply returns for that fix.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::action::{Fix, FixAction, FixActionKind};
use super::derive::derive_fix;
use super::lines::{count_lines, LineBuffer};
use super::result::{
    FailedFix, FileChange, FixOutcome, FixPreview, FixResult, SkipReason, SkippedIssue,
};
use crate::error::{Result, TrellisError};
use crate::issue::ValidationIssue;

/// What applying a fix would write.
enum Plan {
    Create { path: PathBuf, content: String },
    Rewrite { path: PathBuf, text: String, changed: bool },
    Rename { from: PathBuf, to: PathBuf },
}

/// A file as earlier fixes of a previewed batch left it.
#[derive(Debug, Clone)]
enum StagedFile {
    Text(String),
    /// Renamed; the contents are still on disk at this path.
    MovedFrom(PathBuf),
    Removed,
}

/// In-memory overlay of the filesystem used by batch preview.
///
/// An empty overlay reads straight from disk, which is what apply uses.
#[derive(Debug, Default)]
struct Staged {
    files: HashMap<PathBuf, StagedFile>,
}

impl Staged {
    fn exists(&self, path: &Path) -> bool {
        match self.files.get(path) {
            Some(StagedFile::Removed) => false,
            Some(_) => true,
            None => path.symlink_metadata().is_ok(),
        }
    }

    fn ensure_exists(&self, path: &Path) -> io::Result<()> {
        match self.files.get(path) {
            Some(StagedFile::Removed) => Err(moved_away(path)),
            Some(_) => Ok(()),
            None => path.symlink_metadata().map(|_| ()),
        }
    }

    fn read(&self, path: &Path) -> io::Result<String> {
        match self.files.get(path) {
            Some(StagedFile::Text(text)) => Ok(text.clone()),
            Some(StagedFile::MovedFrom(source)) => fs::read_to_string(source),
            Some(StagedFile::Removed) => Err(moved_away(path)),
            None => fs::read_to_string(path),
        }
    }

    fn record(&mut self, plan: &Plan) {
        match plan {
            Plan::Create { path, content } => {
                self.files.insert(path.clone(), StagedFile::Text(content.clone()));
            }
            Plan::Rewrite { path, text, .. } => {
                self.files.insert(path.clone(), StagedFile::Text(text.clone()));
            }
            Plan::Rename { from, to } => {
                let moved = match self.files.get(from) {
                    Some(StagedFile::Text(text)) => StagedFile::Text(text.clone()),
                    Some(StagedFile::MovedFrom(source)) => StagedFile::MovedFrom(source.clone()),
                    _ => StagedFile::MovedFrom(from.clone()),
                };
                self.files.insert(to.clone(), moved);
                self.files.insert(from.clone(), StagedFile::Removed);
            }
        }
    }
}

fn moved_away(path: &Path) -> io::Error {
    io::Error::new(
        ErrorKind::NotFound,
        format!("{} was moved by an earlier fix", path.display()),
    )
}

/// Applies and previews fixes relative to a project root.
#[derive(Debug, Clone)]
pub struct FixEngine {
    root: PathBuf,
}

impl FixEngine {
    /// Create an engine; relative fix paths resolve against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn plan(&self, fix: &Fix, staged: &Staged) -> Result<(Plan, FileChange)> {
        let path = self.resolve(&fix.file);
        let change = |lines_before: Option<usize>,
                      lines_after: Option<usize>,
                      target: Option<PathBuf>,
                      description: String,
                      contents: Option<String>| FileChange {
            file: fix.file.clone(),
            action: fix.kind(),
            lines_before,
            lines_after,
            target,
            description,
            contents,
        };
        let out_of_range = |line: usize| {
            format!("Line {} of {} is out of range, no change", line, fix.file.display())
        };

        match &fix.action {
            FixAction::Create { content } => {
                if staged.exists(&path) {
                    return Err(TrellisError::FileExists { path: fix.file.clone() });
                }
                let lines = count_lines(content);
                let description = format!("Create {} ({} lines)", fix.file.display(), lines);
                Ok((
                    Plan::Create {
                        path,
                        content: content.clone(),
                    },
                    change(None, Some(lines), None, description, Some(content.clone())),
                ))
            }
            FixAction::Replace { line, content } => self
                .plan_edit(fix, path, staged, |buf| buf.replace(*line, content), |applied| {
                    if applied {
                        format!("Replace line {} of {}", line, fix.file.display())
                    } else {
                        out_of_range(*line)
                    }
                })
                .map(|(plan, before, after, description, text)| {
                    (plan, change(Some(before), Some(after), None, description, Some(text)))
                }),
            FixAction::Insert { line, content } => self
                .plan_edit(fix, path, staged, |buf| buf.insert(*line, content), |applied| {
                    if applied {
                        format!("Insert before line {} of {}", line, fix.file.display())
                    } else {
                        out_of_range(*line)
                    }
                })
                .map(|(plan, before, after, description, text)| {
                    (plan, change(Some(before), Some(after), None, description, Some(text)))
                }),
            FixAction::Delete { line } => self
                .plan_edit(fix, path, staged, |buf| buf.delete(*line), |applied| {
                    if applied {
                        format!("Delete line {} of {}", line, fix.file.display())
                    } else {
                        out_of_range(*line)
                    }
                })
                .map(|(plan, before, after, description, text)| {
                    (plan, change(Some(before), Some(after), None, description, Some(text)))
                }),
            FixAction::Rename { to } => {
                staged.ensure_exists(&path)?;
                let target = self.resolve(to);
                if staged.exists(&target) {
                    return Err(TrellisError::FileExists { path: to.clone() });
                }
                let description = format!("Rename {} to {}", fix.file.display(), to.display());
                Ok((
                    Plan::Rename { from: path, to: target },
                    change(None, None, Some(to.clone()), description, None),
                ))
            }
        }
    }

    fn plan_edit(
        &self,
        fix: &Fix,
        path: PathBuf,
        staged: &Staged,
        edit: impl FnOnce(&mut LineBuffer) -> bool,
        describe: impl FnOnce(bool) -> String,
    ) -> Result<(Plan, usize, usize, String, String)> {
        let original = staged.read(&path)?;
        let mut buf = LineBuffer::parse(&original);
        let before = buf.len();
        let changed = edit(&mut buf);
        debug!("Planned {} on {}: changed={}", fix.kind(), fix.file.display(), changed);
        let text = buf.render();
        Ok((
            Plan::Rewrite {
                path,
                text: text.clone(),
                changed,
            },
            before,
            buf.len(),
            describe(changed),
            text,
        ))
    }

    /// Apply one fix.
    ///
    /// `create` and `rename` never overwrite: an existing target is
    /// [`TrellisError::FileExists`] and nothing is written.
    pub fn apply_fix(&self, fix: &Fix) -> Result<FileChange> {
        let (plan, change) = self.plan(fix, &Staged::default())?;

        match plan {
            Plan::Create { path, content } => {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                let mut file = OpenOptions::new()
                    .write(true)
                    .create_new(true)
                    .open(&path)
                    .map_err(|e| match e.kind() {
                        ErrorKind::AlreadyExists => TrellisError::FileExists {
                            path: fix.file.clone(),
                        },
                        _ => TrellisError::Io(e),
                    })?;
                file.write_all(content.as_bytes())?;
            }
            Plan::Rewrite { path, text, changed } => {
                if changed {
                    fs::write(&path, text)?;
                }
            }
            Plan::Rename { from, to } => {
                if let Some(parent) = to.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::rename(&from, &to)?;
            }
        }

        info!("Applied fix {}", fix.id);
        Ok(change)
    }

    /// Describe what [`apply_fix`](Self::apply_fix) would do, without writing.
    ///
    /// Fails exactly when apply would fail before writing.
    pub fn preview_fix(&self, fix: &Fix) -> Result<FileChange> {
        self.plan(fix, &Staged::default()).map(|(_, change)| change)
    }

    /// Derive and apply fixes for every fixable issue.
    pub fn fix_issues(&self, issues: &[ValidationIssue]) -> FixResult {
        self.fix_issues_with(issues, |_| true)
    }

    /// Like [`fix_issues`](Self::fix_issues), but only fixes accepted by
    /// `accept` are applied; the rest are skipped as declined.
    ///
    /// Each fix is independent: one failure does not stop the batch.
    pub fn fix_issues_with(
        &self,
        issues: &[ValidationIssue],
        mut accept: impl FnMut(&Fix) -> bool,
    ) -> FixResult {
        let (fixes, skipped) = batch(issues);
        let mut result = FixResult {
            skipped,
            ..FixResult::default()
        };

        for (issue, fix) in fixes {
            if !accept(&fix) {
                result.skipped.push(SkippedIssue {
                    issue: issue.clone(),
                    reason: SkipReason::Declined,
                });
                continue;
            }

            match self.apply_fix(&fix) {
                Ok(change) => result.applied.push(FixOutcome { fix, change }),
                Err(e) => {
                    warn!("Fix {} failed: {}", fix.id, e);
                    result.failed.push(FailedFix {
                        fix,
                        reason: e.to_string(),
                    });
                }
            }
        }

        result
    }

    /// Derive and preview fixes for every fixable issue.
    ///
    /// Each previewed change sees the effect of the fixes before it, exactly
    /// as [`fix_issues`](Self::fix_issues) would apply them.
    pub fn preview_issues(&self, issues: &[ValidationIssue]) -> FixPreview {
        let (fixes, skipped) = batch(issues);
        let mut preview = FixPreview {
            skipped,
            ..FixPreview::default()
        };
        let mut staged = Staged::default();

        for (_, fix) in fixes {
            match self.plan(&fix, &staged) {
                Ok((plan, change)) => {
                    staged.record(&plan);
                    preview.changes.push(FixOutcome { fix, change });
                }
                Err(e) => preview.failed.push(FailedFix {
                    fix,
                    reason: e.to_string(),
                }),
            }
        }

        preview
    }
}

fn derivable(issue: &ValidationIssue) -> std::result::Result<Fix, SkipReason> {
    if !issue.fixable {
        return Err(SkipReason::NotFixable);
    }
    derive_fix(issue).ok_or(SkipReason::NoFix)
}

/// Derive the fixes of a batch in application order.
///
/// Identical fixes derived from several issues are kept once. Files keep the
/// order in which issues first mention them. Within a file: creates, then
/// line edits by descending line, then renames. Ties keep the issue order.
fn batch(issues: &[ValidationIssue]) -> (Vec<(&ValidationIssue, Fix)>, Vec<SkippedIssue>) {
    let mut fixes: Vec<(&ValidationIssue, Fix)> = Vec::new();
    let mut skipped = Vec::new();
    let mut file_order: HashMap<PathBuf, usize> = HashMap::new();

    for issue in issues {
        match derivable(issue) {
            Ok(fix) if fixes.iter().any(|(_, seen)| *seen == fix) => {
                debug!("Fix {} already derived", fix.id);
                skipped.push(SkippedIssue {
                    issue: issue.clone(),
                    reason: SkipReason::Covered,
                });
            }
            Ok(fix) => {
                let next = file_order.len();
                file_order.entry(fix.file.clone()).or_insert(next);
                fixes.push((issue, fix));
            }
            Err(reason) => skipped.push(SkippedIssue {
                issue: issue.clone(),
                reason,
            }),
        }
    }

    fixes.sort_by_key(|(_, fix)| {
        let stage = match fix.kind() {
            FixActionKind::Create => 0,
            FixActionKind::Rename => 2,
            _ => 1,
        };
        (
            file_order.get(&fix.file).copied().unwrap_or_default(),
            stage,
            Reverse(fix.action.line().unwrap_or_default()),
        )
    });

    (fixes, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::{rules, RuleId};
    use tempfile::TempDir;

    fn engine() -> (TempDir, FixEngine) {
        let temp = TempDir::new().unwrap();
        let engine = FixEngine::new(temp.path());
        (temp, engine)
    }

    fn line_fix(file: &str, action: FixAction) -> Fix {
        Fix::new(&RuleId::new("test.rule"), file, action)
    }

    #[test]
    fn create_writes_file_and_parents() {
        let (temp, engine) = engine();
        let fix = line_fix(
            "docs/guide.md",
            FixAction::Create {
                content: "# Guide\n\nText\n".into(),
            },
        );

        let change = engine.apply_fix(&fix).unwrap();
        assert_eq!(change.lines_after, Some(3));
        assert_eq!(
            fs::read_to_string(temp.path().join("docs/guide.md")).unwrap(),
            "# Guide\n\nText\n"
        );
    }

    #[test]
    fn create_never_overwrites() {
        let (temp, engine) = engine();
        fs::write(temp.path().join("README.md"), "mine").unwrap();
        let fix = line_fix(
            "README.md",
            FixAction::Create {
                content: "theirs".into(),
            },
        );

        let err = engine.apply_fix(&fix).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert!(engine.preview_fix(&fix).is_err());
        assert_eq!(fs::read_to_string(temp.path().join("README.md")).unwrap(), "mine");
    }

    #[test]
    fn replace_insert_delete() {
        let (temp, engine) = engine();
        let path = temp.path().join("f.txt");
        fs::write(&path, "a\nb\nc\n").unwrap();

        engine
            .apply_fix(&line_fix("f.txt", FixAction::Replace { line: 2, content: "B".into() }))
            .unwrap();
        engine
            .apply_fix(&line_fix("f.txt", FixAction::Insert { line: 4, content: "d".into() }))
            .unwrap();
        engine
            .apply_fix(&line_fix("f.txt", FixAction::Delete { line: 1 }))
            .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "B\nc\nd\n");
    }

    #[test]
    fn out_of_range_edits_leave_file_untouched() {
        let (temp, engine) = engine();
        let path = temp.path().join("f.txt");
        fs::write(&path, "a\n").unwrap();

        let change = engine
            .apply_fix(&line_fix("f.txt", FixAction::Delete { line: 9 }))
            .unwrap();
        assert_eq!(change.lines_before, change.lines_after);
        assert!(change.description.contains("out of range"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "a\n");
    }

    #[test]
    fn line_edit_on_missing_file_fails() {
        let (_temp, engine) = engine();
        let fix = line_fix("nope.txt", FixAction::Delete { line: 1 });
        assert!(matches!(engine.apply_fix(&fix), Err(TrellisError::Io(_))));
    }

    #[test]
    fn rename_moves_file_and_refuses_to_clobber() {
        let (temp, engine) = engine();
        fs::write(temp.path().join("my notes.md"), "x").unwrap();
        fs::write(temp.path().join("taken.md"), "y").unwrap();

        let clobber = line_fix("my notes.md", FixAction::Rename { to: "taken.md".into() });
        assert!(matches!(
            engine.apply_fix(&clobber),
            Err(TrellisError::FileExists { .. })
        ));

        let fix = line_fix("my notes.md", FixAction::Rename { to: "my-notes.md".into() });
        let change = engine.apply_fix(&fix).unwrap();
        assert_eq!(change.target, Some(PathBuf::from("my-notes.md")));
        assert!(temp.path().join("my-notes.md").exists());
        assert!(!temp.path().join("my notes.md").exists());
    }

    #[test]
    fn preview_does_not_write() {
        let (temp, engine) = engine();
        let path = temp.path().join("f.txt");
        fs::write(&path, "a\n").unwrap();

        let change = engine
            .preview_fix(&line_fix("f.txt", FixAction::Insert { line: 1, content: "z".into() }))
            .unwrap();
        assert_eq!(change.lines_before, Some(1));
        assert_eq!(change.lines_after, Some(2));
        assert_eq!(fs::read_to_string(&path).unwrap(), "a\n");
    }

    #[test]
    fn batch_isolates_failures_and_counts_files() {
        let (temp, engine) = engine();
        fs::write(temp.path().join("README.md"), "exists").unwrap();
        fs::write(temp.path().join(".gitignore"), "node_modules/\n").unwrap();

        let issues = vec![
            ValidationIssue::error(rules::README_REQUIRED, "m").in_file("README.md").fixable(),
            ValidationIssue::error(rules::LICENSE_REQUIRED, "m").in_file("LICENSE").fixable(),
            ValidationIssue::info(rules::GITIGNORE_PATTERN_MISSING, "m")
                .in_file(".gitignore")
                .at_line(2)
                .fixable()
                .with_suggestion("*.log"),
            ValidationIssue::info(rules::GITIGNORE_PATTERN_MISSING, "m")
                .in_file(".gitignore")
                .at_line(2)
                .fixable()
                .with_suggestion(".env"),
            ValidationIssue::warning(rules::NAMING_CONVENTIONS, "camel").in_file("aB.txt"),
            ValidationIssue::error("custom.rule", "m").in_file("x").fixable(),
        ];

        let result = engine.fix_issues(&issues);
        let summary = result.summary();

        assert_eq!(summary.applied, 3);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.skipped, 2);
        assert_eq!(summary.files_modified, 2);
        assert_eq!(result.skipped[0].reason, SkipReason::NotFixable);
        assert_eq!(result.skipped[1].reason, SkipReason::NoFix);
        assert!(temp.path().join("LICENSE").exists());
        assert_eq!(fs::read_to_string(temp.path().join("README.md")).unwrap(), "exists");

        let gitignore = fs::read_to_string(temp.path().join(".gitignore")).unwrap();
        assert!(gitignore.contains("*.log\n"));
        assert!(gitignore.contains(".env\n"));
    }

    #[test]
    fn filter_declines_fixes() {
        let (temp, engine) = engine();
        let issues = vec![
            ValidationIssue::error(rules::README_REQUIRED, "m").in_file("README.md").fixable(),
            ValidationIssue::error(rules::LICENSE_REQUIRED, "m").in_file("LICENSE").fixable(),
        ];

        let result = engine.fix_issues_with(&issues, |fix| fix.file != Path::new("LICENSE"));

        assert_eq!(result.applied.len(), 1);
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].reason, SkipReason::Declined);
        assert!(temp.path().join("README.md").exists());
        assert!(!temp.path().join("LICENSE").exists());
    }

    #[test]
    fn preview_issues_matches_apply() {
        let (temp, engine) = engine();
        fs::write(temp.path().join("Dockerfile"), "FROM node:18\nCOPY . .\n").unwrap();
        let issues = vec![
            ValidationIssue::error(rules::DOCKER_WORKDIR_MISSING, "m")
                .in_file("Dockerfile")
                .at_line(2)
                .fixable()
                .with_suggestion("WORKDIR /app"),
            ValidationIssue::error(rules::README_REQUIRED, "m").in_file("README.md").fixable(),
        ];

        let preview = engine.preview_issues(&issues);
        assert!(!temp.path().join("README.md").exists());

        let applied = engine.fix_issues(&issues);
        let previewed: Vec<_> = preview.changes.iter().map(|o| &o.change).collect();
        let performed: Vec<_> = applied.applied.iter().map(|o| &o.change).collect();
        assert_eq!(previewed, performed);
        assert_eq!(preview.summary(), applied.summary());
        assert_eq!(
            fs::read_to_string(temp.path().join("Dockerfile")).unwrap(),
            "FROM node:18\nWORKDIR /app\nCOPY . .\n"
        );
    }

    #[test]
    fn same_file_edits_run_bottom_up() {
        let (temp, engine) = engine();
        let path = temp.path().join("Makefile");
        fs::write(&path, "build:\n    cc\ntest:\n    ct\n").unwrap();

        let issues = vec![
            ValidationIssue::info(rules::MAKEFILE_PHONY_MISSING, "m")
                .in_file("Makefile")
                .at_line(1)
                .fixable()
                .with_suggestion(".PHONY: build test"),
            ValidationIssue::error(rules::MAKEFILE_RECIPE_INDENT, "m")
                .in_file("Makefile")
                .at_line(2)
                .fixable()
                .with_suggestion("\tcc"),
            ValidationIssue::error(rules::MAKEFILE_RECIPE_INDENT, "m")
                .in_file("Makefile")
                .at_line(4)
                .fixable()
                .with_suggestion("\tct"),
        ];

        let preview = engine.preview_issues(&issues);
        let result = engine.fix_issues(&issues);

        let expected = ".PHONY: build test\nbuild:\n\tcc\ntest:\n\tct\n";
        assert_eq!(fs::read_to_string(&path).unwrap(), expected);

        let order: Vec<_> = result.applied.iter().map(|o| o.fix.action.line()).collect();
        assert_eq!(order, vec![Some(4), Some(2), Some(1)]);

        let previewed: Vec<_> = preview.changes.iter().map(|o| &o.change).collect();
        let performed: Vec<_> = result.applied.iter().map(|o| &o.change).collect();
        assert_eq!(previewed, performed);
        assert_eq!(
            preview.changes.last().unwrap().change.contents.as_deref(),
            Some(expected)
        );
    }

    #[test]
    fn preview_tracks_earlier_renames() {
        let (temp, engine) = engine();
        fs::write(temp.path().join("my notes.md"), "x\n").unwrap();
        let issue = ValidationIssue::warning(rules::NAMING_CONVENTIONS, "name contains a space")
            .in_file("my notes.md")
            .fixable()
            .with_suggestion("my-notes.md");
        let issues = vec![issue.clone(), issue];

        let preview = engine.preview_issues(&issues);
        assert_eq!(preview.changes.len(), 1);
        assert_eq!(preview.failed.len(), 1);
        assert!(temp.path().join("my notes.md").exists());

        let result = engine.fix_issues(&issues);
        assert_eq!(result.applied.len(), 1);
        assert_eq!(result.failed.len(), 1);
        assert_eq!(preview.summary(), result.summary());
    }

    #[test]
    fn missing_ignore_patterns_are_appended_once_in_order() {
        use crate::formats::ignore::{check, IgnoreKind};

        let (temp, engine) = engine();
        let path = temp.path().join(".gitignore");
        fs::write(&path, "node_modules/\n*.log\n").unwrap();
        let issues = check(IgnoreKind::Git, Path::new(".gitignore"), "node_modules/\n*.log\n");
        assert_eq!(issues.len(), 3);

        let result = engine.fix_issues(&issues);

        assert_eq!(result.applied.len(), 1);
        assert_eq!(result.skipped.len(), 2);
        assert!(result.skipped.iter().all(|s| s.reason == SkipReason::Covered));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "node_modules/\n*.log\n.env\ndist/\nbuild/\n"
        );
    }
}

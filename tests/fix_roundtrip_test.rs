//! Preview/apply round trips through the public fix API.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tempfile::TempDir;
use trellis::config::{ChecksConfig, ProjectConfig};
use trellis::fix::{derive_fix, Fix, FixAction, FixEngine, SkipReason};
use trellis::issue::{rules, ValidationIssue};
use trellis::validator::ProjectValidator;
use trellis::TrellisError;

fn validator(root: &Path) -> ProjectValidator {
    ProjectValidator::new(root).with_config(ProjectConfig {
        checks: ChecksConfig {
            permissions: false,
            ..ChecksConfig::default()
        },
        ..ProjectConfig::default()
    })
}

const MESSY_ENV: &str = "API_TOKEN=abcdefghijklmnopqrstuvwxyz0123\n\
PORT=3000   # port the server listens on\n\
SESSION_SECRET=abcdefghijklmnopqrstuvwx # rotated monthly\n";

fn messy_project() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::write(root.join("README.md"), "# svc\n").unwrap();
    fs::write(root.join("LICENSE"), "MIT\n").unwrap();
    fs::write(root.join(".gitignore"), "node_modules/\n").unwrap();
    fs::write(root.join("Dockerfile"), "FROM node:18\nCOPY . .\n").unwrap();
    fs::write(root.join("Makefile"), "build:\n    echo hi\ntest:\n    echo ok\n").unwrap();
    fs::write(root.join(".env"), MESSY_ENV).unwrap();
    temp
}

fn snapshot(root: &Path) -> Vec<(String, String)> {
    let mut files: Vec<_> = fs::read_dir(root)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .map(|e| {
            (
                e.file_name().to_string_lossy().into_owned(),
                fs::read_to_string(e.path()).unwrap(),
            )
        })
        .collect();
    files.sort();
    files
}

#[test]
fn preview_on_one_copy_matches_apply_on_a_fresh_copy() {
    let preview_copy = messy_project();
    let apply_copy = messy_project();
    let issues = validator(preview_copy.path()).validate().unwrap().issues().to_vec();

    let untouched = snapshot(preview_copy.path());
    let preview = FixEngine::new(preview_copy.path()).preview_issues(&issues);
    assert_eq!(snapshot(preview_copy.path()), untouched);
    assert!(preview.failed.is_empty(), "{:?}", preview.failed);

    let result = FixEngine::new(apply_copy.path()).fix_issues(&issues);
    assert!(result.is_success(), "{:?}", result.failed);
    assert_eq!(preview.summary(), result.summary());
    assert_eq!(preview.changes.len(), result.applied.len());

    for (previewed, applied) in preview.changes.iter().zip(&result.applied) {
        assert_eq!(previewed.fix, applied.fix);
        assert_eq!(previewed.change.lines_before, applied.change.lines_before, "{}", applied.fix.id);
        assert_eq!(previewed.change.lines_after, applied.change.lines_after, "{}", applied.fix.id);
        assert_eq!(previewed.change, applied.change);
    }

    let makefile_fixes = result
        .applied
        .iter()
        .filter(|o| o.fix.file == Path::new("Makefile"))
        .count();
    assert_eq!(makefile_fixes, 3);

    // The last previewed change to a file holds the text apply leaves behind.
    let mut final_text: BTreeMap<&Path, &str> = BTreeMap::new();
    for outcome in &preview.changes {
        if let Some(text) = outcome.change.contents.as_deref() {
            final_text.insert(outcome.fix.file.as_path(), text);
        }
    }
    assert!(final_text.contains_key(Path::new("Makefile")));
    assert!(final_text.contains_key(Path::new(".env")));
    for (file, text) in final_text {
        assert_eq!(
            fs::read(apply_copy.path().join(file)).unwrap(),
            text.as_bytes(),
            "{}",
            file.display()
        );
    }
}

#[test]
fn env_quoting_keeps_inline_comments_out_of_values() {
    let temp = messy_project();
    let root = temp.path();
    let issues = validator(root).validate().unwrap().issues().to_vec();

    let env_issues: Vec<_> = issues
        .iter()
        .filter(|i| i.rule == rules::ENV_VALUE_UNQUOTED)
        .collect();
    assert_eq!(env_issues.len(), 2);
    assert!(env_issues.iter().all(|i| i.line != Some(2)));

    let result = FixEngine::new(root).fix_issues(&issues);
    assert!(result
        .applied
        .iter()
        .filter(|o| o.fix.file == Path::new(".env"))
        .all(|o| o.fix.automatic));

    assert_eq!(
        fs::read_to_string(root.join(".env")).unwrap(),
        "API_TOKEN=\"abcdefghijklmnopqrstuvwxyz0123\"\n\
         PORT=3000   # port the server listens on\n\
         SESSION_SECRET=\"abcdefghijklmnopqrstuvwx\" # rotated monthly\n"
    );
}

#[test]
fn applying_fixes_clears_fixable_format_issues() {
    let temp = messy_project();
    let root = temp.path();
    let before = validator(root).validate().unwrap();

    for rule in [
        rules::GITIGNORE_PATTERN_MISSING,
        rules::DOCKER_WORKDIR_MISSING,
        rules::MAKEFILE_RECIPE_INDENT,
        rules::MAKEFILE_PHONY_MISSING,
        rules::ENV_VALUE_UNQUOTED,
        rules::DOCKER_DOCKERIGNORE,
    ] {
        assert!(before.has_rule(rule), "expected {} before fixing", rule);
    }

    let result = FixEngine::new(root).fix_issues(before.issues());
    assert!(result.is_success(), "{:?}", result.failed);

    let after = validator(root).validate().unwrap();
    assert!(after.is_valid(), "{:?}", after.issues());
    assert_eq!(after.fixable().count(), 0, "{:?}", after.issues());

    let dockerfile = fs::read_to_string(root.join("Dockerfile")).unwrap();
    assert_eq!(dockerfile, "FROM node:18\nWORKDIR /app\nCOPY . .\n");

    let makefile = fs::read_to_string(root.join("Makefile")).unwrap();
    assert_eq!(makefile, ".PHONY: build test\nbuild:\n\techo hi\ntest:\n\techo ok\n");

    let gitignore = fs::read_to_string(root.join(".gitignore")).unwrap();
    assert_eq!(gitignore, "node_modules/\n*.log\n.env\ndist/\nbuild/\n");

    assert!(root.join(".dockerignore").is_file());
}

#[test]
fn second_run_has_nothing_to_do() {
    let temp = messy_project();
    let root = temp.path();

    let first = validator(root).validate().unwrap();
    FixEngine::new(root).fix_issues(first.issues());

    let second = validator(root).validate().unwrap();
    let result = FixEngine::new(root).fix_issues(second.issues());
    assert!(result.applied.is_empty());
    assert!(result.failed.is_empty());
}

#[test]
fn create_never_overwrites() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("README.md"), "mine\n").unwrap();

    let issue = ValidationIssue::error(rules::README_REQUIRED, "README.md is missing")
        .in_file("README.md")
        .fixable();
    let fix = derive_fix(&issue).unwrap();

    let err = FixEngine::new(temp.path()).apply_fix(&fix).unwrap_err();
    assert!(matches!(err, TrellisError::FileExists { .. }));
    assert_eq!(fs::read_to_string(temp.path().join("README.md")).unwrap(), "mine\n");
}

#[test]
fn declined_fixes_are_skipped() {
    let temp = messy_project();
    let root = temp.path();
    let issues = validator(root).validate().unwrap().issues().to_vec();

    let result = FixEngine::new(root).fix_issues_with(&issues, |fix| {
        !matches!(fix.action, FixAction::Replace { .. })
    });

    assert!(result
        .skipped
        .iter()
        .any(|s| s.reason == SkipReason::Declined && s.issue.rule == rules::ENV_VALUE_UNQUOTED));
    assert_eq!(fs::read_to_string(root.join(".env")).unwrap(), MESSY_ENV);
}

#[test]
fn unknown_action_string_is_rejected() {
    let err = Fix::from_parts("x", "chmod", "run.sh", None, "").unwrap_err();
    assert!(matches!(err, TrellisError::UnsupportedFixAction { .. }));
}

#[test]
fn fix_serializes_with_action_tag() {
    let fix = Fix::from_parts(rules::ENV_VALUE_UNQUOTED, "replace", ".env", Some(3), "A=\"b\"").unwrap();
    let value = serde_json::to_value(&fix).unwrap();
    assert_eq!(value["action"], "replace");
    assert_eq!(value["line"], 3);
    assert_eq!(value["id"], "env.value.unquoted:.env:3");
    assert_eq!(value["automatic"], true);
}

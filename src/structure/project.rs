//! Project type detection and layout recommendations.

use std::fmt;
use std::path::Path;

use crate::issue::{rules, ValidationIssue};

/// Detected project type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectType {
    Go,
    Node,
    Python,
    Docker,
    Unknown,
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProjectType::Go => "go",
            ProjectType::Node => "node",
            ProjectType::Python => "python",
            ProjectType::Docker => "docker",
            ProjectType::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

const PYTHON_MARKERS: &[&str] = &["setup.py", "pyproject.toml", "requirements.txt"];

fn exists(root: &Path, name: &str) -> bool {
    root.join(name).exists()
}

fn is_dir(root: &Path, name: &str) -> bool {
    root.join(name).is_dir()
}

/// Detect the project type. The first match wins, in priority order
/// Go, Node, Python, Docker.
pub fn detect(root: &Path) -> ProjectType {
    if exists(root, "go.mod") {
        ProjectType::Go
    } else if exists(root, "package.json") {
        ProjectType::Node
    } else if PYTHON_MARKERS.iter().any(|m| exists(root, m)) {
        ProjectType::Python
    } else if exists(root, "Dockerfile") {
        ProjectType::Docker
    } else {
        ProjectType::Unknown
    }
}

/// Layout recommendations for a project of type `project_type`.
pub fn recommendations(root: &Path, project_type: ProjectType) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    match project_type {
        ProjectType::Go => {
            if !exists(root, "main.go") && !is_dir(root, "cmd") {
                issues.push(
                    ValidationIssue::warning(
                        rules::GO_ENTRYPOINT,
                        "Go project has neither main.go nor a cmd/ directory",
                    )
                    .in_file("cmd")
                    .with_suggestion("Add main.go or cmd/<app>/main.go"),
                );
            }
            if !is_dir(root, "pkg") {
                issues.push(
                    ValidationIssue::info(rules::GO_PKG, "Consider a pkg/ directory for public packages")
                        .in_file("pkg"),
                );
            }
            if !is_dir(root, "internal") {
                issues.push(
                    ValidationIssue::info(
                        rules::GO_INTERNAL,
                        "Consider an internal/ directory for private packages",
                    )
                    .in_file("internal"),
                );
            }
        }
        ProjectType::Node => {
            if !is_dir(root, "src") && !exists(root, "index.js") {
                issues.push(
                    ValidationIssue::info(
                        rules::NODE_ENTRYPOINT,
                        "Node project has neither a src/ directory nor index.js",
                    )
                    .in_file("src"),
                );
            }
        }
        ProjectType::Python => {
            if !is_dir(root, "src") {
                issues.push(
                    ValidationIssue::info(rules::PYTHON_SRC, "Consider the src/ layout for Python packages")
                        .in_file("src"),
                );
            }
        }
        ProjectType::Docker => {
            if !exists(root, ".dockerignore") {
                issues.push(
                    ValidationIssue::info(
                        rules::DOCKER_DOCKERIGNORE,
                        "Add a .dockerignore to keep the build context small",
                    )
                    .in_file(".dockerignore")
                    .fixable(),
                );
            }
        }
        ProjectType::Unknown => {}
    }

    issues
}

//! Project tree walk.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Result, TrellisError};

/// One visited filesystem entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Path relative to the project root.
    pub path: PathBuf,
    /// Whether the entry (after following symlinks) is a directory.
    pub is_dir: bool,
    /// Unix permission bits, when the platform has them.
    pub mode: Option<u32>,
}

impl Entry {
    /// The final path component.
    pub fn name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }

    /// Whether this entry lives under the project-relative directory `dir`.
    pub fn is_under(&self, dir: &Path) -> bool {
        self.path.starts_with(dir) && self.path != dir
    }
}

/// Walk `root` depth-first, visiting entries in sorted order.
///
/// Directories whose name is in `ignore` are skipped along with their
/// contents. Symlinks are followed for metadata but never descended, so a
/// broken link fails the walk instead of being dropped.
pub fn walk(root: &Path, ignore: &[String]) -> Result<Vec<Entry>> {
    debug!("Walking {}", root.display());
    let mut entries = Vec::new();
    visit(root, Path::new(""), ignore, &mut entries)?;
    debug!("Visited {} entries under {}", entries.len(), root.display());
    Ok(entries)
}

fn visit(root: &Path, rel: &Path, ignore: &[String], out: &mut Vec<Entry>) -> Result<()> {
    let dir = root.join(rel);
    let walk_err = |path: PathBuf| move |source| TrellisError::Walk { path, source };

    let mut children = fs::read_dir(&dir)
        .map_err(walk_err(dir.clone()))?
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(walk_err(dir.clone()))?;
    children.sort_by_key(|c| c.file_name());

    for child in children {
        let name = child.file_name();
        if ignore.iter().any(|i| name == i.as_str()) {
            continue;
        }

        let abs = child.path();
        let link_meta = fs::symlink_metadata(&abs).map_err(walk_err(abs.clone()))?;
        let meta = fs::metadata(&abs).map_err(walk_err(abs.clone()))?;
        let rel_path = rel.join(&name);

        out.push(Entry {
            path: rel_path.clone(),
            is_dir: meta.is_dir(),
            mode: mode(&meta),
        });

        if link_meta.is_dir() {
            visit(root, &rel_path, ignore, out)?;
        }
    }

    Ok(())
}

#[cfg(unix)]
fn mode(meta: &fs::Metadata) -> Option<u32> {
    use std::os::unix::fs::PermissionsExt;
    Some(meta.permissions().mode() & 0o7777)
}

#[cfg(not(unix))]
fn mode(_meta: &fs::Metadata) -> Option<u32> {
    None
}

//! Canned file content for `create` fixes, embedded at compile time.

use include_dir::{include_dir, Dir};

static FIX_ASSETS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/assets/fixes");

/// Asset names, keyed by the file a create fix writes.
const ASSETS: &[(&str, &str)] = &[
    ("README.md", "README.md"),
    ("LICENSE", "LICENSE"),
    (".gitignore", "gitignore"),
    (".dockerignore", "dockerignore"),
];

/// Canned content for the project file `file_name`, if there is one.
pub fn canned(file_name: &str) -> Option<&'static str> {
    let (_, asset) = ASSETS.iter().find(|(name, _)| *name == file_name)?;
    FIX_ASSETS.get_file(asset)?.contents_utf8()
}

use std::path::{Component, Path, PathBuf};

/// Key under which two spellings of the same file compare equal.
///
/// Existing files are canonicalized; paths that no longer exist fall back to a
/// lexical form with `.` components removed.
///
/// # Examples
///
/// - `"./src/lib.rs"` and `"src/lib.rs"` give the same key
/// - an absolute path and a cwd-relative path to the same file give the same key
#[must_use]
pub fn path_key(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap_or_else(|_| lexical(path))
}

fn lexical(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

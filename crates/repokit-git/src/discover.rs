//! Repository root discovery.
//!
//! Purely filesystem based: nothing here shells out to `git`.

use std::path::{Path, PathBuf};

use tracing::debug;

/// Walk up from `start` to the first directory containing a `.git` entry.
///
/// `.git` may be a directory (regular repository) or a file (worktree or
/// submodule checkout). Returns `None` if `start` does not exist or the
/// filesystem root is reached first.
///
/// # Examples
///
/// ```no_run
/// use repokit_git::discover::discover_repo_root;
/// use std::path::Path;
///
/// if let Some(root) = discover_repo_root(Path::new(".")) {
///     println!("repository root: {}", root.display());
/// }
/// ```
pub fn discover_repo_root(start: &Path) -> Option<PathBuf> {
    debug!(start = %start.display(), "searching for repository root");
    let start = start.canonicalize().ok()?;

    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

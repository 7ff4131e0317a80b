//! Repository root discovery.

use std::path::{Path, PathBuf};

/// Directory whose presence marks a repository root.
const ROOT_MARKER: &str = "data";

/// First ancestor of `start` (inclusive) containing the marker directory.
fn find_marked_ancestor(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(ROOT_MARKER).is_dir())
        .map(Path::to_path_buf)
}

/// Resolve the repository root.
///
/// An explicit `--root` wins. Otherwise search upward from the executable's
/// directory, then from `cwd`, for a directory containing `data/`; fall back
/// to `cwd` itself.
pub fn resolve_root(explicit: Option<PathBuf>, exe: Option<&Path>, cwd: &Path) -> PathBuf {
    if let Some(root) = explicit {
        return root;
    }

    if let Some(found) = exe.and_then(Path::parent).and_then(find_marked_ancestor) {
        tracing::debug!(root = %found.display(), "repository root found from executable location");
        return found;
    }

    if let Some(found) = find_marked_ancestor(cwd) {
        tracing::debug!(root = %found.display(), "repository root found from working directory");
        return found;
    }

    tracing::debug!(root = %cwd.display(), "no data/ directory found; using working directory");
    cwd.to_path_buf()
}

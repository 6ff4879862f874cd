//! Upward search for named directories.

use std::path::{Path, PathBuf};

use super::errors::ResolveError;

/// Find the directory `name` in `start_dir` or the nearest ancestor that has
/// it as a child.
///
/// `start_dir` is canonicalized first, so `..` components and symlinks never
/// lead the walk below the real start. The walk is strictly upward and stops
/// at the first match, so the candidate closest to `start_dir` wins. Only
/// directories match; a file with the same name is skipped.
pub fn resolve_named_directory(start_dir: &Path, name: &str) -> Result<PathBuf, ResolveError> {
    let not_found = |start: PathBuf| ResolveError::DirectoryNotFound {
        name: name.to_string(),
        start,
    };
    let start = start_dir
        .canonicalize()
        .map_err(|_| not_found(start_dir.to_path_buf()))?;

    for dir in start.ancestors() {
        let candidate = dir.join(name);
        if candidate.is_dir() {
            tracing::debug!("found {}: {}", name, candidate.display());
            return Ok(candidate);
        }
    }

    Err(not_found(start))
}

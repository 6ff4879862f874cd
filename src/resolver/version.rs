//! Latest-version selection for versioned SDK roots.
//!
//! Version directories are compared as plain strings (ordinal, byte-wise),
//! not as semantic versions: `"9"` sorts above `"10"`. Windows SDK version
//! directories are fixed-width per component in practice, which keeps lexical
//! order in line with release order for the SDKs this targets.

use std::fs;
use std::path::Path;

use super::errors::ResolveError;

/// Name of the greatest version directory directly under `sdk_root`.
pub fn resolve_latest_version(sdk_root: &Path) -> Result<String, ResolveError> {
    let unreadable = |source: std::io::Error| ResolveError::SdkRootUnreadable {
        root: sdk_root.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(sdk_root).map_err(unreadable)? {
        let entry = entry.map_err(unreadable)?;
        // Follows symlinks, so a linked version directory counts
        if entry.path().is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    let latest = latest_version_name(names.iter().map(String::as_str))
        .map(str::to_string)
        .ok_or_else(|| ResolveError::NoVersionDirectories {
            root: sdk_root.to_path_buf(),
        })?;

    tracing::debug!(
        "latest of {} version directories in {}: {}",
        names.len(),
        sdk_root.display(),
        latest
    );
    Ok(latest)
}

/// The greatest name under ordinal string ordering.
pub fn latest_version_name<'a>(names: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let mut names: Vec<&str> = names.into_iter().collect();
    names.sort_unstable_by(|a, b| b.cmp(a));
    names.first().copied()
}

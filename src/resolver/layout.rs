//! The set of directories a run works with.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::util::config::PathsConfig;

use super::directory::resolve_named_directory;
use super::errors::ResolveError;
use super::version::resolve_latest_version;

/// Directories resolved once at startup and passed to every later stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPaths {
    /// Native Spout source tree
    pub source_tree: PathBuf,

    /// Interop module tree; generated files go here by default
    pub interop_tree: PathBuf,

    /// Native build output tree
    pub build_tree: PathBuf,

    /// SDK installation root
    pub sdk_root: PathBuf,

    /// Selected SDK version directory name
    pub sdk_version: String,

    sdk_include_dir: String,
    sdk_lib_dir: String,
}

impl ResolvedPaths {
    /// Resolve every directory, walking up from `start_dir` for the named
    /// trees and picking the latest SDK version under the include root.
    pub fn resolve(start_dir: &Path, config: &PathsConfig) -> Result<Self, ResolveError> {
        let source_tree = resolve_named_directory(start_dir, &config.source_tree)?;
        let interop_tree = resolve_named_directory(start_dir, &config.interop_tree)?;
        let build_tree = resolve_named_directory(start_dir, &config.build_tree)?;
        let sdk_version =
            resolve_latest_version(&config.sdk_root.join(&config.sdk_include_dir))?;

        tracing::info!(
            "using Windows SDK {} in {}",
            sdk_version,
            config.sdk_root.display()
        );

        Ok(ResolvedPaths {
            source_tree,
            interop_tree,
            build_tree,
            sdk_root: config.sdk_root.clone(),
            sdk_version,
            sdk_include_dir: config.sdk_include_dir.clone(),
            sdk_lib_dir: config.sdk_lib_dir.clone(),
        })
    }

    /// `<sdk>/<include>/<version>`
    pub fn sdk_include_root(&self) -> PathBuf {
        self.sdk_root
            .join(&self.sdk_include_dir)
            .join(&self.sdk_version)
    }

    /// `<sdk>/<lib>/<version>`
    pub fn sdk_lib_root(&self) -> PathBuf {
        self.sdk_root.join(&self.sdk_lib_dir).join(&self.sdk_version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::WorkspaceFixture;

    #[test]
    fn test_resolve_fixture_layout() {
        let fixture = WorkspaceFixture::spout().create();
        let paths = ResolvedPaths::resolve(&fixture.start_dir(), &fixture.paths_config()).unwrap();

        assert_eq!(paths.source_tree, fixture.root().join("Spout2"));
        assert_eq!(paths.interop_tree, fixture.root().join("SpoutDX"));
        assert_eq!(paths.build_tree, fixture.root().join("BUILD"));
        assert_eq!(paths.sdk_version, "10.0.22000.0");
        assert_eq!(
            paths.sdk_include_root(),
            fixture.sdk_root().join("Include").join("10.0.22000.0")
        );
        assert_eq!(
            paths.sdk_lib_root(),
            fixture.sdk_root().join("Lib").join("10.0.22000.0")
        );
    }

    #[test]
    fn test_missing_build_tree_fails() {
        let fixture = WorkspaceFixture::spout().create();
        let mut config = fixture.paths_config();
        config.build_tree = "BUILD-spoutgen-missing-7f3a".to_string();

        let err = ResolvedPaths::resolve(&fixture.start_dir(), &config).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::DirectoryNotFound { ref name, .. }
                if name == "BUILD-spoutgen-missing-7f3a"
        ));
    }
}

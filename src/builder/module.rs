//! Module configuration.
//!
//! Header and source selection is a directory scan plus an extension filter,
//! not a manifest: every file directly inside a configured directory with a
//! matching extension is picked up, so the exposed surface follows the native
//! tree's contents at run time. Subdirectories are not scanned.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::module::{ModuleDescriptor, ModuleDescriptorBuilder};
use crate::resolver::ResolvedPaths;
use crate::util::config::ModuleConfig;

use super::errors::ConfigureError;

/// Assembles the [`ModuleDescriptor`] for a run.
pub struct ModuleConfigurator<'a> {
    config: &'a ModuleConfig,
}

impl<'a> ModuleConfigurator<'a> {
    pub fn new(config: &'a ModuleConfig) -> Self {
        ModuleConfigurator { config }
    }

    /// Build the descriptor from resolved paths.
    ///
    /// Fails if any header directory, source directory or SDK header is
    /// missing; library directories are only warned about, since they matter
    /// to the linker rather than to extraction.
    pub fn build(&self, paths: &ResolvedPaths) -> Result<ModuleDescriptor, ConfigureError> {
        let config = self.config;
        let mut module = ModuleDescriptorBuilder::new(&config.name);

        let sdk_headers = paths.sdk_include_root().join(&config.sdk_header_subdir);
        require_dir("SDK header", &sdk_headers)?;
        module.include_dir(&sdk_headers);

        let header_dirs: Vec<PathBuf> = config
            .header_dirs
            .iter()
            .map(|dir| paths.source_tree.join(dir))
            .collect();
        for dir in &header_dirs {
            require_dir("header", dir)?;
            module.include_dir(dir);
        }

        for dir in &header_dirs {
            for header in scan_dir(dir, &config.header_extensions)? {
                module.header(header);
            }
        }

        for name in &config.sdk_headers {
            let header = sdk_headers.join(name);
            if !header.is_file() {
                return Err(ConfigureError::MissingFile { path: header });
            }
            module.header(header);
        }

        for dir in &config.source_dirs {
            let dir = paths.source_tree.join(dir);
            require_dir("source", &dir)?;
            for source in scan_dir(&dir, &config.source_extensions)? {
                module.source(source);
            }
        }

        let library_dirs = std::iter::once(paths.sdk_lib_root().join(&config.sdk_library_subdir))
            .chain(config.build_library_dirs.iter().map(|d| paths.build_tree.join(d)));
        for dir in library_dirs {
            if !dir.is_dir() {
                tracing::warn!("library directory does not exist: {}", dir.display());
            }
            module.library_dir(dir);
        }

        for lib in &config.libraries {
            module.library(lib);
        }

        let module = module.build();
        tracing::info!(
            "module `{}`: {} headers, {} sources",
            module.name(),
            module.header_count(),
            module.source_count()
        );
        Ok(module)
    }
}

fn require_dir(kind: &'static str, path: &Path) -> Result<(), ConfigureError> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(ConfigureError::MissingDirectory {
            kind,
            path: path.to_path_buf(),
        })
    }
}

/// Files directly inside `dir` whose extension is one of `extensions`,
/// sorted by path.
pub fn scan_dir(dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>, ConfigureError> {
    let entries = fs::read_dir(dir).map_err(|source| ConfigureError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ConfigureError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.iter().any(|e| e == ext));
        if matches {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

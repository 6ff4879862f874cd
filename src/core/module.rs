//! Module descriptor: the complete input handed to an extractor.

use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use serde::Serialize;

/// Everything the extraction engine needs for one binding unit.
///
/// A descriptor is assembled once by the
/// [`ModuleConfigurator`](crate::builder::ModuleConfigurator) and is read-only
/// afterwards; every collection keeps insertion order and drops duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleDescriptor {
    name: String,
    include_dirs: IndexSet<PathBuf>,
    headers: IndexSet<PathBuf>,
    sources: IndexSet<PathBuf>,
    library_dirs: IndexSet<PathBuf>,
    libraries: IndexSet<String>,
}

impl ModuleDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn include_dirs(&self) -> impl Iterator<Item = &Path> {
        self.include_dirs.iter().map(PathBuf::as_path)
    }

    pub fn headers(&self) -> impl Iterator<Item = &Path> {
        self.headers.iter().map(PathBuf::as_path)
    }

    pub fn sources(&self) -> impl Iterator<Item = &Path> {
        self.sources.iter().map(PathBuf::as_path)
    }

    pub fn library_dirs(&self) -> impl Iterator<Item = &Path> {
        self.library_dirs.iter().map(PathBuf::as_path)
    }

    pub fn libraries(&self) -> impl Iterator<Item = &str> {
        self.libraries.iter().map(String::as_str)
    }

    pub fn header_count(&self) -> usize {
        self.headers.len()
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }
}

/// Incremental builder for a [`ModuleDescriptor`].
#[derive(Debug, Clone, Default)]
pub struct ModuleDescriptorBuilder {
    name: String,
    include_dirs: IndexSet<PathBuf>,
    headers: IndexSet<PathBuf>,
    sources: IndexSet<PathBuf>,
    library_dirs: IndexSet<PathBuf>,
    libraries: IndexSet<String>,
}

impl ModuleDescriptorBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        ModuleDescriptorBuilder {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn include_dir(&mut self, dir: impl Into<PathBuf>) -> &mut Self {
        self.include_dirs.insert(dir.into());
        self
    }

    pub fn header(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.headers.insert(path.into());
        self
    }

    pub fn source(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.sources.insert(path.into());
        self
    }

    pub fn library_dir(&mut self, dir: impl Into<PathBuf>) -> &mut Self {
        self.library_dirs.insert(dir.into());
        self
    }

    pub fn library(&mut self, name: impl Into<String>) -> &mut Self {
        self.libraries.insert(name.into());
        self
    }

    pub fn build(self) -> ModuleDescriptor {
        ModuleDescriptor {
            name: self.name,
            include_dirs: self.include_dirs,
            headers: self.headers,
            sources: self.sources,
            library_dirs: self.library_dirs,
            libraries: self.libraries,
        }
    }
}

//! Module configuration errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::util::diagnostic::Diagnostic;

/// A configured input does not exist on disk.
#[derive(Debug, Error)]
pub enum ConfigureError {
    #[error("{kind} directory does not exist: {}", path.display())]
    MissingDirectory { kind: &'static str, path: PathBuf },

    #[error("SDK header does not exist: {}", path.display())]
    MissingFile { path: PathBuf },

    #[error("failed to read directory: {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ConfigureError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ConfigureError::MissingDirectory { kind, path } => {
                Diagnostic::error(format!("{} directory does not exist", kind))
                    .with_location(path)
                    .with_context("an empty file set would produce an empty or partial binding")
                    .with_suggestion(
                        "Check `module.header_dirs` and `module.source_dirs` in spoutgen.toml",
                    )
            }
            ConfigureError::MissingFile { path } => Diagnostic::error("SDK header does not exist")
                .with_location(path)
                .with_suggestion("Check `module.sdk_headers` or install the matching Windows SDK"),
            ConfigureError::Io { path, source } => {
                Diagnostic::error("failed to read directory")
                    .with_location(path)
                    .with_context(source.to_string())
            }
        }
    }
}

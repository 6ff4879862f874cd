//! Directory resolution errors and diagnostics.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::util::diagnostic::Diagnostic;

/// Error while locating a required directory.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("directory `{name}` was not found in {} or any parent directory", start.display())]
    DirectoryNotFound { name: String, start: PathBuf },

    #[error("SDK root {} has no version directories", root.display())]
    NoVersionDirectories { root: PathBuf },

    #[error("failed to read SDK root {}", root.display())]
    SdkRootUnreadable {
        root: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ResolveError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ResolveError::DirectoryNotFound { name, start } => {
                Diagnostic::error(format!("directory `{}` was not found", name))
                    .with_context(format!(
                        "searched {} and every parent directory",
                        start.display()
                    ))
                    .with_suggestion(format!(
                        "Run from inside a checkout that has a sibling `{}` directory",
                        name
                    ))
                    .with_suggestion("Pass `--start-dir` to search from another directory")
            }

            ResolveError::NoVersionDirectories { root } => {
                Diagnostic::error("no SDK version directories found")
                    .with_location(root)
                    .with_suggestion(
                        "Install the Windows SDK or set `paths.sdk_root` in spoutgen.toml",
                    )
            }

            ResolveError::SdkRootUnreadable { root, source } => {
                Diagnostic::error("SDK root could not be read")
                    .with_location(root)
                    .with_context(source.to_string())
                    .with_suggestion("Set `paths.sdk_root` in spoutgen.toml to an installed SDK")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_not_found_diagnostic() {
        let err = ResolveError::DirectoryNotFound {
            name: "Spout2".to_string(),
            start: PathBuf::from("/work/app"),
        };

        let output = err.to_diagnostic().format(false);
        assert!(output.contains("error: directory `Spout2` was not found"));
        assert!(output.contains("/work/app"));
        assert!(output.contains("help: consider:"));
    }
}

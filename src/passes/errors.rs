//! Generation errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::util::diagnostic::Diagnostic;

/// A construct that cannot be processed safely. Always fatal for the run.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("ambiguous overload `{name}({signature})`")]
    AmbiguousOverload { name: String, signature: String },

    #[error("pass `{pass}` failed: {message}")]
    Pass { pass: String, message: String },

    #[error("failed to extract declarations from {}", path.display())]
    Extraction {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}", path.display())]
    Emit {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize declarations")]
    Serialize(#[from] serde_json::Error),
}

impl GenerationError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            GenerationError::AmbiguousOverload { name, signature } => {
                Diagnostic::error(format!("ambiguous overload `{}`", name))
                    .with_context(format!("two declarations share the signature ({})", signature))
                    .with_suggestion(format!(
                        "Add a deny rule for the class declaring `{}` in spoutgen.toml",
                        name
                    ))
            }
            GenerationError::Pass { pass, message } => {
                Diagnostic::error(format!("pass `{}` failed", pass)).with_context(message.clone())
            }
            GenerationError::Extraction { path, source } => {
                Diagnostic::error("failed to extract declarations")
                    .with_location(path)
                    .with_context(source.to_string())
            }
            GenerationError::Emit { path, source } => Diagnostic::error("failed to write output")
                .with_location(path)
                .with_context(source.to_string()),
            GenerationError::Serialize(err) => {
                Diagnostic::error("failed to serialize declarations").with_context(err.to_string())
            }
        }
    }
}

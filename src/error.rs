//! Crate-level error type.
//!
//! Each stage has its own error enum; [`Error`] unifies them for callers
//! that drive a whole run and attaches miette codes for reporting.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::builder::ConfigureError;
use crate::passes::GenerationError;
use crate::resolver::ResolveError;
use crate::util::diagnostic::Diagnostic;

/// Any failure that aborts a generation run.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(
        code(spoutgen::resolve),
        help("Run from inside the checkout or set [paths] in spoutgen.toml")
    )]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    #[diagnostic(
        code(spoutgen::configure),
        help("Check the [module] section of spoutgen.toml")
    )]
    Configure(#[from] ConfigureError),

    #[error(transparent)]
    #[diagnostic(code(spoutgen::generate))]
    Generation(#[from] GenerationError),
}

impl Error {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Error::Resolve(err) => err.to_diagnostic(),
            Error::Configure(err) => err.to_diagnostic(),
            Error::Generation(err) => err.to_diagnostic(),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

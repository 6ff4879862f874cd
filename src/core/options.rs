//! Generation options forwarded to the extractor and emitter.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// How generated output is split into files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputMode {
    /// One file for the whole module
    #[default]
    FilePerModule,
    /// One file per translation unit
    FilePerUnit,
}

/// Target-language and output options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorOptions {
    /// Where generated files are written
    pub output_dir: PathBuf,

    /// Compile the generated code after emitting it
    pub compile_code: bool,

    pub output_mode: OutputMode,

    /// Generate finalizers for wrapped native resources
    pub generate_finalizers: bool,

    /// Emit debug symbols and debug output
    pub debug: bool,
}

impl GeneratorOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        GeneratorOptions {
            output_dir: output_dir.into(),
            compile_code: false,
            output_mode: OutputMode::FilePerModule,
            generate_finalizers: true,
            debug: true,
        }
    }
}

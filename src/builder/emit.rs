//! Writing the processed declaration graph.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::decl::{DeclarationGraph, TranslationUnit};
use crate::core::module::ModuleDescriptor;
use crate::core::options::{GeneratorOptions, OutputMode};
use crate::passes::GenerationError;

/// Turns a processed graph into output files.
pub trait Emitter {
    /// Files [`Emitter::emit`] would write for `graph`.
    fn plan(
        &self,
        module: &ModuleDescriptor,
        graph: &DeclarationGraph,
        options: &GeneratorOptions,
    ) -> Vec<PathBuf>;

    /// Write output for `graph`, returning the files written.
    fn emit(
        &self,
        module: &ModuleDescriptor,
        graph: &DeclarationGraph,
        options: &GeneratorOptions,
    ) -> Result<Vec<PathBuf>, GenerationError>;
}

/// Serialized form of one output file.
#[derive(Debug, Serialize)]
struct OutputFile<'a> {
    module: &'a str,
    libraries: Vec<&'a str>,
    /// Options the binding code generator applies to this output
    codegen: Codegen,
    units: &'a [TranslationUnit],
}

#[derive(Debug, Serialize)]
struct Codegen {
    generate_finalizers: bool,
    debug: bool,
}

/// Emits the retained declarations as pretty-printed JSON.
///
/// With [`OutputMode::FilePerModule`] everything lands in `<module>.json`;
/// with [`OutputMode::FilePerUnit`] each translation unit gets
/// `<header stem>.json`. Ignored declarations are never written.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEmitter;

impl JsonEmitter {
    pub fn new() -> Self {
        JsonEmitter
    }

    fn write(
        &self,
        path: &Path,
        module: &ModuleDescriptor,
        options: &GeneratorOptions,
        units: &[TranslationUnit],
    ) -> Result<(), GenerationError> {
        let output = OutputFile {
            module: module.name(),
            libraries: module.libraries().collect(),
            codegen: Codegen {
                generate_finalizers: options.generate_finalizers,
                debug: options.debug,
            },
            units,
        };
        let json = serde_json::to_string_pretty(&output)?;

        std::fs::write(path, json).map_err(|source| GenerationError::Emit {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("wrote {}", path.display());
        Ok(())
    }
}

fn module_output(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.json", name))
}

/// One output per unit. The first unit with a given stem owns the file.
fn unit_outputs<'g>(
    dir: &Path,
    graph: &'g DeclarationGraph,
) -> Vec<(PathBuf, &'g TranslationUnit)> {
    let mut seen = HashSet::new();
    let mut outputs = Vec::new();
    for unit in &graph.units {
        let path = dir.join(format!("{}.json", unit.file_stem()));
        if seen.insert(path.clone()) {
            outputs.push((path, unit));
        } else {
            tracing::warn!(
                "skipping {}: {} is already written by another unit",
                unit.path.display(),
                path.display()
            );
        }
    }
    outputs
}

impl Emitter for JsonEmitter {
    fn plan(
        &self,
        module: &ModuleDescriptor,
        graph: &DeclarationGraph,
        options: &GeneratorOptions,
    ) -> Vec<PathBuf> {
        match options.output_mode {
            OutputMode::FilePerModule => vec![module_output(&options.output_dir, module.name())],
            OutputMode::FilePerUnit => unit_outputs(&options.output_dir, graph)
                .into_iter()
                .map(|(path, _)| path)
                .collect(),
        }
    }

    fn emit(
        &self,
        module: &ModuleDescriptor,
        graph: &DeclarationGraph,
        options: &GeneratorOptions,
    ) -> Result<Vec<PathBuf>, GenerationError> {
        if options.compile_code {
            tracing::warn!("compile_code is set but JSON output has nothing to compile");
        }

        std::fs::create_dir_all(&options.output_dir).map_err(|source| GenerationError::Emit {
            path: options.output_dir.clone(),
            source,
        })?;

        let retained = graph.retained();
        let paths = self.plan(module, &retained, options);

        match options.output_mode {
            OutputMode::FilePerModule => {
                for path in &paths {
                    self.write(path, module, options, &retained.units)?;
                }
            }
            OutputMode::FilePerUnit => {
                for (path, unit) in unit_outputs(&options.output_dir, &retained) {
                    self.write(&path, module, options, std::slice::from_ref(unit))?;
                }
            }
        }

        Ok(paths)
    }
}

//! Implementation of `spoutgen generate`.
//!
//! A run resolves paths, configures the module, extracts declarations, runs
//! the pipeline and emits the result. Nothing is written until every stage
//! before emission has succeeded.

use std::path::{Path, PathBuf};

use crate::builder::{Emitter, Extractor, HeaderScanner, JsonEmitter, ModuleConfigurator};
use crate::core::module::ModuleDescriptor;
use crate::core::options::GeneratorOptions;
use crate::error::Result;
use crate::passes::{Pipeline, RunReport};
use crate::resolver::ResolvedPaths;
use crate::util::config::Config;

/// Options for the generate command.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Directory the upward searches start from
    pub start_dir: PathBuf,

    /// Overrides the configured output directory
    pub output_dir: Option<PathBuf>,

    /// Run every stage but do not write output
    pub dry_run: bool,
}

/// The inputs of a run, resolved before anything is extracted.
#[derive(Debug, Clone)]
pub struct Session {
    pub paths: ResolvedPaths,
    pub module: ModuleDescriptor,
    pub options: GeneratorOptions,
}

impl Session {
    /// Resolve paths and configure the module. Generated files default to
    /// the interop tree.
    pub fn prepare(config: &Config, start_dir: &Path, output_dir: Option<&Path>) -> Result<Self> {
        let paths = ResolvedPaths::resolve(start_dir, &config.paths)?;
        let module = ModuleConfigurator::new(&config.module).build(&paths)?;

        let mut options = config.generator.to_options(&paths.interop_tree);
        if let Some(dir) = output_dir {
            options.output_dir = dir.to_path_buf();
        }

        Ok(Session {
            paths,
            module,
            options,
        })
    }
}

/// What a run produced.
#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    pub module: String,
    pub report: RunReport,
    /// Written files, or the files that would be written on a dry run
    pub outputs: Vec<PathBuf>,
    pub dry_run: bool,
}

/// Run with the built-in extractor, passes and emitter.
pub fn generate(config: &Config, opts: &GenerateOptions) -> Result<GenerateOutcome> {
    generate_with(
        config,
        opts,
        &HeaderScanner::new(),
        &JsonEmitter::new(),
        Pipeline::from_config(config),
    )
}

/// Run with caller-supplied stages.
pub fn generate_with(
    config: &Config,
    opts: &GenerateOptions,
    extractor: &dyn Extractor,
    emitter: &dyn Emitter,
    mut pipeline: Pipeline,
) -> Result<GenerateOutcome> {
    let session = Session::prepare(config, &opts.start_dir, opts.output_dir.as_deref())?;
    tracing::info!(
        "module {}: {} headers, {} sources",
        session.module.name(),
        session.module.header_count(),
        session.module.source_count()
    );

    let mut graph = extractor.extract(&session.module, &session.options)?;
    let report = pipeline.run(&mut graph)?;

    let outputs = if opts.dry_run {
        emitter.plan(&session.module, &graph.retained(), &session.options)
    } else {
        emitter.emit(&session.module, &graph, &session.options)?
    };

    Ok(GenerateOutcome {
        module: session.module.name().to_string(),
        report,
        outputs,
        dry_run: opts.dry_run,
    })
}

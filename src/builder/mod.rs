//! Module configuration, extraction and emission.
//!
//! The configurator turns resolved paths into a [`ModuleDescriptor`]; an
//! [`Extractor`] reads its headers into a declaration graph; an [`Emitter`]
//! writes what survives the pipeline.
//!
//! [`ModuleDescriptor`]: crate::core::module::ModuleDescriptor

pub mod emit;
pub mod errors;
pub mod extract;
pub mod module;

pub use emit::{Emitter, JsonEmitter};
pub use errors::ConfigureError;
pub use extract::{Extractor, HeaderScanner};
pub use module::{scan_dir, ModuleConfigurator};

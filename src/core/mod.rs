//! Core data structures.
//!
//! - The declaration graph an extractor produces and the passes mutate
//! - The module descriptor handed to the extractor
//! - Generator options

pub mod decl;
pub mod module;
pub mod options;

pub use decl::{
    Class, ClassKind, DeclarationGraph, Function, Macro, Namespace, Param, TranslationUnit,
};
pub use module::{ModuleDescriptor, ModuleDescriptorBuilder};
pub use options::{GeneratorOptions, OutputMode};

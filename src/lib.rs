//! spoutgen - binding generation policy for the SpoutDX interop module
//!
//! This crate locates the native Spout sources and the Windows SDK,
//! describes the module to bind, and drives extracted declarations through
//! a filter, an ordered list of normalization passes and a namespace
//! renamer before emitting what survives.

pub mod builder;
pub mod core;
pub mod error;
pub mod filter;
pub mod ops;
pub mod passes;
pub mod rename;
pub mod resolver;
pub mod util;

/// Test fixtures for spoutgen unit tests.
///
/// Only compiled for tests. Provides synthetic declaration graphs and
/// on-disk workspace trees with a fake SDK.
#[cfg(test)]
pub mod test_support;

pub use crate::core::decl::DeclarationGraph;
pub use crate::core::module::ModuleDescriptor;
pub use crate::error::{Error, Result};
pub use crate::passes::{Pass, PassKind, PassList, Pipeline, RunReport};
pub use crate::resolver::ResolvedPaths;
pub use crate::util::config::Config;

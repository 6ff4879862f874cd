//! Test utilities for spoutgen unit tests.
//!
//! Provides a synthetic on-disk workspace that mirrors the layout the
//! generator expects (Spout source tree, interop tree, build tree and a
//! Windows SDK root), plus the small declaration graph used by the
//! end-to-end scenarios.
//!
//! # Example
//!
//! ```rust,ignore
//! use spoutgen::test_support::WorkspaceFixture;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = WorkspaceFixture::spout().create();
//!     let config = fixture.config();
//!     // Resolve paths from fixture.start_dir() ...
//! }
//! ```

pub mod fixtures;

pub use fixtures::*;

use crate::core::decl::{Class, DeclarationGraph, Namespace, TranslationUnit};

/// The two-header graph from the end-to-end scenario: `A.h` declares a
/// deny-listed `ID3D11Foo`, `B.h` declares `SpoutDX` and namespace `Std`.
pub fn scenario_graph() -> DeclarationGraph {
    DeclarationGraph::new()
        .with_unit(TranslationUnit::new("A.h").with_class(Class::new("ID3D11Foo")))
        .with_unit(
            TranslationUnit::new("B.h")
                .with_class(Class::new("SpoutDX"))
                .with_namespace(Namespace::new("Std")),
        )
}

/// A unit holding one class per name, in order.
pub fn unit_with_classes(path: &str, names: &[&str]) -> TranslationUnit {
    names
        .iter()
        .fold(TranslationUnit::new(path), |unit, name| unit.with_class(Class::new(*name)))
}

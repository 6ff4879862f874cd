//! Pass pipeline.
//!
//! Generic normalization passes run in a fixed order between the
//! declaration filter and the namespace renamer. See [`Pipeline`].

pub mod errors;
pub mod pass;
pub mod pipeline;
pub mod standard;

pub use errors::GenerationError;
pub use pass::{Pass, PassKind, PassList};
pub use pipeline::{Pipeline, RunReport, FILTER_STAGE, RENAME_STAGE};

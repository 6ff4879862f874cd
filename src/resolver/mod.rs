//! Directory resolution.
//!
//! Locates the SDK and the sibling source trees a run needs. Named trees are
//! found by walking upward from a start directory; the SDK version is the
//! lexically greatest version directory under the SDK include root.

pub mod directory;
pub mod errors;
pub mod layout;
pub mod version;

pub use directory::resolve_named_directory;
pub use errors::ResolveError;
pub use layout::ResolvedPaths;
pub use version::{latest_version_name, resolve_latest_version};

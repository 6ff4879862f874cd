//! Declaration filter.
//!
//! A two-list rule engine run on the raw declaration graph before any
//! normalization pass: deny rules (name prefixes) exclude whole families of
//! classes, exact-name allow overrides re-admit the few a binding needs.

pub mod apply;
pub mod rules;

pub use apply::{apply_filter, FilterSummary};
pub use rules::{Decision, FilterRule, FilterRules, RuleKind};

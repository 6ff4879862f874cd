//! Built-in implementations of the generic normalization passes.
//!
//! These are small reference versions used with the built-in header
//! scanner. An external engine can substitute its own through
//! [`PassList::with_provider`](super::PassList::with_provider).

mod ambiguous;
mod case;
mod covariance;
mod defaults;
mod ignored;
mod keywords;
mod macros;
mod names;
mod operators;
mod static_methods;

pub use ambiguous::CheckAmbiguousFunctions;
pub use case::RenameDeclsUpperCase;
pub use covariance::CheckVirtualOverrideReturnCovariance;
pub use defaults::HandleDefaultParamValues;
pub use ignored::CheckIgnoredDecls;
pub use keywords::CheckKeywordNames;
pub use macros::CheckMacros;
pub use names::CleanInvalidDeclNames;
pub use operators::CheckOperatorsOverloads;
pub use static_methods::FunctionToStaticMethod;

pub(crate) use defaults::is_literal;

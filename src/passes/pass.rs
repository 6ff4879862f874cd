//! The pass abstraction and the ordered pass list.

use std::fmt;

use crate::core::decl::DeclarationGraph;

use super::errors::GenerationError;
use super::standard;

/// A transformation over the declaration graph.
///
/// A pass may mark declarations ignored, rename them, or reject the run.
/// Passes must not look inside ignored subtrees.
pub trait Pass {
    fn name(&self) -> &str;

    fn run(&mut self, graph: &mut DeclarationGraph) -> Result<(), GenerationError>;
}

/// The generic normalization passes, in the order they must run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassKind {
    CheckKeywordNames,
    RenameDeclsUpperCase,
    FunctionToStaticMethod,
    HandleDefaultParamValues,
    CheckAmbiguousFunctions,
    CheckOperatorsOverloads,
    CheckIgnoredDecls,
    CheckMacros,
    CheckVirtualOverrideReturnCovariance,
    CleanInvalidDeclNames,
}

impl PassKind {
    /// Standard order.
    pub const ALL: [PassKind; 10] = [
        PassKind::CheckKeywordNames,
        PassKind::RenameDeclsUpperCase,
        PassKind::FunctionToStaticMethod,
        PassKind::HandleDefaultParamValues,
        PassKind::CheckAmbiguousFunctions,
        PassKind::CheckOperatorsOverloads,
        PassKind::CheckIgnoredDecls,
        PassKind::CheckMacros,
        PassKind::CheckVirtualOverrideReturnCovariance,
        PassKind::CleanInvalidDeclNames,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PassKind::CheckKeywordNames => "check-keyword-names",
            PassKind::RenameDeclsUpperCase => "rename-decls-upper-case",
            PassKind::FunctionToStaticMethod => "function-to-static-method",
            PassKind::HandleDefaultParamValues => "handle-default-param-values",
            PassKind::CheckAmbiguousFunctions => "check-ambiguous-functions",
            PassKind::CheckOperatorsOverloads => "check-operators-overloads",
            PassKind::CheckIgnoredDecls => "check-ignored-decls",
            PassKind::CheckMacros => "check-macros",
            PassKind::CheckVirtualOverrideReturnCovariance => {
                "check-virtual-override-return-covariance"
            }
            PassKind::CleanInvalidDeclNames => "clean-invalid-decl-names",
        }
    }

    /// The built-in implementation of this pass.
    pub fn create(self) -> Box<dyn Pass> {
        match self {
            PassKind::CheckKeywordNames => Box::new(standard::CheckKeywordNames),
            PassKind::RenameDeclsUpperCase => Box::new(standard::RenameDeclsUpperCase),
            PassKind::FunctionToStaticMethod => Box::new(standard::FunctionToStaticMethod),
            PassKind::HandleDefaultParamValues => Box::new(standard::HandleDefaultParamValues),
            PassKind::CheckAmbiguousFunctions => Box::new(standard::CheckAmbiguousFunctions),
            PassKind::CheckOperatorsOverloads => Box::new(standard::CheckOperatorsOverloads),
            PassKind::CheckIgnoredDecls => Box::new(standard::CheckIgnoredDecls),
            PassKind::CheckMacros => Box::new(standard::CheckMacros),
            PassKind::CheckVirtualOverrideReturnCovariance => {
                Box::new(standard::CheckVirtualOverrideReturnCovariance)
            }
            PassKind::CleanInvalidDeclNames => Box::new(standard::CleanInvalidDeclNames),
        }
    }
}

impl fmt::Display for PassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An ordered list of passes, run front to back.
#[derive(Default)]
pub struct PassList {
    passes: Vec<Box<dyn Pass>>,
}

impl PassList {
    /// An empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in implementations in standard order.
    pub fn standard() -> Self {
        Self::with_provider(PassKind::create)
    }

    /// Standard order, with each pass supplied by `provider`. This is how an
    /// external engine substitutes its own implementations.
    pub fn with_provider(mut provider: impl FnMut(PassKind) -> Box<dyn Pass>) -> Self {
        PassList {
            passes: PassKind::ALL.into_iter().map(&mut provider).collect(),
        }
    }

    /// Append a pass.
    pub fn add(&mut self, pass: impl Pass + 'static) -> &mut Self {
        self.passes.push(Box::new(pass));
        self
    }

    pub fn add_boxed(&mut self, pass: Box<dyn Pass>) -> &mut Self {
        self.passes.push(pass);
        self
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// Pass names in run order.
    pub fn names(&self) -> Vec<String> {
        self.passes.iter().map(|p| p.name().to_string()).collect()
    }

    /// Run every pass in order, stopping at the first error.
    pub fn run(&mut self, graph: &mut DeclarationGraph) -> Result<(), GenerationError> {
        for pass in &mut self.passes {
            tracing::debug!("running pass {}", pass.name());
            pass.run(graph)?;
        }
        Ok(())
    }
}

impl fmt::Debug for PassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

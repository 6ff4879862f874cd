use std::collections::HashMap;

use crate::core::decl::{DeclarationGraph, Function, ScopeMut};
use crate::passes::{GenerationError, Pass};

/// Finds overloads C# cannot tell apart.
///
/// Two overloads differing only in `const` are resolved by ignoring the
/// `const` one. Two with the same name, parameter types and constness cannot
/// be resolved and fail the run.
pub struct CheckAmbiguousFunctions;

fn check_scope(functions: &mut [Function]) -> Result<(), GenerationError> {
    let mut seen: HashMap<(String, Vec<String>, bool), usize> = HashMap::new();

    for idx in 0..functions.len() {
        let function = &functions[idx];
        if function.ignored {
            continue;
        }

        let is_const = function.is_const;
        let key = (function.name.clone(), function.signature(), function.is_static);
        let Some(&first) = seen.get(&key) else {
            seen.insert(key, idx);
            continue;
        };

        if functions[first].is_const == is_const {
            return Err(GenerationError::AmbiguousOverload {
                name: function.name.clone(),
                signature: function.signature().join(", "),
            });
        }

        let (const_idx, kept_idx) = if is_const { (idx, first) } else { (first, idx) };
        tracing::debug!(
            "ignoring const overload of `{}`",
            functions[const_idx].name
        );
        functions[const_idx].ignored = true;
        seen.insert(key, kept_idx);
    }

    Ok(())
}

impl Pass for CheckAmbiguousFunctions {
    fn name(&self) -> &str {
        "check-ambiguous-functions"
    }

    fn run(&mut self, graph: &mut DeclarationGraph) -> Result<(), GenerationError> {
        let mut result = Ok(());
        graph.for_each_scope_mut(&mut |scope: ScopeMut<'_>| {
            if result.is_ok() {
                result = check_scope(scope.functions);
            }
        });
        result
    }
}

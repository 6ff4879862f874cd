use crate::core::decl::{DeclarationGraph, Function, Namespace, ScopeMut};
use crate::passes::{GenerationError, Pass};

/// Make `name` a valid identifier: empty names become `_<index>`, other
/// characters outside `[A-Za-z0-9_@]` (plus `extra`) become `_`, and a
/// leading digit gets a `_` prefix.
fn clean(name: &mut String, index: usize, extra: &[char]) {
    if name.is_empty() {
        *name = format!("_{}", index);
        return;
    }

    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '@' || extra.contains(&c) {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = if cleaned.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{}", cleaned)
    } else {
        cleaned
    };

    if cleaned != *name {
        tracing::debug!("renaming invalid name `{}` to `{}`", name, cleaned);
        *name = cleaned;
    }
}

fn clean_function(function: &mut Function, index: usize) {
    // Operators and destructors are spelled with symbols on purpose
    if !function.is_operator() && !function.name.starts_with('~') {
        clean(&mut function.name, index, &[]);
    }
    for (idx, param) in function.params.iter_mut().enumerate() {
        clean(&mut param.name, idx, &[]);
    }
}

fn clean_namespaces(namespaces: &mut [Namespace]) {
    for (idx, ns) in namespaces.iter_mut().enumerate().filter(|(_, ns)| !ns.ignored) {
        clean(&mut ns.name, idx, &['.']);
        clean_namespaces(&mut ns.namespaces);
    }
}

/// Gives anonymous declarations and parameters generated names and replaces
/// characters that are not valid in identifiers.
pub struct CleanInvalidDeclNames;

impl Pass for CleanInvalidDeclNames {
    fn name(&self) -> &str {
        "clean-invalid-decl-names"
    }

    fn run(&mut self, graph: &mut DeclarationGraph) -> Result<(), GenerationError> {
        for unit in &mut graph.units {
            clean_namespaces(&mut unit.namespaces);
        }

        graph.for_each_scope_mut(&mut |scope: ScopeMut<'_>| {
            for (idx, class) in scope.classes.iter_mut().enumerate() {
                if !class.ignored {
                    clean(&mut class.name, idx, &[]);
                }
            }
            for (idx, function) in scope.functions.iter_mut().enumerate() {
                if !function.ignored {
                    clean_function(function, idx);
                }
            }
        });
        Ok(())
    }
}

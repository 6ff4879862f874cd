use std::collections::{HashSet, VecDeque};

use crate::core::decl::{type_identifier, Class, DeclarationGraph, Function};
use crate::passes::{GenerationError, Pass};

/// Ignores `override` methods whose return type differs from the overridden
/// method's, unless it is a pointer or reference to a class derived from the
/// base method's return class.
pub struct CheckVirtualOverrideReturnCovariance;

fn normalize(ty: &str) -> String {
    ty.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_indirect(ty: &str) -> bool {
    ty.trim_end().ends_with('*') || ty.trim_end().ends_with('&')
}

fn base_names(class: &Class) -> impl Iterator<Item = &str> {
    class.bases.iter().filter_map(|b| type_identifier(b))
}

/// Whether `derived` is `base` or inherits from it. Classes are looked up
/// from the unit at `unit` first.
fn derives_from(graph: &DeclarationGraph, unit: usize, derived: &str, base: &str) -> bool {
    let mut visited = HashSet::new();
    let mut stack = vec![derived.to_string()];
    while let Some(name) = stack.pop() {
        if name == base {
            return true;
        }
        if !visited.insert(name.clone()) {
            continue;
        }
        if let Some(class) = graph.find_class_from(unit, &name) {
            stack.extend(base_names(class).map(str::to_string));
        }
    }
    false
}

/// Return type of the nearest base method with the same name and
/// parameter types.
fn overridden_return<'g>(
    graph: &'g DeclarationGraph,
    unit: usize,
    class: &Class,
    method: &Function,
) -> Option<&'g str> {
    let signature = method.signature();
    let mut visited = HashSet::new();
    let mut queue: VecDeque<String> = base_names(class).map(str::to_string).collect();
    while let Some(base_name) = queue.pop_front() {
        if !visited.insert(base_name.clone()) {
            continue;
        }
        let Some(base) = graph.find_class_from(unit, &base_name) else {
            continue;
        };
        if let Some(found) = base
            .methods
            .iter()
            .find(|m| m.name == method.name && m.signature() == signature)
        {
            return Some(&found.return_type);
        }
        queue.extend(base_names(base).map(str::to_string));
    }
    None
}

/// Whether `method` may stay: it either returns what the overridden method
/// returns, or a pointer or reference to a class derived from it.
fn is_valid_override(
    graph: &DeclarationGraph,
    unit: usize,
    class: &Class,
    method: &Function,
) -> bool {
    let Some(base_return) = overridden_return(graph, unit, class, method) else {
        return true;
    };
    if normalize(base_return) == normalize(&method.return_type) {
        return true;
    }

    is_indirect(base_return)
        && is_indirect(&method.return_type)
        && match (type_identifier(&method.return_type), type_identifier(base_return)) {
            (Some(derived), Some(base)) => derives_from(graph, unit, derived, base),
            _ => false,
        }
}

impl Pass for CheckVirtualOverrideReturnCovariance {
    fn name(&self) -> &str {
        "check-virtual-override-return-covariance"
    }

    fn run(&mut self, graph: &mut DeclarationGraph) -> Result<(), GenerationError> {
        // Base lookups read an unmodified copy while methods are marked in place
        let snapshot = graph.clone();

        for (unit, decls) in graph.units.iter_mut().enumerate() {
            decls.for_each_class_mut(&mut |class: &mut Class| {
                let invalid: Vec<usize> = class
                    .methods
                    .iter()
                    .enumerate()
                    .filter(|(_, m)| !m.ignored && m.is_override)
                    .filter(|(_, m)| !is_valid_override(&snapshot, unit, class, m))
                    .map(|(idx, _)| idx)
                    .collect();

                for idx in invalid {
                    let method = &mut class.methods[idx];
                    tracing::debug!(
                        "ignoring `{}::{}`: return type is not covariant",
                        class.name,
                        method.name
                    );
                    method.ignored = true;
                }
            });
        }
        Ok(())
    }
}

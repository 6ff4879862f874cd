use crate::core::decl::{Class, DeclarationGraph, Function, Namespace};
use crate::passes::{GenerationError, Pass};

fn upper_first(name: &mut String) {
    let mut chars = name.chars();
    if let Some(first) = chars.next() {
        if first.is_lowercase() {
            *name = first.to_uppercase().chain(chars).collect();
        }
    }
}

/// Upper-cases the first letter of namespace, class and function names, so
/// a native `std` becomes `Std`. Operators, parameters and macros keep their
/// spelling.
pub struct RenameDeclsUpperCase;

impl Pass for RenameDeclsUpperCase {
    fn name(&self) -> &str {
        "rename-decls-upper-case"
    }

    fn run(&mut self, graph: &mut DeclarationGraph) -> Result<(), GenerationError> {
        graph.for_each_namespace_mut(&mut |ns: &mut Namespace| upper_first(&mut ns.name));
        graph.for_each_class_mut(&mut |class: &mut Class| upper_first(&mut class.name));
        graph.for_each_function_mut(&mut |function: &mut Function| {
            if !function.is_operator() {
                upper_first(&mut function.name);
            }
        });
        Ok(())
    }
}

use crate::core::decl::{type_identifier, DeclarationGraph, Function};
use crate::passes::{GenerationError, Pass};

/// Ignores functions whose signature mentions an ignored class, so nothing
/// that survives refers to a declaration that will not be generated.
pub struct CheckIgnoredDecls;

impl Pass for CheckIgnoredDecls {
    fn name(&self) -> &str {
        "check-ignored-decls"
    }

    fn run(&mut self, graph: &mut DeclarationGraph) -> Result<(), GenerationError> {
        let ignored = graph.ignored_classes();
        if ignored.is_empty() {
            return Ok(());
        }

        let refers_to_ignored =
            |ty: &str| type_identifier(ty).is_some_and(|name| ignored.contains(name));

        graph.for_each_function_mut(&mut |function: &mut Function| {
            let uses_ignored = refers_to_ignored(&function.return_type)
                || function.params.iter().any(|p| refers_to_ignored(&p.ty));
            if uses_ignored {
                tracing::debug!(
                    "ignoring `{}`: its signature uses an ignored class",
                    function.name
                );
                function.ignored = true;
            }
        });
        Ok(())
    }
}

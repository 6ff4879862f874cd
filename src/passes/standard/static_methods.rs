use crate::core::decl::{DeclarationGraph, ScopeKind, ScopeMut};
use crate::passes::{GenerationError, Pass};

/// Method name for a free function `function` moved into class `class`, if
/// the function name is the class name followed by `_` or an upper-case
/// letter.
fn static_method_name(function: &str, class: &str) -> Option<String> {
    let rest = function.strip_prefix(class)?;
    let rest = match rest.strip_prefix('_') {
        Some(stripped) => stripped,
        None if rest.starts_with(|c: char| c.is_uppercase()) => rest,
        None => return None,
    };
    if rest.is_empty() {
        None
    } else {
        Some(rest.to_string())
    }
}

/// Moves free functions named after a class in the same scope into that
/// class as static methods: `SpoutDX_GetVersion` becomes `SpoutDX::GetVersion`.
/// The longest matching class name wins.
pub struct FunctionToStaticMethod;

impl Pass for FunctionToStaticMethod {
    fn name(&self) -> &str {
        "function-to-static-method"
    }

    fn run(&mut self, graph: &mut DeclarationGraph) -> Result<(), GenerationError> {
        graph.for_each_scope_mut(&mut |scope: ScopeMut<'_>| {
            if scope.kind == ScopeKind::Class {
                return;
            }

            let mut i = 0;
            while i < scope.functions.len() {
                let function = &scope.functions[i];
                let target = if function.ignored || function.is_operator() {
                    None
                } else {
                    scope
                        .classes
                        .iter()
                        .enumerate()
                        .filter(|(_, class)| !class.ignored)
                        .filter_map(|(idx, class)| {
                            static_method_name(&function.name, &class.name)
                                .map(|name| (idx, class.name.len(), name))
                        })
                        .max_by_key(|(_, len, _)| *len)
                };

                match target {
                    Some((idx, _, name)) => {
                        let mut method = scope.functions.remove(i);
                        tracing::debug!(
                            "moving `{}` into `{}` as `{}`",
                            method.name,
                            scope.classes[idx].name,
                            name
                        );
                        method.name = name;
                        method.is_static = true;
                        scope.classes[idx].methods.push(method);
                    }
                    None => i += 1,
                }
            }
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::decl::{Class, Function, Namespace, TranslationUnit};

    #[test]
    fn test_static_method_name() {
        assert_eq!(
            static_method_name("SpoutDX_GetVersion", "SpoutDX"),
            Some("GetVersion".to_string())
        );
        assert_eq!(static_method_name("SpoutDXCreate", "SpoutDX"), Some("Create".to_string()));
        assert_eq!(static_method_name("SpoutDXcreate", "SpoutDX"), None);
        assert_eq!(static_method_name("SpoutDX_", "SpoutDX"), None);
        assert_eq!(static_method_name("SpoutDX", "SpoutDX"), None);
        assert_eq!(static_method_name("Other", "SpoutDX"), None);
    }

    #[test]
    fn test_moves_matching_free_functions() {
        let mut graph = DeclarationGraph::new().with_unit(
            TranslationUnit::new("a.h")
                .with_class(Class::new("Spout"))
                .with_class(Class::new("SpoutDX"))
                .with_function(Function::new("SpoutDX_GetVersion", "int"))
                .with_function(Function::new("SpoutGetName", "const char*"))
                .with_function(Function::new("OpenSpoutConsole", "void")),
        );

        FunctionToStaticMethod.run(&mut graph).unwrap();

        let unit = &graph.units[0];
        assert_eq!(unit.functions.len(), 1);
        assert_eq!(unit.functions[0].name, "OpenSpoutConsole");

        let spout = &unit.classes[0];
        assert_eq!(spout.methods.len(), 1);
        assert_eq!(spout.methods[0].name, "GetName");
        assert!(spout.methods[0].is_static);

        // Longest class name wins over the `Spout` prefix
        let spoutdx = &unit.classes[1];
        assert_eq!(spoutdx.methods[0].name, "GetVersion");
    }

    #[test]
    fn test_ignored_classes_receive_nothing() {
        let mut target = Class::new("ID3D11Foo");
        target.ignore();
        let mut graph = DeclarationGraph::new().with_unit(
            TranslationUnit::new("a.h")
                .with_class(target)
                .with_function(Function::new("ID3D11Foo_Create", "void")),
        );

        FunctionToStaticMethod.run(&mut graph).unwrap();
        assert_eq!(graph.units[0].functions.len(), 1);
        assert!(graph.units[0].classes[0].methods.is_empty());
    }

    #[test]
    fn test_works_inside_namespaces() {
        let mut graph = DeclarationGraph::new().with_unit(
            TranslationUnit::new("a.h").with_namespace(
                Namespace::new("spoututils")
                    .with_class(Class::new("Log"))
                    .with_function(Function::new("Log_Open", "void")),
            ),
        );

        FunctionToStaticMethod.run(&mut graph).unwrap();
        let ns = &graph.units[0].namespaces[0];
        assert!(ns.functions.is_empty());
        assert_eq!(ns.classes[0].methods[0].name, "Open");
    }
}

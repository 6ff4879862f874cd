use crate::core::decl::{Class, DeclarationGraph, Function, Namespace};
use crate::passes::{GenerationError, Pass};

/// C# reserved keywords.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

pub(crate) fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

fn escape(name: &mut String) {
    if is_keyword(name) {
        tracing::debug!("escaping keyword `{}`", name);
        name.insert(0, '@');
    }
}

/// Escapes declaration and parameter names that are C# keywords with `@`.
pub struct CheckKeywordNames;

impl Pass for CheckKeywordNames {
    fn name(&self) -> &str {
        "check-keyword-names"
    }

    fn run(&mut self, graph: &mut DeclarationGraph) -> Result<(), GenerationError> {
        graph.for_each_namespace_mut(&mut |ns: &mut Namespace| escape(&mut ns.name));
        graph.for_each_class_mut(&mut |class: &mut Class| escape(&mut class.name));
        graph.for_each_function_mut(&mut |function: &mut Function| {
            escape(&mut function.name);
            for param in &mut function.params {
                escape(&mut param.name);
            }
        });
        Ok(())
    }
}

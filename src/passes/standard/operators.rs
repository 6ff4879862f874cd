use crate::core::decl::{DeclarationGraph, Function};
use crate::passes::{GenerationError, Pass};

/// Operators with no C# overload equivalent.
const UNSUPPORTED: &[&str] = &[
    "->", "->*", ",", "()", "new", "new[]", "delete", "delete[]", "=", "&&", "||", "+=", "-=",
    "*=", "/=", "%=", "&=", "|=", "^=", "<<=", ">>=",
];

fn is_supported(symbol: &str) -> bool {
    let symbol: String = symbol.chars().filter(|c| !c.is_whitespace()).collect();
    !UNSUPPORTED.contains(&symbol.as_str())
}

/// Ignores operator overloads that cannot be expressed in C#.
pub struct CheckOperatorsOverloads;

impl Pass for CheckOperatorsOverloads {
    fn name(&self) -> &str {
        "check-operators-overloads"
    }

    fn run(&mut self, graph: &mut DeclarationGraph) -> Result<(), GenerationError> {
        graph.for_each_function_mut(&mut |function: &mut Function| {
            let unsupported = function.operator_symbol().is_some_and(|s| !is_supported(s));
            if unsupported {
                tracing::debug!("ignoring unsupported operator `{}`", function.name);
                function.ignored = true;
            }
        });
        Ok(())
    }
}

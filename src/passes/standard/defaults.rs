use std::sync::LazyLock;

use regex::Regex;

use crate::core::decl::{DeclarationGraph, Function};
use crate::passes::{GenerationError, Pass};

static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[-+]?(0[xX][0-9a-fA-F]+|\d+(\.\d*)?([eE][-+]?\d+)?|\.\d+([eE][-+]?\d+)?)[uUlLfF]*$",
    )
        .expect("number literal regex")
});

/// Whether `value` is a literal C# can express directly: a number, a
/// boolean, a null pointer, or a string or character literal.
pub(crate) fn is_literal(value: &str) -> bool {
    let value = value.trim();
    let value = value
        .strip_prefix('(')
        .and_then(|v| v.strip_suffix(')'))
        .map(str::trim)
        .unwrap_or(value);

    if value.is_empty() {
        return false;
    }

    matches!(value, "true" | "false" | "nullptr" | "NULL" | "0L")
        || NUMBER.is_match(value)
        || (value.len() >= 2 && value.starts_with('"') && value.ends_with('"'))
        || (value.len() >= 3 && value.starts_with('\'') && value.ends_with('\''))
}

fn materialize_defaults(function: &mut Function) {
    let last_dropped = function
        .params
        .iter()
        .rposition(|p| p.default.as_deref().is_some_and(|d| !is_literal(d)));

    // Optional parameters must trail; drop every default up to the last
    // one that could not be kept.
    if let Some(last) = last_dropped {
        tracing::debug!(
            "dropping default values of `{}` up to parameter {}",
            function.name,
            last
        );
        for param in &mut function.params[..=last] {
            param.default = None;
        }
    }
}

/// Keeps default arguments that are plain literals and drops the rest.
pub struct HandleDefaultParamValues;

impl Pass for HandleDefaultParamValues {
    fn name(&self) -> &str {
        "handle-default-param-values"
    }

    fn run(&mut self, graph: &mut DeclarationGraph) -> Result<(), GenerationError> {
        graph.for_each_function_mut(&mut |function: &mut Function| materialize_defaults(function));
        Ok(())
    }
}

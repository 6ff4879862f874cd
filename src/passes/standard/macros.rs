use crate::core::decl::DeclarationGraph;
use crate::passes::{GenerationError, Pass};

use super::is_literal;

/// Ignores macros that do not expand to a literal and so cannot become
/// constants.
pub struct CheckMacros;

impl Pass for CheckMacros {
    fn name(&self) -> &str {
        "check-macros"
    }

    fn run(&mut self, graph: &mut DeclarationGraph) -> Result<(), GenerationError> {
        for unit in &mut graph.units {
            for mac in unit.macros.iter_mut().filter(|m| !m.ignored) {
                if !is_literal(&mac.value) {
                    tracing::debug!("ignoring macro `{}`", mac.name);
                    mac.ignored = true;
                }
            }
        }
        Ok(())
    }
}

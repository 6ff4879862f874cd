//! Applying filter rules to a declaration graph.

use crate::core::decl::DeclarationGraph;

use super::rules::FilterRules;

/// What one filter application did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSummary {
    /// Classes evaluated
    pub inspected: usize,
    /// Classes marked ignored by this application
    pub ignored: Vec<String>,
    /// Classes a deny rule matched but an allow override kept
    pub overridden: Vec<String>,
}

/// Mark every class declared directly in a translation unit that the rules
/// exclude. Ignoring a class excludes its whole subtree.
///
/// Classes no deny rule matches are left untouched, and an already ignored
/// class is never re-admitted, so applying the filter again is a no-op.
pub fn apply_filter(graph: &mut DeclarationGraph, rules: &FilterRules) -> FilterSummary {
    let mut summary = FilterSummary::default();

    for unit in &mut graph.units {
        for class in &mut unit.classes {
            summary.inspected += 1;
            let decision = rules.evaluate(&class.name);

            if decision.ignore {
                tracing::debug!("ignoring `{}` ({})", class.name, decision);
                if !class.ignored {
                    class.ignore();
                    summary.ignored.push(class.name.clone());
                }
            } else if decision.is_override() {
                tracing::debug!("keeping `{}` ({})", class.name, decision);
                summary.overridden.push(class.name.clone());
            }
        }
    }

    summary
}

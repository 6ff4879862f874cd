//! Stage ordering: filter, then passes, then renamer.

use crate::core::decl::DeclarationGraph;
use crate::filter::{apply_filter, FilterRules, FilterSummary};
use crate::rename::{NamespaceRenamer, Renamed};
use crate::util::config::Config;

use super::errors::GenerationError;
use super::pass::PassList;

/// Name of the pre-pass filter stage.
pub const FILTER_STAGE: &str = "declaration-filter";
/// Name of the post-pass rename stage.
pub const RENAME_STAGE: &str = "rename-colliding-namespaces";

/// What a pipeline run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub filter: FilterSummary,
    /// Stages in the order they ran
    pub stages: Vec<String>,
    pub renamed: Vec<Renamed>,
}

/// The ordered transformation stages applied to an extracted graph.
///
/// The declaration filter always runs before the first pass, since passes
/// must not see declarations the filter drops; the renamer always runs
/// after the last, since the filter rules and the passes match on
/// pre-rename names.
#[derive(Debug)]
pub struct Pipeline {
    rules: FilterRules,
    passes: PassList,
    renamer: NamespaceRenamer,
}

impl Pipeline {
    pub fn new(rules: FilterRules, passes: PassList, renamer: NamespaceRenamer) -> Self {
        Pipeline {
            rules,
            passes,
            renamer,
        }
    }

    /// The configured rules and renames around the built-in passes.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            FilterRules::from_config(&config.filter),
            PassList::standard(),
            NamespaceRenamer::from_config(&config.rename),
        )
    }

    pub fn rules(&self) -> &FilterRules {
        &self.rules
    }

    /// Stage names in run order.
    pub fn stages(&self) -> Vec<String> {
        std::iter::once(FILTER_STAGE.to_string())
            .chain(self.passes.names())
            .chain(std::iter::once(RENAME_STAGE.to_string()))
            .collect()
    }

    /// Run every stage over `graph`. The first failing pass aborts the run;
    /// the graph is left partially processed and must be discarded.
    pub fn run(&mut self, graph: &mut DeclarationGraph) -> Result<RunReport, GenerationError> {
        let filter = apply_filter(graph, &self.rules);
        tracing::info!(
            "filter: {} classes inspected, {} ignored, {} kept by override",
            filter.inspected,
            filter.ignored.len(),
            filter.overridden.len()
        );

        self.passes.run(graph)?;

        let renamed = self.renamer.rename_colliding_namespaces(graph);
        for r in &renamed {
            tracing::info!("renamed namespace {} -> {}", r.from, r.to);
        }

        Ok(RunReport {
            filter,
            stages: self.stages(),
            renamed,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::core::decl::{Class, Namespace, TranslationUnit};
    use crate::filter::FilterRule;
    use crate::passes::Pass;
    use crate::test_support::scenario_graph;

    fn rules() -> FilterRules {
        FilterRules::new([FilterRule::prefix("ID3D11")], ["ID3D11Device", "SpoutDX"])
    }

    /// Records what it observes and fails if it ever sees a filtered class
    /// or a renamed namespace.
    struct Observer {
        seen: Rc<RefCell<Vec<String>>>,
    }

    impl Pass for Observer {
        fn name(&self) -> &str {
            "observer"
        }

        fn run(&mut self, graph: &mut DeclarationGraph) -> Result<(), GenerationError> {
            let mut failure = None;
            graph.for_each_class_mut(&mut |class: &mut Class| {
                if class.name == "ID3D11Foo" {
                    failure = Some("saw filtered class".to_string());
                }
                class.name.push_str("_seen");
            });
            graph.for_each_namespace_mut(&mut |ns: &mut Namespace| {
                self.seen.borrow_mut().push(ns.name.clone());
                if ns.name.contains('.') {
                    failure = Some("saw renamed namespace".to_string());
                }
            });
            match failure {
                Some(message) => Err(GenerationError::Pass {
                    pass: "observer".to_string(),
                    message,
                }),
                None => Ok(()),
            }
        }
    }

    #[test]
    fn test_filter_runs_before_and_renamer_after_passes() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut passes = PassList::new();
        passes.add(Observer { seen: seen.clone() });

        let mut pipeline = Pipeline::new(rules(), passes, NamespaceRenamer::default());
        let mut graph = scenario_graph();
        let report = pipeline.run(&mut graph).unwrap();

        assert_eq!(*seen.borrow(), vec!["Std".to_string()]);
        // The filtered class was never touched by the pass
        assert_eq!(graph.units[0].classes[0].name, "ID3D11Foo");
        assert_eq!(graph.units[1].classes[0].name, "SpoutDX_seen");
        assert_eq!(graph.units[1].namespaces[0].name, "Spout.Std");
        assert_eq!(
            report.stages,
            vec![FILTER_STAGE, "observer", RENAME_STAGE]
        );
    }

    #[test]
    fn test_pass_error_aborts_before_rename() {
        struct Reject;
        impl Pass for Reject {
            fn name(&self) -> &str {
                "reject"
            }
            fn run(&mut self, _graph: &mut DeclarationGraph) -> Result<(), GenerationError> {
                Err(GenerationError::Pass {
                    pass: "reject".to_string(),
                    message: "unsupported".to_string(),
                })
            }
        }

        let mut passes = PassList::new();
        passes.add(Reject);
        let mut pipeline = Pipeline::new(rules(), passes, NamespaceRenamer::default());
        let mut graph = scenario_graph();

        assert!(pipeline.run(&mut graph).is_err());
        assert_eq!(graph.units[1].namespaces[0].name, "Std");
    }

    #[test]
    fn test_end_to_end_scenario_with_standard_passes() {
        let mut pipeline =
            Pipeline::new(rules(), PassList::standard(), NamespaceRenamer::default());
        let mut graph = scenario_graph();
        let report = pipeline.run(&mut graph).unwrap();

        let output = graph.retained();
        assert!(output.find_class("ID3D11Foo").is_none());
        assert_eq!(output.find_class("SpoutDX"), Some(&Class::new("SpoutDX")));
        assert!(output.find_namespace("Spout.Std").is_some());
        assert!(output.find_namespace("Std").is_none());
        assert_eq!(report.filter.ignored, vec!["ID3D11Foo"]);
        assert_eq!(report.stages.len(), 12);
    }

    #[test]
    fn test_lowercase_std_is_renamed_after_case_normalization() {
        let mut pipeline =
            Pipeline::new(rules(), PassList::standard(), NamespaceRenamer::default());
        let mut graph = DeclarationGraph::new()
            .with_unit(TranslationUnit::new("a.h").with_namespace(Namespace::new("std")));

        pipeline.run(&mut graph).unwrap();
        assert_eq!(graph.units[0].namespaces[0].name, "Spout.Std");
    }
}

//! Post-extraction namespace renaming.
//!
//! Runs once, after every pass. Some native namespaces share a bare name with
//! a namespace the managed side opens everywhere (`Std` after case
//! normalization of `std`); those are moved under the module's own
//! namespace. Matching is exact, never by prefix.

use crate::core::decl::DeclarationGraph;
use crate::util::config::RenameConfig;

/// A namespace rename that was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renamed {
    pub from: String,
    pub to: String,
}

/// Renames colliding namespaces to `<qualifier>.<name>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceRenamer {
    reserved: Vec<String>,
    qualifier: String,
}

impl NamespaceRenamer {
    pub fn new<S: Into<String>>(
        reserved: impl IntoIterator<Item = S>,
        qualifier: impl Into<String>,
    ) -> Self {
        NamespaceRenamer {
            reserved: reserved.into_iter().map(Into::into).collect(),
            qualifier: qualifier.into(),
        }
    }

    pub fn from_config(config: &RenameConfig) -> Self {
        Self::new(config.namespaces.iter().cloned(), config.qualifier.clone())
    }

    /// The name `name` is rewritten to, if it is reserved.
    pub fn qualified(&self, name: &str) -> Option<String> {
        self.reserved
            .iter()
            .any(|r| r == name)
            .then(|| format!("{}.{}", self.qualifier, name))
    }

    /// Rewrite every reserved namespace declared directly in a translation
    /// unit.
    pub fn rename_colliding_namespaces(&self, graph: &mut DeclarationGraph) -> Vec<Renamed> {
        let mut renamed = Vec::new();

        for unit in &mut graph.units {
            for ns in &mut unit.namespaces {
                if let Some(to) = self.qualified(&ns.name) {
                    tracing::debug!("renaming namespace `{}` to `{}`", ns.name, to);
                    renamed.push(Renamed {
                        from: std::mem::replace(&mut ns.name, to.clone()),
                        to,
                    });
                }
            }
        }

        renamed
    }
}

impl Default for NamespaceRenamer {
    fn default() -> Self {
        Self::from_config(&RenameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::decl::{Namespace, TranslationUnit};

    #[test]
    fn test_renames_exact_match_only() {
        let mut graph = DeclarationGraph::new().with_unit(
            TranslationUnit::new("a.h")
                .with_namespace(Namespace::new("Std"))
                .with_namespace(Namespace::new("Standard"))
                .with_namespace(Namespace::new("StdExt")),
        );

        let renamed = NamespaceRenamer::default().rename_colliding_namespaces(&mut graph);

        let names: Vec<&str> = graph.units[0].namespaces.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Spout.Std", "Standard", "StdExt"]);
        assert_eq!(
            renamed,
            vec![Renamed {
                from: "Std".to_string(),
                to: "Spout.Std".to_string()
            }]
        );
    }

    #[test]
    fn test_configured_qualifier() {
        let renamer = NamespaceRenamer::new(["Std", "System"], "SpoutInterop");
        assert_eq!(renamer.qualified("System").as_deref(), Some("SpoutInterop.System"));
        assert_eq!(renamer.qualified("std"), None);
    }

    #[test]
    fn test_renaming_twice_does_not_double_qualify() {
        let mut graph = DeclarationGraph::new()
            .with_unit(TranslationUnit::new("a.h").with_namespace(Namespace::new("Std")));
        let renamer = NamespaceRenamer::default();

        renamer.rename_colliding_namespaces(&mut graph);
        let second = renamer.rename_colliding_namespaces(&mut graph);

        assert!(second.is_empty());
        assert_eq!(graph.units[0].namespaces[0].name, "Spout.Std");
    }
}

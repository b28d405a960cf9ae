//! Dependency extraction contract.
//!
//! The audit consumes an adjacency listing plus pass-through structure data
//! (cycles, orphans, leaves, warnings) from an extractor. Cycles are taken
//! as given; the audit never recomputes them.

pub mod file;

use crate::core::{CircularGroup, DependencyTree, ModuleId};
use crate::errors::Result;
use crate::graph::{detect_circular_dependencies, normalize_tree, DependencyGraph};
use std::collections::{HashMap, HashSet};

pub use file::{normalize_module_id, FileExtractor};

/// Everything an extractor hands to the audit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedDependencies {
    pub adjacency: DependencyTree,
    /// Optional layout diagram (Graphviz SVG) used only for coordinates.
    pub diagram: Option<Vec<u8>>,
    pub warnings: Vec<String>,
    pub circular_groups: Vec<CircularGroup>,
    /// Modules no other module depends on.
    pub orphan_modules: Vec<ModuleId>,
    /// Modules without dependencies.
    pub leaf_modules: Vec<ModuleId>,
}

impl ExtractedDependencies {
    /// Wrap an adjacency listing and derive cycles, orphans and leaves from it.
    pub fn from_tree(adjacency: DependencyTree) -> Self {
        let (circular_groups, orphan_modules, leaf_modules) = derive_structure(&adjacency);
        Self {
            adjacency,
            diagram: None,
            warnings: Vec::new(),
            circular_groups,
            orphan_modules,
            leaf_modules,
        }
    }

    pub fn with_diagram(mut self, diagram: Vec<u8>) -> Self {
        self.diagram = Some(diagram);
        self
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }
}

/// Source of dependency data for one audit run.
pub trait DependencyExtractor {
    fn extract(&self) -> Result<ExtractedDependencies>;
}

/// Hands out a fixed, already extracted result.
#[derive(Debug, Clone, Default)]
pub struct StaticExtractor {
    extracted: ExtractedDependencies,
}

impl StaticExtractor {
    pub fn new(extracted: ExtractedDependencies) -> Self {
        Self { extracted }
    }

    pub fn from_tree(tree: DependencyTree) -> Self {
        Self::new(ExtractedDependencies::from_tree(tree))
    }
}

impl DependencyExtractor for StaticExtractor {
    fn extract(&self) -> Result<ExtractedDependencies> {
        Ok(self.extracted.clone())
    }
}

/// Circular groups, orphan modules and leaf modules of a listing.
fn derive_structure(tree: &DependencyTree) -> (Vec<CircularGroup>, Vec<ModuleId>, Vec<ModuleId>) {
    let build = DependencyGraph::from_normalized(&normalize_tree(tree), &HashMap::new());
    let circular_groups = detect_circular_dependencies(&build.graph);

    let depended_on: HashSet<&str> = tree
        .iter()
        .flat_map(|(module, deps)| {
            deps.iter()
                .filter(move |dep| *dep != module)
                .map(String::as_str)
        })
        .collect();

    let orphan_modules = tree
        .keys()
        .filter(|module| !depended_on.contains(module.as_str()))
        .cloned()
        .collect();
    let leaf_modules = tree
        .iter()
        .filter(|(_, deps)| deps.is_empty())
        .map(|(module, _)| module.clone())
        .collect();

    (circular_groups, orphan_modules, leaf_modules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tree(entries: &[(&str, &[&str])]) -> DependencyTree {
        entries
            .iter()
            .map(|(module, deps)| {
                (
                    module.to_string(),
                    deps.iter().map(|d| d.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_from_tree_derives_structure() {
        let extracted = ExtractedDependencies::from_tree(tree(&[
            ("main", &["a"]),
            ("a", &["b"]),
            ("b", &["a", "util"]),
            ("util", &[]),
        ]));

        assert_eq!(extracted.circular_groups, vec![vec!["a", "b"]]);
        assert_eq!(extracted.orphan_modules, vec!["main"]);
        assert_eq!(extracted.leaf_modules, vec!["util"]);
    }

    #[test]
    fn test_self_import_does_not_hide_orphan() {
        let extracted = ExtractedDependencies::from_tree(tree(&[("a", &["a"])]));
        assert_eq!(extracted.orphan_modules, vec!["a"]);
        assert_eq!(extracted.circular_groups, vec![vec!["a"]]);
    }

    #[test]
    fn test_static_extractor_returns_copy() {
        let extractor = StaticExtractor::from_tree(tree(&[("a", &[])]));
        let first = extractor.extract().unwrap();
        let second = extractor.extract().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.adjacency.len(), 1);
    }
}

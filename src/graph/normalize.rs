//! Flattening of the raw adjacency listing into node and edge lists.

use crate::core::{DependencyTree, ModuleId};
use serde::Serialize;

/// Flat node and edge lists ready for graph construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizedTree {
    /// Every key of the adjacency listing, in declaration order.
    pub nodes: Vec<ModuleId>,
    /// One `(module, dependency)` pair per listed dependency, in declaration
    /// order. Duplicates are kept; the graph collapses them.
    pub edges: Vec<(ModuleId, ModuleId)>,
}

impl NormalizedTree {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Convert an adjacency listing into node and edge lists.
pub fn normalize_tree(tree: &DependencyTree) -> NormalizedTree {
    let nodes = tree.keys().cloned().collect();
    let edges = tree
        .iter()
        .flat_map(|(module, deps)| deps.iter().map(move |dep| (module.clone(), dep.clone())))
        .collect();

    NormalizedTree { nodes, edges }
}

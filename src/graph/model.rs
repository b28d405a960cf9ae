//! Directed module dependency graph.
//!
//! Nodes are keyed by module identifier and carry optional display
//! coordinates. Edges are directed, unweighted and unique per ordered pair;
//! self-loops are allowed. Once built the graph is only read, so metric
//! passes may share a `&DependencyGraph` across threads.

use crate::core::{ModuleId, Position};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

use super::normalize::NormalizedTree;

/// A module vertex.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleNode {
    pub id: ModuleId,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// Dependency graph for one analysis run.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    graph: DiGraph<ModuleNode, ()>,
    index: HashMap<ModuleId, NodeIndex>,
}

/// Outcome of building a graph from normalized data.
#[derive(Debug, Clone)]
pub struct GraphBuild {
    pub graph: DependencyGraph,
    /// Edges discarded because an endpoint is not a known module.
    pub dropped_edges: Vec<(ModuleId, ModuleId)>,
}

impl DependencyGraph {
    /// Create a new empty dependency graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from normalized tree data. All nodes are added before
    /// any edge; edges with an unknown endpoint are dropped and reported.
    pub fn from_normalized(
        tree: &NormalizedTree,
        positions: &HashMap<ModuleId, Position>,
    ) -> GraphBuild {
        let mut graph = DependencyGraph::new();
        for module in &tree.nodes {
            graph.add_node(module.clone(), positions.get(module).copied());
        }

        let dropped_edges = tree
            .edges
            .iter()
            .filter(|(source, target)| !(graph.has_node(source) && graph.has_node(target)))
            .cloned()
            .collect();

        for (source, target) in &tree.edges {
            graph.add_edge(source, target);
        }

        GraphBuild {
            graph,
            dropped_edges,
        }
    }

    /// Add a module. Returns `false` (and leaves the existing node untouched)
    /// when the module is already present.
    pub fn add_node(&mut self, id: impl Into<ModuleId>, position: Option<Position>) -> bool {
        let id = id.into();
        if self.index.contains_key(&id) {
            return false;
        }
        let node = self.graph.add_node(ModuleNode {
            id: id.clone(),
            position,
        });
        self.index.insert(id, node);
        true
    }

    /// Add a dependency edge. Returns `false` without modifying the graph if
    /// either endpoint is unknown or the edge already exists.
    pub fn add_edge(&mut self, source: &str, target: &str) -> bool {
        let (Some(&from), Some(&to)) = (self.index.get(source), self.index.get(target)) else {
            return false;
        };
        if self.graph.find_edge(from, to).is_some() {
            return false;
        }
        self.graph.add_edge(from, to, ());
        true
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        match (self.index.get(source), self.index.get(target)) {
            (Some(&from), Some(&to)) => self.graph.find_edge(from, to).is_some(),
            _ => false,
        }
    }

    pub fn node(&self, id: &str) -> Option<&ModuleNode> {
        self.index.get(id).map(|&idx| &self.graph[idx])
    }

    /// Modules in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &ModuleNode> {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    /// Edges as `(source, target)` in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&ModuleId, &ModuleId)> {
        self.graph
            .edge_references()
            .map(move |edge| (&self.graph[edge.source()].id, &self.graph[edge.target()].id))
    }

    /// Modules `id` depends on, in edge insertion order.
    pub fn neighbors(&self, id: &str) -> Vec<&ModuleId> {
        self.directed_neighbors(id, Direction::Outgoing)
    }

    /// Modules depending on `id`, in edge insertion order.
    pub fn in_neighbors(&self, id: &str) -> Vec<&ModuleId> {
        self.directed_neighbors(id, Direction::Incoming)
    }

    /// Incoming edge count; a self-loop counts once.
    pub fn in_degree(&self, id: &str) -> usize {
        self.degree(id, Direction::Incoming)
    }

    /// Outgoing edge count; a self-loop counts once.
    pub fn out_degree(&self, id: &str) -> usize {
        self.degree(id, Direction::Outgoing)
    }

    /// Dense position of a module, matching `nodes()` order.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).map(|idx| idx.index())
    }

    pub(crate) fn petgraph(&self) -> &DiGraph<ModuleNode, ()> {
        &self.graph
    }

    fn directed_neighbors(&self, id: &str, direction: Direction) -> Vec<&ModuleId> {
        let Some(&idx) = self.index.get(id) else {
            return Vec::new();
        };
        // petgraph lists the most recently added edge first
        let mut neighbors: Vec<&ModuleId> = self
            .graph
            .neighbors_directed(idx, direction)
            .map(|n| &self.graph[n].id)
            .collect();
        neighbors.reverse();
        neighbors
    }

    fn degree(&self, id: &str, direction: Direction) -> usize {
        self.index
            .get(id)
            .map(|&idx| self.graph.edges_directed(idx, direction).count())
            .unwrap_or(0)
    }
}

impl Serialize for DependencyGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let nodes: Vec<&ModuleNode> = self.nodes().collect();
        let edges: Vec<(&ModuleId, &ModuleId)> = self.edges().collect();
        let mut state = serializer.serialize_struct("DependencyGraph", 2)?;
        state.serialize_field("nodes", &nodes)?;
        state.serialize_field("edges", &edges)?;
        state.end()
    }
}

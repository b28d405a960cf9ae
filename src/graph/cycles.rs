//! Circular dependency detection.
//!
//! Reports one representative cycle per strongly connected component, so a
//! module belongs to at most one group. The representative starts at the
//! component's earliest module (insertion order) and takes the shortest path
//! back to it.

use crate::core::CircularGroup;
use petgraph::algo::tarjan_scc;
use petgraph::graph::NodeIndex;
use std::collections::{HashMap, HashSet, VecDeque};

use super::model::{DependencyGraph, ModuleNode};

type ModuleGraph = petgraph::graph::DiGraph<ModuleNode, ()>;

/// Enumerate circular dependency groups, ordered by first module.
pub fn detect_circular_dependencies(graph: &DependencyGraph) -> Vec<CircularGroup> {
    let inner = graph.petgraph();

    let mut starts: Vec<(NodeIndex, HashSet<NodeIndex>)> = tarjan_scc(inner)
        .into_iter()
        .filter(|component| {
            component.len() > 1 || inner.find_edge(component[0], component[0]).is_some()
        })
        .filter_map(|component| {
            let start = component.iter().min().copied()?;
            Some((start, component.into_iter().collect()))
        })
        .collect();
    starts.sort_by_key(|(start, _)| *start);

    starts
        .into_iter()
        .filter_map(|(start, members)| shortest_cycle(inner, start, &members))
        .map(|cycle| cycle.into_iter().map(|idx| inner[idx].id.clone()).collect())
        .collect()
}

fn successors(graph: &ModuleGraph, node: NodeIndex) -> Vec<NodeIndex> {
    let mut next: Vec<NodeIndex> = graph.neighbors(node).collect();
    next.reverse();
    next
}

fn shortest_cycle(
    graph: &ModuleGraph,
    start: NodeIndex,
    members: &HashSet<NodeIndex>,
) -> Option<Vec<NodeIndex>> {
    let mut parent: HashMap<NodeIndex, NodeIndex> = HashMap::new();
    let mut queue = VecDeque::from([start]);
    let mut seen = HashSet::from([start]);

    while let Some(node) = queue.pop_front() {
        for next in successors(graph, node) {
            if next == start {
                return Some(unwind(&parent, start, node));
            }
            if members.contains(&next) && seen.insert(next) {
                parent.insert(next, node);
                queue.push_back(next);
            }
        }
    }
    None
}

fn unwind(parent: &HashMap<NodeIndex, NodeIndex>, start: NodeIndex, last: NodeIndex) -> Vec<NodeIndex> {
    let mut path = vec![last];
    let mut node = last;
    while node != start {
        match parent.get(&node) {
            Some(&prev) => {
                path.push(prev);
                node = prev;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn graph(nodes: &[&str], edges: &[(&str, &str)]) -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        for node in nodes {
            graph.add_node(*node, None);
        }
        for (source, target) in edges {
            graph.add_edge(source, target);
        }
        graph
    }

    #[test]
    fn test_three_cycle() {
        let graph = graph(&["A", "B", "C"], &[("A", "B"), ("B", "C"), ("C", "A")]);
        assert_eq!(detect_circular_dependencies(&graph), vec![vec!["A", "B", "C"]]);
    }

    #[test]
    fn test_self_dependency() {
        let graph = graph(&["A", "B"], &[("A", "A"), ("A", "B")]);
        assert_eq!(detect_circular_dependencies(&graph), vec![vec!["A"]]);
    }

    #[test]
    fn test_acyclic_graph_has_no_groups() {
        let graph = graph(&["A", "B", "C"], &[("A", "B"), ("B", "C"), ("A", "C")]);
        assert!(detect_circular_dependencies(&graph).is_empty());
    }

    #[test]
    fn test_disjoint_cycles_are_reported_in_order() {
        let graph = graph(
            &["x", "y", "a", "b"],
            &[("a", "b"), ("b", "a"), ("x", "y"), ("y", "x")],
        );
        assert_eq!(
            detect_circular_dependencies(&graph),
            vec![vec!["x", "y"], vec!["a", "b"]]
        );
    }

    #[test]
    fn test_overlapping_cycles_share_one_group() {
        // A->B->A and A->C->A form one component
        let graph = graph(
            &["A", "B", "C"],
            &[("A", "B"), ("B", "A"), ("A", "C"), ("C", "A")],
        );
        let groups = detect_circular_dependencies(&graph);
        assert_eq!(groups, vec![vec!["A", "B"]]);
    }

    #[test]
    fn test_rotation_starts_at_earliest_module() {
        let graph = graph(&["C", "A", "B"], &[("A", "B"), ("B", "C"), ("C", "A")]);
        assert_eq!(detect_circular_dependencies(&graph), vec![vec!["C", "A", "B"]]);
    }
}

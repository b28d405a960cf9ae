//! Directed graph density.

use crate::graph::DependencyGraph;

/// `edges / (n * (n - 1))`. Self-loops are not part of the possible-edge
/// count, so the ratio is capped at 1.0. Graphs with fewer than two modules
/// have density 0.
pub fn calculate_density(graph: &DependencyGraph) -> f64 {
    let n = graph.node_count();
    if n <= 1 {
        return 0.0;
    }
    let possible = (n as f64) * ((n - 1) as f64);
    (graph.edge_count() as f64 / possible).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_trivial_graphs() {
        assert_eq!(calculate_density(&DependencyGraph::new()), 0.0);
        assert_eq!(calculate_density(&graph(&["a"], &[("a", "a")])), 0.0);
    }

    #[test]
    fn test_complete_three_node_graph() {
        let g = graph(
            &["a", "b", "c"],
            &[("a", "b"), ("a", "c"), ("b", "a"), ("b", "c"), ("c", "a"), ("c", "b")],
        );
        assert_eq!(calculate_density(&g), 1.0);
    }

    #[test]
    fn test_partial_graph() {
        let g = graph(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "a")]);
        assert_eq!(calculate_density(&g), 0.5);
    }

    #[test]
    fn test_complete_graph_with_self_loops_is_capped() {
        let g = graph(&["a", "b"], &[("a", "b"), ("b", "a"), ("a", "a")]);
        assert_eq!(calculate_density(&g), 1.0);
    }
}

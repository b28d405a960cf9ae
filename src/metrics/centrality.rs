//! Degree centrality for the module graph.
//!
//! Degrees are normalized by `max(1, n - 1)`. With self-loops or mutual
//! dependencies on every other module the raw combined degree can exceed
//! `n - 1`; values are capped at 1.0 so every centrality stays in `[0, 1]`.

use crate::core::ModuleMap;
use crate::graph::DependencyGraph;
use serde::Serialize;

/// Per-module degree, in-degree and out-degree centrality.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CentralityMaps {
    pub degree_centrality: ModuleMap<f64>,
    pub in_degree_centrality: ModuleMap<f64>,
    pub out_degree_centrality: ModuleMap<f64>,
}

fn normalized(degree: usize, divisor: f64) -> f64 {
    (degree as f64 / divisor).min(1.0)
}

/// Compute centrality maps in module insertion order.
pub fn calculate_centrality(graph: &DependencyGraph) -> CentralityMaps {
    let divisor = graph.node_count().saturating_sub(1).max(1) as f64;

    let mut maps = CentralityMaps::default();
    for node in graph.nodes() {
        let in_degree = graph.in_degree(&node.id);
        let out_degree = graph.out_degree(&node.id);

        maps.degree_centrality
            .insert(node.id.clone(), normalized(in_degree + out_degree, divisor));
        maps.in_degree_centrality
            .insert(node.id.clone(), normalized(in_degree, divisor));
        maps.out_degree_centrality
            .insert(node.id.clone(), normalized(out_degree, divisor));
    }
    maps
}

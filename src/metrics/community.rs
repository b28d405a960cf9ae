//! Community detection by greedy modularity optimization.
//!
//! A multilevel Louvain procedure over the directed dependency graph:
//!
//! 1. Every module starts in its own community. Modules are visited in
//!    insertion order and moved to the neighboring community with the best
//!    modularity gain until a full pass makes no move.
//! 2. Communities are contracted into super-nodes; parallel edges merge into
//!    weighted edges and intra-community edges become weighted self-loops.
//! 3. Both phases repeat until contraction no longer changes the partition.
//!
//! Modularity uses the directed form
//! `Q = 1/m * sum_c [ L_c - (1/resolution) * out_c * in_c / m ]`, where
//! `L_c` is the edge weight inside community `c` and `out_c`/`in_c` its total
//! out/in weight. Dividing the expected-edges term by the resolution means a
//! higher resolution yields fewer, larger communities and a lower one yields
//! more, smaller communities.
//!
//! Every iteration order is fixed (node insertion order, ascending community
//! ids) and ties keep the earliest candidate, so the same graph always yields
//! the same partition and a bit-identical score.

use crate::core::ModuleMap;
use crate::errors::{AuditError, Result};
use crate::graph::DependencyGraph;
use serde::Serialize;
use std::collections::BTreeMap;

/// Default resolution. Below 1.0 to favor more, smaller communities.
pub const DEFAULT_RESOLUTION: f64 = 0.8;

/// Default cap on local-moving passes per level.
pub const DEFAULT_MAX_PASSES: usize = 100;

/// Gains smaller than this are treated as ties.
const GAIN_EPSILON: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommunityConfig {
    pub resolution: f64,
    pub max_passes: usize,
}

impl CommunityConfig {
    /// Rejects settings the optimizer cannot work with: a resolution that is
    /// not a positive finite number, or zero passes.
    pub fn validate(&self) -> Result<()> {
        if !self.resolution.is_finite() || self.resolution <= 0.0 {
            return Err(AuditError::config(format!(
                "community.resolution must be a positive number, got {}",
                self.resolution
            )));
        }
        if self.max_passes == 0 {
            return Err(AuditError::config("community.max_passes must be at least 1"));
        }
        Ok(())
    }
}

impl Default for CommunityConfig {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            max_passes: DEFAULT_MAX_PASSES,
        }
    }
}

/// Module -> community assignment plus the partition's modularity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommunityPartition {
    /// Community ids are dense and numbered by first appearance in module
    /// insertion order.
    pub partition: ModuleMap<usize>,
    pub modularity: f64,
}

impl CommunityPartition {
    pub fn empty() -> Self {
        Self {
            partition: ModuleMap::new(),
            modularity: 0.0,
        }
    }

    pub fn community_count(&self) -> usize {
        self.partition.values().max().map_or(0, |max| max + 1)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CommunityDetector {
    config: CommunityConfig,
}

/// Weighted directed graph for one aggregation level. Self-loops are kept
/// in both adjacency lists.
#[derive(Debug)]
struct LevelGraph {
    out_edges: Vec<Vec<(usize, f64)>>,
    in_edges: Vec<Vec<(usize, f64)>>,
    out_weight: Vec<f64>,
    in_weight: Vec<f64>,
    total_weight: f64,
}

impl LevelGraph {
    fn from_edges(node_count: usize, edges: impl IntoIterator<Item = (usize, usize, f64)>) -> Self {
        let mut level = LevelGraph {
            out_edges: vec![Vec::new(); node_count],
            in_edges: vec![Vec::new(); node_count],
            out_weight: vec![0.0; node_count],
            in_weight: vec![0.0; node_count],
            total_weight: 0.0,
        };
        for (source, target, weight) in edges {
            level.out_edges[source].push((target, weight));
            level.in_edges[target].push((source, weight));
            level.out_weight[source] += weight;
            level.in_weight[target] += weight;
            level.total_weight += weight;
        }
        level
    }

    fn from_dependency_graph(graph: &DependencyGraph) -> Self {
        let edges: Vec<(usize, usize, f64)> = graph
            .edges()
            .filter_map(|(source, target)| {
                Some((graph.position_of(source)?, graph.position_of(target)?, 1.0))
            })
            .collect();
        Self::from_edges(graph.node_count(), edges)
    }

    fn node_count(&self) -> usize {
        self.out_edges.len()
    }

    /// Contract communities (dense ids `0..count`) into super-nodes.
    fn aggregate(&self, community: &[usize], count: usize) -> Self {
        let mut merged: BTreeMap<(usize, usize), f64> = BTreeMap::new();
        for (source, targets) in self.out_edges.iter().enumerate() {
            for &(target, weight) in targets {
                *merged
                    .entry((community[source], community[target]))
                    .or_insert(0.0) += weight;
            }
        }
        Self::from_edges(
            count,
            merged
                .into_iter()
                .map(|((source, target), weight)| (source, target, weight)),
        )
    }
}

impl CommunityDetector {
    pub fn new(config: CommunityConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn with_resolution(resolution: f64) -> Result<Self> {
        Self::new(CommunityConfig {
            resolution,
            ..CommunityConfig::default()
        })
    }

    pub fn config(&self) -> &CommunityConfig {
        &self.config
    }

    /// Partition the graph into communities.
    pub fn detect(&self, graph: &DependencyGraph) -> CommunityPartition {
        if graph.is_empty() {
            return CommunityPartition::empty();
        }

        let base = LevelGraph::from_dependency_graph(graph);
        let membership = self.optimize(&base);
        let modularity = self.modularity(&base, &membership);

        let partition = graph
            .nodes()
            .zip(membership)
            .map(|(node, community)| (node.id.clone(), community))
            .collect();

        CommunityPartition {
            partition,
            modularity,
        }
    }

    /// Run all levels; returns the dense community id of each base node.
    fn optimize(&self, base: &LevelGraph) -> Vec<usize> {
        let mut membership: Vec<usize> = (0..base.node_count()).collect();
        if base.total_weight <= 0.0 {
            return membership;
        }

        let mut aggregated: Option<LevelGraph> = None;
        loop {
            let level = aggregated.as_ref().unwrap_or(base);
            let (community, moved) = self.local_moving(level);
            let (dense, count) = renumber(&community);
            if !moved || count == level.node_count() {
                break;
            }

            for slot in membership.iter_mut() {
                *slot = dense[*slot];
            }
            let contracted = level.aggregate(&dense, count);
            aggregated = Some(contracted);
        }

        renumber(&membership).0
    }

    /// Local moving phase. Returns the (sparse) community of each node and
    /// whether any node changed community.
    fn local_moving(&self, level: &LevelGraph) -> (Vec<usize>, bool) {
        let n = level.node_count();
        let m = level.total_weight;
        let penalty = 1.0 / self.config.resolution;

        let mut community: Vec<usize> = (0..n).collect();
        let mut sigma_out = level.out_weight.clone();
        let mut sigma_in = level.in_weight.clone();
        let mut moved_any = false;

        for _ in 0..self.config.max_passes.max(1) {
            let mut moves = 0usize;

            for node in 0..n {
                let current = community[node];
                let k_out = level.out_weight[node];
                let k_in = level.in_weight[node];

                let mut links: BTreeMap<usize, f64> = BTreeMap::new();
                let neighbors = level.out_edges[node].iter().chain(&level.in_edges[node]);
                for &(other, weight) in neighbors {
                    if other != node {
                        *links.entry(community[other]).or_insert(0.0) += weight;
                    }
                }

                sigma_out[current] -= k_out;
                sigma_in[current] -= k_in;

                let gain = |target: usize, link: f64| {
                    link - penalty * (k_out * sigma_in[target] + k_in * sigma_out[target]) / m
                };

                let mut best = current;
                let mut best_gain = gain(current, links.get(&current).copied().unwrap_or(0.0));
                for (&candidate, &link) in &links {
                    if candidate == current {
                        continue;
                    }
                    let candidate_gain = gain(candidate, link);
                    if candidate_gain > best_gain + GAIN_EPSILON {
                        best = candidate;
                        best_gain = candidate_gain;
                    }
                }

                sigma_out[best] += k_out;
                sigma_in[best] += k_in;
                if best != current {
                    community[node] = best;
                    moves += 1;
                }
            }

            if moves == 0 {
                break;
            }
            moved_any = true;
        }

        (community, moved_any)
    }

    fn modularity(&self, level: &LevelGraph, community: &[usize]) -> f64 {
        let m = level.total_weight;
        if m <= 0.0 {
            return 0.0;
        }
        let penalty = 1.0 / self.config.resolution;
        let count = community.iter().max().map_or(0, |max| max + 1);

        let mut internal = vec![0.0; count];
        let mut out_total = vec![0.0; count];
        let mut in_total = vec![0.0; count];
        for (source, targets) in level.out_edges.iter().enumerate() {
            out_total[community[source]] += level.out_weight[source];
            in_total[community[source]] += level.in_weight[source];
            for &(target, weight) in targets {
                if community[source] == community[target] {
                    internal[community[source]] += weight;
                }
            }
        }

        (0..count)
            .map(|c| internal[c] - penalty * out_total[c] * in_total[c] / m)
            .sum::<f64>()
            / m
    }
}

/// Map community labels to dense ids in order of first appearance.
fn renumber(community: &[usize]) -> (Vec<usize>, usize) {
    let mut mapping: BTreeMap<usize, usize> = BTreeMap::new();
    let dense = community
        .iter()
        .map(|label| {
            let next = mapping.len();
            *mapping.entry(*label).or_insert(next)
        })
        .collect();
    (dense, mapping.len())
}

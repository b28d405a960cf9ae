//! Result bundle produced by one audit run.

use crate::core::{CircularGroup, CouplingRecord, DependencyTree, ModuleId, ModuleMap};
use crate::graph::DependencyGraph;
use crate::metrics::{CentralityMaps, ModularityRating};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Outcome of an audit. `Empty` serializes as `{}` so consumers can treat a
/// missing `tree` as "nothing to render".
#[derive(Debug, Clone, Default)]
pub enum AuditReport {
    #[default]
    Empty,
    Complete(Box<ModularityReport>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModularityReport {
    pub tree: DependencyTree,
    pub graph: DependencyGraph,
    pub modularity: f64,
    pub communities: ModuleMap<usize>,
    pub density: f64,
    #[serde(flatten)]
    pub centrality: CentralityMaps,
    pub coupling_by_module: ModuleMap<CouplingRecord>,
    pub circular_groups: Vec<CircularGroup>,
    pub warnings: Vec<String>,
    pub orphan_modules: Vec<ModuleId>,
    pub leaf_modules: Vec<ModuleId>,
}

impl AuditReport {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn as_complete(&self) -> Option<&ModularityReport> {
        match self {
            Self::Complete(report) => Some(report),
            Self::Empty => None,
        }
    }

    pub fn into_complete(self) -> Option<ModularityReport> {
        match self {
            Self::Complete(report) => Some(*report),
            Self::Empty => None,
        }
    }
}

impl From<ModularityReport> for AuditReport {
    fn from(report: ModularityReport) -> Self {
        Self::Complete(Box::new(report))
    }
}

impl Serialize for AuditReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Empty => serializer.serialize_map(Some(0))?.end(),
            Self::Complete(report) => report.serialize(serializer),
        }
    }
}

impl ModularityReport {
    pub fn module_count(&self) -> usize {
        self.tree.len()
    }

    pub fn community_count(&self) -> usize {
        self.communities.values().max().map_or(0, |max| max + 1)
    }

    pub fn modularity_rating(&self) -> ModularityRating {
        ModularityRating::classify(self.modularity)
    }

    /// Members of each community, indexed by community id.
    pub fn community_members(&self) -> Vec<Vec<&ModuleId>> {
        let mut groups = vec![Vec::new(); self.community_count()];
        for (module, &community) in &self.communities {
            groups[community].push(module);
        }
        groups
    }

    /// Modules ordered by total coupling, highest first. Ties keep listing
    /// order.
    pub fn most_coupled(&self, limit: usize) -> Vec<(&ModuleId, &CouplingRecord)> {
        let mut ranked: Vec<_> = self.coupling_by_module.iter().collect();
        ranked.sort_by(|a, b| b.1.total_coupling().cmp(&a.1.total_coupling()));
        ranked.truncate(limit);
        ranked
    }
}

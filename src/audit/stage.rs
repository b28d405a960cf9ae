//! Per-run stage machine.
//!
//! `Start -> TreeBuilt -> GraphBuilt -> MetricsComputed -> Done`, with
//! `Empty` reachable from every non-terminal stage and absorbing.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditStage {
    /// Waiting for extractor output
    Start,
    /// Adjacency listing normalized into node/edge lists
    TreeBuilt,
    /// Dependency graph constructed
    GraphBuilt,
    /// Coupling, community, centrality and density computed
    MetricsComputed,
    /// Report assembled
    Done,
    /// Nothing to report; the run yields `{}`
    Empty,
}

impl AuditStage {
    /// Stage reached when the current stage succeeds.
    pub fn next(self) -> Self {
        match self {
            Self::Start => Self::TreeBuilt,
            Self::TreeBuilt => Self::GraphBuilt,
            Self::GraphBuilt => Self::MetricsComputed,
            Self::MetricsComputed => Self::Done,
            Self::Done => Self::Done,
            Self::Empty => Self::Empty,
        }
    }

    /// Stage reached when the current stage fails or finds no data.
    pub fn fail(self) -> Self {
        match self {
            Self::Done => Self::Done,
            _ => Self::Empty,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Empty)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::TreeBuilt => "tree_built",
            Self::GraphBuilt => "graph_built",
            Self::MetricsComputed => "metrics_computed",
            Self::Done => "done",
            Self::Empty => "empty",
        }
    }
}

impl std::fmt::Display for AuditStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_sequence() {
        let mut stage = AuditStage::Start;
        let mut seen = vec![stage];
        while !stage.is_terminal() {
            stage = stage.next();
            seen.push(stage);
        }
        assert_eq!(
            seen,
            vec![
                AuditStage::Start,
                AuditStage::TreeBuilt,
                AuditStage::GraphBuilt,
                AuditStage::MetricsComputed,
                AuditStage::Done,
            ]
        );
    }

    #[test]
    fn test_empty_is_absorbing() {
        assert_eq!(AuditStage::GraphBuilt.fail(), AuditStage::Empty);
        assert_eq!(AuditStage::Empty.next(), AuditStage::Empty);
        assert_eq!(AuditStage::Empty.fail(), AuditStage::Empty);
        assert!(AuditStage::Empty.is_terminal());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(AuditStage::MetricsComputed.to_string(), "metrics_computed");
    }
}

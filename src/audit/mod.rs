//! Modularity audit orchestration.
//!
//! One [`ModularityAudit::run`] call drives a single run through
//! [`AuditStage`]s: extract, normalize, build the graph, compute metrics,
//! assemble the report. Missing input, a stage error or a panic inside a
//! stage ends the run in `Empty`; nothing escapes `run`.

pub mod report;
pub mod stage;

pub use report::{AuditReport, ModularityReport};
pub use stage::AuditStage;

use crate::config::ModmapConfig;
use crate::core::{CouplingRecord, ModuleId, ModuleMap, Position};
use crate::errors::{AuditError, Result};
use crate::extractor::{DependencyExtractor, ExtractedDependencies};
use crate::graph::{
    normalize_tree, positions_by_title, DependencyGraph, GraphBuild, GraphvizSvgLayout,
    LayoutSource, NormalizedTree,
};
use crate::metrics::{
    calculate_centrality, calculate_coupling, calculate_density, CentralityMaps,
    CommunityDetector, CommunityPartition,
};
use crate::observability::{AuditEvent, AuditObserver, TracingObserver};
use std::any::Any;
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Runs modularity audits with a fixed configuration.
pub struct ModularityAudit {
    config: ModmapConfig,
    observer: Arc<dyn AuditObserver>,
    layout_source: Box<dyn LayoutSource>,
}

struct GraphMetrics {
    communities: CommunityPartition,
    centrality: CentralityMaps,
    density: f64,
}

impl Default for ModularityAudit {
    fn default() -> Self {
        Self::new(ModmapConfig::default())
    }
}

impl ModularityAudit {
    pub fn new(config: ModmapConfig) -> Self {
        Self {
            config,
            observer: Arc::new(TracingObserver),
            layout_source: Box::new(GraphvizSvgLayout),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn AuditObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_layout_source(mut self, layout_source: Box<dyn LayoutSource>) -> Self {
        self.layout_source = layout_source;
        self
    }

    pub fn config(&self) -> &ModmapConfig {
        &self.config
    }

    /// Audit whatever `extractor` yields. Never fails: anything that prevents
    /// a complete report produces [`AuditReport::Empty`].
    pub fn run(&self, extractor: &dyn DependencyExtractor) -> AuditReport {
        let mut stage = AuditStage::Start;
        self.enter(stage);

        let extracted = match self.guarded(stage, || extractor.extract()) {
            Ok(extracted) => extracted,
            Err(_) => return self.empty(stage, "dependency extraction failed"),
        };
        if extracted.adjacency.is_empty() {
            return self.empty(stage, "no modules discovered");
        }

        let normalized = normalize_tree(&extracted.adjacency);
        stage = self.advance(stage);

        let positions = match self.guarded(stage, || self.resolve_positions(&extracted)) {
            Ok(positions) => positions,
            Err(_) => return self.empty(stage, "layout diagram required but unavailable"),
        };

        let (build, coupling) = match self.guarded(stage, || {
            self.build_graph(&normalized, &positions, &extracted)
        }) {
            Ok(built) => built,
            Err(_) => return self.empty(stage, "graph construction failed"),
        };
        for (source, target) in build.dropped_edges {
            self.observer
                .on_event(&AuditEvent::EdgeDropped { source, target });
        }
        let graph = build.graph;
        stage = self.advance(stage);

        let metrics = match self.guarded(stage, || self.compute_metrics(&graph)) {
            Ok(metrics) => metrics,
            Err(_) => return self.empty(stage, "metric computation failed"),
        };
        stage = self.advance(stage);

        let report = assemble(extracted, graph, coupling, metrics);
        stage = self.advance(stage);
        debug_assert_eq!(stage, AuditStage::Done);

        self.observer.on_event(&AuditEvent::RunCompleted {
            modules: report.graph.node_count(),
            edges: report.graph.edge_count(),
            communities: report.community_count(),
        });
        report.into()
    }

    fn enter(&self, stage: AuditStage) {
        self.observer.on_event(&AuditEvent::StageEntered { stage });
    }

    fn advance(&self, stage: AuditStage) -> AuditStage {
        let next = stage.next();
        if !next.is_terminal() {
            self.enter(next);
        }
        next
    }

    fn empty(&self, stage: AuditStage, reason: &str) -> AuditReport {
        let outcome = stage.fail();
        debug_assert_eq!(outcome, AuditStage::Empty);
        self.observer.on_event(&AuditEvent::RunEmpty {
            stage,
            outcome,
            reason: reason.to_string(),
        });
        AuditReport::Empty
    }

    /// Run one stage body, turning a panic into `StagePanicked` and reporting
    /// any failure through the observer.
    fn guarded<T>(&self, stage: AuditStage, body: impl FnOnce() -> Result<T>) -> Result<T> {
        let outcome = catch_unwind(AssertUnwindSafe(body)).unwrap_or_else(|payload| {
            Err(AuditError::StagePanicked {
                stage: stage.as_str(),
                message: panic_message(payload.as_ref()),
            })
        });
        if let Err(error) = &outcome {
            self.observer.on_event(&AuditEvent::StageFailed {
                stage,
                error: error.to_string(),
            });
        }
        outcome
    }

    /// Node coordinates from the diagram. An unusable diagram degrades to no
    /// coordinates unless the layout is required.
    fn resolve_positions(
        &self,
        extracted: &ExtractedDependencies,
    ) -> Result<HashMap<ModuleId, Position>> {
        let layout = match extracted.diagram.as_deref() {
            None => Err("no layout diagram supplied"),
            Some(diagram) => self
                .layout_source
                .resolve(diagram)
                .ok_or("layout diagram could not be parsed"),
        };

        match layout {
            Ok(layout) => Ok(positions_by_title(&layout)),
            Err(reason) if self.config.layout.required => Err(AuditError::layout(reason)),
            Err(reason) => {
                self.observer.on_event(&AuditEvent::LayoutUnavailable {
                    reason: reason.to_string(),
                });
                Ok(HashMap::new())
            }
        }
    }

    /// Graph construction and coupling have no data dependency on each other.
    fn build_graph(
        &self,
        normalized: &NormalizedTree,
        positions: &HashMap<ModuleId, Position>,
        extracted: &ExtractedDependencies,
    ) -> Result<(GraphBuild, ModuleMap<CouplingRecord>)> {
        let build = || DependencyGraph::from_normalized(normalized, positions);
        let coupling = || calculate_coupling(&extracted.adjacency);
        let (build, coupling) = if self.config.execution.parallel {
            rayon::join(build, coupling)
        } else {
            (build(), coupling())
        };

        if build.graph.node_count() != normalized.nodes.len() {
            return Err(AuditError::graph(format!(
                "expected {} modules, graph holds {}",
                normalized.nodes.len(),
                build.graph.node_count()
            )));
        }
        Ok((build, coupling))
    }

    fn compute_metrics(&self, graph: &DependencyGraph) -> Result<GraphMetrics> {
        let detector = CommunityDetector::new(self.config.community.to_community_config())?;
        let communities = || detector.detect(graph);
        let centrality = || calculate_centrality(graph);
        let density = || calculate_density(graph);

        let (communities, (centrality, density)) = if self.config.execution.parallel {
            rayon::join(communities, || rayon::join(centrality, density))
        } else {
            (communities(), (centrality(), density()))
        };

        if !communities.modularity.is_finite() {
            return Err(AuditError::metric(
                "modularity",
                format!("non-finite score {}", communities.modularity),
            ));
        }
        if !density.is_finite() {
            return Err(AuditError::metric("density", format!("non-finite value {density}")));
        }

        Ok(GraphMetrics {
            communities,
            centrality,
            density,
        })
    }
}

fn assemble(
    extracted: ExtractedDependencies,
    graph: DependencyGraph,
    coupling_by_module: ModuleMap<CouplingRecord>,
    metrics: GraphMetrics,
) -> ModularityReport {
    ModularityReport {
        tree: extracted.adjacency,
        graph,
        modularity: metrics.communities.modularity,
        communities: metrics.communities.partition,
        density: metrics.density,
        centrality: metrics.centrality,
        coupling_by_module,
        circular_groups: extracted.circular_groups,
        warnings: extracted.warnings,
        orphan_modules: extracted.orphan_modules,
        leaf_modules: extracted.leaf_modules,
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

// Export modules for library usage
pub mod audit;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod errors;
pub mod extractor;
pub mod graph;
pub mod io;
pub mod metrics;
pub mod observability;

// Re-export commonly used types
pub use crate::core::{
    CircularGroup, CouplingRecord, DependencyTree, ModuleId, ModuleMap, Position,
};

pub use crate::audit::{AuditReport, AuditStage, ModularityAudit, ModularityReport};

pub use crate::errors::{AuditError, Result};

pub use crate::extractor::{
    DependencyExtractor, ExtractedDependencies, FileExtractor, StaticExtractor,
};

pub use crate::graph::{
    detect_circular_dependencies, normalize_tree, DependencyGraph, GraphvizSvgLayout,
    LayoutSource, NodeLayout,
};

pub use crate::metrics::{
    calculate_centrality, calculate_coupling, calculate_density, CentralityMaps,
    CommunityConfig, CommunityDetector, CommunityPartition,
};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};

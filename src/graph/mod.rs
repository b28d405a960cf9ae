//! Dependency graph construction: normalization, the graph model, layout
//! recovery and cycle detection.

pub mod cycles;
pub mod layout;
pub mod model;
pub mod normalize;

pub use cycles::detect_circular_dependencies;
pub use layout::{positions_by_title, GraphvizSvgLayout, LayoutSource, NodeLayout};
pub use model::{DependencyGraph, GraphBuild, ModuleNode};
pub use normalize::{normalize_tree, NormalizedTree};

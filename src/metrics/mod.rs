//! Metrics computed over the dependency listing and graph.
//!
//! Coupling reads the raw adjacency listing. Community, centrality and
//! density read a finished `DependencyGraph` and never mutate it, so they
//! can run concurrently.

pub mod centrality;
pub mod community;
pub mod coupling;
pub mod density;
pub mod status;

pub use centrality::{calculate_centrality, CentralityMaps};
pub use community::{
    CommunityConfig, CommunityDetector, CommunityPartition, DEFAULT_MAX_PASSES,
    DEFAULT_RESOLUTION,
};
pub use coupling::{calculate_coupling, instability_index};
pub use density::calculate_density;
pub use status::{CouplingLoad, ModularityRating, StabilityBand};

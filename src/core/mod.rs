pub mod module_map;
pub mod types;

pub use module_map::ModuleMap;
pub use types::{CircularGroup, CouplingRecord, DependencyTree, ModuleId, Position};

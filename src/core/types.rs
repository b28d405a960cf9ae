//! Shared data types for one analysis run.

use serde::{Deserialize, Serialize};

use super::module_map::ModuleMap;

/// Normalized, project-relative module path (for example `src/api/client.js`).
pub type ModuleId = String;

/// Raw adjacency listing: module -> modules it directly imports, in
/// declaration order.
pub type DependencyTree = ModuleMap<Vec<ModuleId>>;

/// Ordered cycle of modules; each depends on the next and the last depends
/// back on the first. The first module is not repeated at the end.
pub type CircularGroup = Vec<ModuleId>;

/// Display coordinates recovered from a layout diagram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Coupling figures for a single module.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouplingRecord {
    /// Distinct modules this module imports.
    pub efferent_coupling: usize,
    /// Distinct modules importing this module (a self-import counts).
    pub afferent_coupling: usize,
    /// `Ce / (Ce + Ca)`, rounded to two decimal places, `0` when isolated.
    pub instability_index: f64,
}

impl CouplingRecord {
    /// Instability formatted with exactly two decimals.
    pub fn instability_display(&self) -> String {
        format!("{:.2}", self.instability_index)
    }

    pub fn total_coupling(&self) -> usize {
        self.efferent_coupling + self.afferent_coupling
    }
}

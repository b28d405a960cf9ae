//! Afferent/efferent coupling and instability per module.
//!
//! Works directly on the adjacency listing; no graph is required. Dependents
//! are indexed in a single pass so the whole computation is O(V + E).

use crate::core::{CouplingRecord, DependencyTree, ModuleMap};
use std::collections::{HashMap, HashSet};

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `Ce / (Ce + Ca)`, rounded to two decimals; `0` for an isolated module.
pub fn instability_index(efferent: usize, afferent: usize) -> f64 {
    let total = efferent + afferent;
    if total == 0 {
        return 0.0;
    }
    round2(efferent as f64 / total as f64)
}

/// Compute coupling records for every module in the listing, in listing
/// order. A module importing itself counts toward both its efferent and
/// afferent coupling.
pub fn calculate_coupling(tree: &DependencyTree) -> ModuleMap<CouplingRecord> {
    let distinct_deps: Vec<(&String, HashSet<&str>)> = tree
        .iter()
        .map(|(module, deps)| (module, deps.iter().map(String::as_str).collect()))
        .collect();

    let mut afferent: HashMap<&str, usize> = HashMap::new();
    for (_, deps) in &distinct_deps {
        for dep in deps {
            *afferent.entry(*dep).or_default() += 1;
        }
    }

    distinct_deps
        .iter()
        .map(|(module, deps)| {
            let efferent_coupling = deps.len();
            let afferent_coupling = afferent.get(module.as_str()).copied().unwrap_or(0);
            (
                (*module).clone(),
                CouplingRecord {
                    efferent_coupling,
                    afferent_coupling,
                    instability_index: instability_index(efferent_coupling, afferent_coupling),
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(entries: &[(&str, &[&str])]) -> DependencyTree {
        entries
            .iter()
            .map(|(module, deps)| {
                (
                    module.to_string(),
                    deps.iter().map(|d| d.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_hub_module_is_stable() {
        let coupling = calculate_coupling(&tree(&[
            ("H", &[]),
            ("X", &["H"]),
            ("Y", &["H"]),
            ("Z", &["H"]),
        ]));

        let hub = coupling.get("H").unwrap();
        assert_eq!(hub.afferent_coupling, 3);
        assert_eq!(hub.efferent_coupling, 0);
        assert_eq!(hub.instability_display(), "0.00");

        for leaf in ["X", "Y", "Z"] {
            let record = coupling.get(leaf).unwrap();
            assert_eq!(record.efferent_coupling, 1);
            assert_eq!(record.afferent_coupling, 0);
            assert_eq!(record.instability_display(), "1.00");
        }
    }

    #[test]
    fn test_cycle_is_balanced() {
        let coupling = calculate_coupling(&tree(&[("A", &["B"]), ("B", &["C"]), ("C", &["A"])]));
        for record in coupling.values() {
            assert_eq!(record.efferent_coupling, 1);
            assert_eq!(record.afferent_coupling, 1);
            assert_eq!(record.instability_index, 0.5);
        }
    }

    #[test]
    fn test_duplicate_dependencies_count_once() {
        let coupling = calculate_coupling(&tree(&[("A", &["B", "B"]), ("B", &[])]));
        assert_eq!(coupling.get("A").unwrap().efferent_coupling, 1);
        assert_eq!(coupling.get("B").unwrap().afferent_coupling, 1);
    }

    #[test]
    fn test_self_dependency_counts_both_ways() {
        let coupling = calculate_coupling(&tree(&[("A", &["A", "B"]), ("B", &[])]));
        let a = coupling.get("A").unwrap();
        assert_eq!(a.efferent_coupling, 2);
        assert_eq!(a.afferent_coupling, 1);
        assert_eq!(a.instability_index, 0.67);
    }

    #[test]
    fn test_isolated_module_has_zero_instability() {
        let coupling = calculate_coupling(&tree(&[("lonely", &[])]));
        assert_eq!(coupling.get("lonely").unwrap().instability_index, 0.0);
    }

    #[test]
    fn test_instability_rounding() {
        assert_eq!(instability_index(1, 2), 0.33);
        assert_eq!(instability_index(2, 1), 0.67);
        assert_eq!(instability_index(0, 0), 0.0);
    }

    #[test]
    fn test_preserves_listing_order() {
        let coupling = calculate_coupling(&tree(&[("z", &[]), ("a", &["z"])]));
        let keys: Vec<&str> = coupling.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a"]);
    }
}

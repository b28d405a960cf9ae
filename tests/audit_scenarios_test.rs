//! End-to-end audit runs over small, hand-checked dependency listings.

use indoc::indoc;
use modmap::config::ModmapConfig;
use modmap::observability::{AuditEvent, RecordingObserver};
use modmap::{
    AuditReport, DependencyTree, ExtractedDependencies, FileExtractor, ModularityAudit,
    ModularityReport, StaticExtractor,
};
use pretty_assertions::assert_eq;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

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

fn audit(tree: DependencyTree) -> ModularityReport {
    ModularityAudit::default()
        .run(&StaticExtractor::from_tree(tree))
        .into_complete()
        .expect("audit should produce a report")
}

#[test]
fn test_hub_module() {
    let report = audit(tree(&[
        ("H", &[]),
        ("X", &["H"]),
        ("Y", &["H"]),
        ("Z", &["H"]),
    ]));

    let hub = report.coupling_by_module.get("H").unwrap();
    assert_eq!((hub.afferent_coupling, hub.efferent_coupling), (3, 0));
    assert_eq!(hub.instability_display(), "0.00");
    for leaf in ["X", "Y", "Z"] {
        let record = report.coupling_by_module.get(leaf).unwrap();
        assert_eq!((record.efferent_coupling, record.afferent_coupling), (1, 0));
        assert_eq!(record.instability_display(), "1.00");
    }
    assert!(report.circular_groups.is_empty());
    assert_eq!(report.centrality.in_degree_centrality.get("H"), Some(&1.0));
}

#[test]
fn test_three_cycle() {
    let report = audit(tree(&[("A", &["B"]), ("B", &["C"]), ("C", &["A"])]));

    assert_eq!(report.circular_groups, vec![vec!["A", "B", "C"]]);
    for record in report.coupling_by_module.values() {
        assert_eq!((record.efferent_coupling, record.afferent_coupling), (1, 1));
        assert_eq!(record.instability_display(), "0.50");
    }
    assert_eq!(report.density, 0.5);
}

#[test]
fn test_empty_listing_serializes_as_empty_object() {
    let report = ModularityAudit::default().run(&StaticExtractor::from_tree(DependencyTree::new()));

    assert!(report.is_empty());
    assert_eq!(serde_json::to_string(&report).unwrap(), "{}");
}

#[test]
fn test_disconnected_pairs_form_separate_communities() {
    let report = audit(tree(&[("A", &["B"]), ("B", &[]), ("C", &["D"]), ("D", &[])]));

    let community = |module: &str| *report.communities.get(module).unwrap();
    assert_eq!(community("A"), community("B"));
    assert_eq!(community("C"), community("D"));
    assert_ne!(community("A"), community("C"));
    assert!(report.modularity > 0.0);
}

#[test]
fn test_complete_digraph_has_full_density() {
    let report = audit(tree(&[("A", &["B", "C"]), ("B", &["A", "C"]), ("C", &["A", "B"])]));
    assert_eq!(report.density, 1.0);
}

#[test]
fn test_single_module_has_zero_metrics() {
    let report = audit(tree(&[("solo", &[])]));
    assert_eq!(report.density, 0.0);
    assert_eq!(report.centrality.degree_centrality.get("solo"), Some(&0.0));
    assert_eq!(report.coupling_by_module.get("solo").unwrap().instability_index, 0.0);
}

#[test]
fn test_pass_through_fields_are_not_recomputed() {
    let mut extracted = ExtractedDependencies::from_tree(tree(&[("a", &["b"]), ("b", &[])]));
    extracted.circular_groups = vec![vec!["from-extractor".to_string()]];
    extracted.warnings = vec!["upstream warning".to_string()];

    let report = ModularityAudit::default()
        .run(&StaticExtractor::new(extracted))
        .into_complete()
        .unwrap();
    assert_eq!(report.circular_groups, vec![vec!["from-extractor"]]);
    assert_eq!(report.warnings, vec!["upstream warning"]);
}

#[test]
fn test_observer_sees_run_lifecycle() {
    let observer = Arc::new(RecordingObserver::new());
    let audit = ModularityAudit::default().with_observer(observer.clone());

    audit.run(&StaticExtractor::from_tree(tree(&[("a", &["b", "ext"]), ("b", &[])])));

    let events = observer.events();
    assert!(matches!(events.first(), Some(AuditEvent::StageEntered { .. })));
    assert!(matches!(
        events.last(),
        Some(AuditEvent::RunCompleted {
            modules: 2,
            edges: 1,
            ..
        })
    ));
    assert!(events.contains(&AuditEvent::EdgeDropped {
        source: "a".into(),
        target: "ext".into()
    }));
}

#[test]
fn test_file_extractor_with_diagram() {
    let dir = TempDir::new().unwrap();
    let tree_path = dir.path().join("deps.json");
    let diagram_path = dir.path().join("graph.svg");
    fs::write(
        &tree_path,
        r#"{"src/app.js": ["src/util.js", "react"], "src/util.js": []}"#,
    )
    .unwrap();
    fs::write(
        &diagram_path,
        indoc! {r#"
            <svg xmlns="http://www.w3.org/2000/svg">
            <g id="graph0" class="graph">
            <g id="node1" class="node">
            <title>src/app.js</title>
            <ellipse cx="10" cy="-20" rx="27" ry="18"/>
            </g>
            <g id="node2" class="node">
            <title>src/util.js</title>
            <ellipse cx="30" cy="-40" rx="27" ry="18"/>
            </g>
            </g>
            </svg>
        "#},
    )
    .unwrap();

    let extractor = FileExtractor::new(&tree_path).with_diagram(&diagram_path);
    let report = ModularityAudit::default().run(&extractor);
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["graph"]["nodes"][0]["id"], "src/app.js");
    assert_eq!(json["graph"]["nodes"][0]["x"], 10.0);
    assert_eq!(json["graph"]["nodes"][1]["y"], -40.0);
    assert_eq!(json["graph"]["edges"][0][1], "src/util.js");
    assert_eq!(
        json["warnings"][0],
        "Skipped react (imported by src/app.js, not in analyzed set)"
    );
    assert_eq!(json["orphanModules"][0], "src/app.js");
    assert_eq!(json["leafModules"][0], "src/util.js");
}

#[test]
fn test_unreadable_tree_yields_empty_report() {
    let dir = TempDir::new().unwrap();
    let report = ModularityAudit::new(ModmapConfig::default())
        .run(&FileExtractor::new(dir.path().join("missing.json")));
    assert!(matches!(report, AuditReport::Empty));
}

#[test]
fn test_resolution_controls_granularity() {
    // two triangles joined by one edge
    let listing = tree(&[
        ("a", &["b"]),
        ("b", &["c"]),
        ("c", &["a", "d"]),
        ("d", &["e"]),
        ("e", &["f"]),
        ("f", &["d"]),
    ]);

    let mut coarse = ModmapConfig::default();
    coarse.community.resolution = 100.0;
    let mut fine = ModmapConfig::default();
    fine.community.resolution = 0.8;

    let coarse = ModularityAudit::new(coarse)
        .run(&StaticExtractor::from_tree(listing.clone()))
        .into_complete()
        .unwrap();
    let fine = ModularityAudit::new(fine)
        .run(&StaticExtractor::from_tree(listing))
        .into_complete()
        .unwrap();

    assert!(coarse.community_count() <= fine.community_count());
    assert_eq!(fine.community_count(), 2);
}

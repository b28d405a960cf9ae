//! Benchmark for community detection on synthetic clustered graphs.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use modmap::graph::normalize_tree;
use modmap::{CommunityDetector, DependencyGraph, DependencyTree, ModularityAudit, StaticExtractor};
use std::collections::HashMap;
use std::hint::black_box;

/// `clusters` rings of `size` modules; each ring also imports the next ring.
fn clustered_tree(clusters: usize, size: usize) -> DependencyTree {
    let name = |cluster: usize, member: usize| format!("c{cluster}/m{member}");
    (0..clusters)
        .flat_map(|cluster| {
            (0..size).map(move |member| {
                let mut deps = vec![name(cluster, (member + 1) % size)];
                if member == 0 {
                    deps.push(name((cluster + 1) % clusters, 0));
                }
                (name(cluster, member), deps)
            })
        })
        .collect()
}

fn benchmark_community_detection(c: &mut Criterion) {
    let mut group = c.benchmark_group("community_detection");
    group.sample_size(20);

    for clusters in [10, 50, 200] {
        let tree = clustered_tree(clusters, 8);
        let graph = DependencyGraph::from_normalized(&normalize_tree(&tree), &HashMap::new()).graph;
        let detector = CommunityDetector::default();

        group.bench_with_input(BenchmarkId::from_parameter(clusters * 8), &graph, |b, graph| {
            b.iter(|| black_box(detector.detect(black_box(graph))));
        });
    }
    group.finish();
}

fn benchmark_full_audit(c: &mut Criterion) {
    let extractor = StaticExtractor::from_tree(clustered_tree(50, 8));
    let audit = ModularityAudit::default();

    c.bench_function("full_audit_400_modules", |b| {
        b.iter(|| black_box(audit.run(black_box(&extractor))));
    });
}

criterion_group!(benches, benchmark_community_detection, benchmark_full_audit);
criterion_main!(benches);

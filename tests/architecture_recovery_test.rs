//! End-to-end tests for the call graph → coupling → dendrogram → modules
//! pipeline through the public library API.

use archmap::builders::{perform_architecture_analysis, AnalysisStage, ArchitectureOptions};
use archmap::call_graph::{CallGraph, ClassNameExtractor};
use archmap::clustering::{DendrogramNode, HierarchicalClustering, ModuleDiagnostic};
use archmap::coupling::{build_coupling_graph, CouplingGraphBuilder};
use archmap::errors::Error;
use indoc::indoc;
use pretty_assertions::assert_eq;
use std::collections::BTreeSet;

/// Ten cross-class relations: A→B five times, B→A three times, A→C twice,
/// plus one call inside B that must not count.
const SCENARIO: &str = indoc! {r#"
    {
        "A.a1": ["B.b1", "B.b2", "B.b3", "C.c1"],
        "A.a2": ["B.b1", "B.b2", "C.c2"],
        "B.b1": ["A.a1", "A.a2", "A.a3"],
        "B.b2": ["B.b3"]
    }
"#};

fn scenario_graph() -> CallGraph {
    CallGraph::from_json_str(SCENARIO).unwrap()
}

fn set(classes: &[&str]) -> BTreeSet<String> {
    classes.iter().map(|c| c.to_string()).collect()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {} but got {}",
        expected,
        actual
    );
}

#[test]
fn test_coupling_weights_from_call_graph() {
    let coupling = build_coupling_graph(&scenario_graph());

    assert_eq!(coupling.edge_count(), 3);
    assert_close(coupling.weight("A", "B").unwrap(), 0.5);
    assert_close(coupling.weight("B", "A").unwrap(), 0.3);
    assert_close(coupling.weight("A", "C").unwrap(), 0.2);
    assert_eq!(coupling.weight("B", "B"), None);
    assert_eq!(coupling.weight("C", "A"), None);
    assert_close(coupling.total_weight(), 1.0);
}

#[test]
fn test_dendrogram_merges_strongest_pair_first() {
    let clustering = HierarchicalClustering::new(build_coupling_graph(&scenario_graph()));
    let dendrogram = clustering.cluster().unwrap();

    assert_eq!(dendrogram.size(), 3);
    assert_eq!(dendrogram.classes(), &set(&["A", "B", "C"]));

    let root = dendrogram.root_node().as_merged().unwrap();
    assert_close(root.coupling(), 0.2);
    assert_eq!(dendrogram.node(root.left()).classes(), &set(&["A", "B"]));
    assert!(matches!(
        dendrogram.node(root.right()),
        DendrogramNode::Leaf(leaf) if leaf.class_name() == "C"
    ));

    let inner = dendrogram.node(root.left()).as_merged().unwrap();
    assert_close(inner.coupling(), 0.8);
}

#[test]
fn test_modules_across_thresholds() {
    let clustering = HierarchicalClustering::new(build_coupling_graph(&scenario_graph()));
    let dendrogram = clustering.cluster().unwrap();

    // Root cohesion is (0.8 + 0.2 + 0) / 3
    let loose = clustering.identify_modules(&dendrogram, 0.3).unwrap();
    assert_eq!(loose.len(), 1);
    assert_eq!(loose.modules[0].classes(), &set(&["A", "B", "C"]));
    assert_close(loose.modules[0].cohesion().unwrap(), 1.0 / 3.0);
    assert_eq!(loose.diagnostic, None);

    let strict = clustering.identify_modules(&dendrogram, 0.5).unwrap();
    let found: Vec<_> = strict.modules.iter().map(|m| m.classes().clone()).collect();
    assert_eq!(found, vec![set(&["A", "B"]), set(&["C"])]);

    let everything_apart = clustering.identify_modules(&dendrogram, f64::MAX).unwrap();
    let found: Vec<_> = everything_apart
        .modules
        .iter()
        .map(|m| m.classes().clone())
        .collect();
    assert_eq!(found, vec![set(&["C"]), set(&["A"]), set(&["B"])]);
    assert_eq!(
        everything_apart.diagnostic,
        Some(ModuleDiagnostic::TooManyModules {
            module_count: 3,
            limit: 1
        })
    );
}

#[test]
fn test_custom_separator() {
    let graph = CallGraph::from_iter([
        ("net::Socket::open", "io::Buffer::alloc"),
        ("net::Socket::send", "io::Buffer::write"),
        ("io::Buffer::write", "net::Socket::flush"),
    ]);

    // Class names are everything before the first separator occurrence
    let builder = CouplingGraphBuilder::new(ClassNameExtractor::new("::").unwrap());
    let coupling = builder.build(&graph);

    assert_eq!(coupling.classes(), BTreeSet::from(["io", "net"]));
    assert_close(coupling.weight("net", "io").unwrap(), 2.0 / 3.0);
    assert_close(coupling.weight("io", "net").unwrap(), 1.0 / 3.0);
}

#[test]
fn test_only_intra_class_calls_yield_empty_coupling() {
    let graph = CallGraph::from_iter([("A.x", "A.y"), ("A.y", "A.z")]);
    let coupling = build_coupling_graph(&graph);

    assert!(coupling.is_empty());
    let clustering = HierarchicalClustering::new(coupling);
    assert!(matches!(clustering.cluster(), Err(Error::EmptyGraph)));
}

#[test]
fn test_pipeline_stops_at_requested_stage() {
    let graph = scenario_graph();

    let coupling_only = perform_architecture_analysis(
        &graph,
        &ArchitectureOptions {
            stage: AnalysisStage::Coupling,
            ..Default::default()
        },
    )
    .unwrap();
    assert!(coupling_only.dendrogram.is_none());
    assert!(coupling_only.partitions.is_empty());
    assert_eq!(coupling_only.call_graph.callers, 4);
    assert_eq!(coupling_only.call_graph.relations, 11);
    assert_eq!(coupling_only.coupling_summary.class_count, 3);

    let dendrogram = perform_architecture_analysis(
        &graph,
        &ArchitectureOptions {
            stage: AnalysisStage::Dendrogram,
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(dendrogram.dendrogram.map(|d| d.size()), Some(3));
    assert!(dendrogram.partitions.is_empty());
}

#[test]
fn test_threshold_sweep_keeps_requested_order() {
    let options = ArchitectureOptions {
        thresholds: vec![0.5, 0.3, f64::MAX],
        ..Default::default()
    };
    let report = perform_architecture_analysis(&scenario_graph(), &options).unwrap();

    let summary: Vec<(f64, usize)> = report
        .partitions
        .iter()
        .map(|p| (p.threshold, p.len()))
        .collect();
    assert_eq!(summary, vec![(0.5, 2), (0.3, 1), (f64::MAX, 3)]);
}

#[test]
fn test_non_finite_threshold_is_rejected() {
    let options = ArchitectureOptions {
        thresholds: vec![0.1, f64::NAN],
        ..Default::default()
    };
    let result = perform_architecture_analysis(&scenario_graph(), &options);

    match result {
        Err(Error::InvalidThreshold { value }) => assert!(value.is_nan()),
        other => panic!("expected invalid threshold, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_empty_call_graph() {
    let graph = CallGraph::from_json_str("{}").unwrap();

    let coupling = perform_architecture_analysis(
        &graph,
        &ArchitectureOptions {
            stage: AnalysisStage::Coupling,
            ..Default::default()
        },
    )
    .unwrap();
    assert!(coupling.coupling.is_empty());

    let modules = perform_architecture_analysis(&graph, &ArchitectureOptions::default());
    assert!(matches!(modules, Err(Error::EmptyGraph)));
}

#[test]
fn test_disconnected_groups_share_one_root() {
    let graph = CallGraph::from_iter([
        ("A.x", "B.x"),
        ("B.x", "A.x"),
        ("C.x", "D.x"),
        ("D.x", "C.x"),
    ]);
    let clustering = HierarchicalClustering::new(build_coupling_graph(&graph));
    let dendrogram = clustering.cluster().unwrap();

    assert_eq!(dendrogram.size(), 4);
    let root = dendrogram.root_node().as_merged().unwrap();
    assert_eq!(root.coupling(), 0.0);
    assert_eq!(dendrogram.node(root.left()).classes(), &set(&["A", "B"]));
    assert_eq!(dendrogram.node(root.right()).classes(), &set(&["C", "D"]));

    // Root cohesion is 1.0 / 6.0, each pair alone is 0.5
    let partition = clustering.identify_modules(&dendrogram, 0.2).unwrap();
    let found: Vec<_> = partition.modules.iter().map(|m| m.classes().clone()).collect();
    assert_eq!(found, vec![set(&["A", "B"]), set(&["C", "D"])]);
}

//! Architecture recovery orchestration.
//!
//! Runs call graph → coupling graph → dendrogram → modules and records what
//! happened through `tracing`. The computations themselves live in
//! `coupling` and `clustering` and stay free of I/O; this file is the
//! imperative shell around them.

use crate::call_graph::{CallGraph, ClassNameExtractor};
use crate::clustering::{Dendrogram, HierarchicalClustering, ModulePartition};
use crate::coupling::{CouplingGraph, CouplingGraphBuilder, CouplingSummary};
use crate::errors::{Error, Result};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, info_span, warn};

/// How far down the pipeline to go
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AnalysisStage {
    Coupling,
    Dendrogram,
    Modules,
}

#[derive(Debug, Clone)]
pub struct ArchitectureOptions {
    pub extractor: ClassNameExtractor,
    pub stage: AnalysisStage,
    /// Cohesion thresholds, one partition each, reported in this order
    pub thresholds: Vec<f64>,
}

impl Default for ArchitectureOptions {
    fn default() -> Self {
        Self {
            extractor: ClassNameExtractor::default(),
            stage: AnalysisStage::Modules,
            thresholds: vec![crate::config::DEFAULT_THRESHOLD],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CallGraphStats {
    pub callers: usize,
    pub relations: usize,
}

/// Everything produced by one analysis run
#[derive(Debug, Clone, Serialize)]
pub struct ArchitectureReport {
    pub call_graph: CallGraphStats,
    pub coupling_summary: CouplingSummary,
    pub coupling: CouplingGraph,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dendrogram: Option<Dendrogram>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub partitions: Vec<ModulePartition>,
}

/// Run the pipeline up to `options.stage`
pub fn perform_architecture_analysis(
    call_graph: &CallGraph,
    options: &ArchitectureOptions,
) -> Result<ArchitectureReport> {
    let stats = CallGraphStats {
        callers: call_graph.len(),
        relations: call_graph.relation_count(),
    };
    debug!(
        callers = stats.callers,
        relations = stats.relations,
        "Call graph loaded"
    );

    let coupling = info_span!("coupling_graph").in_scope(|| {
        CouplingGraphBuilder::new(options.extractor.clone()).build(call_graph)
    });
    let coupling_summary = coupling.summary();
    info!(
        classes = coupling_summary.class_count,
        edges = coupling_summary.edge_count,
        "Coupling graph built"
    );

    let mut report = ArchitectureReport {
        call_graph: stats,
        coupling_summary,
        coupling,
        dendrogram: None,
        partitions: Vec::new(),
    };
    if options.stage == AnalysisStage::Coupling {
        return Ok(report);
    }

    // Reject bad thresholds before paying for clustering
    if options.stage == AnalysisStage::Modules {
        validate_thresholds(&options.thresholds)?;
    }

    let clustering = HierarchicalClustering::new(report.coupling.clone());
    let dendrogram = info_span!("clustering").in_scope(|| clustering.cluster())?;
    info!(
        leaves = dendrogram.size(),
        merges = dendrogram.merges().count(),
        "Dendrogram built"
    );

    if options.stage == AnalysisStage::Modules {
        report.partitions = info_span!("module_extraction")
            .in_scope(|| sweep_thresholds(&clustering, &dendrogram, &options.thresholds))?;
    } else {
        report.dendrogram = Some(dendrogram);
    }

    Ok(report)
}

/// Every threshold must be finite; the first offender is reported
pub fn validate_thresholds(thresholds: &[f64]) -> Result<()> {
    match thresholds.iter().find(|t| !t.is_finite()) {
        Some(&value) => Err(Error::InvalidThreshold { value }),
        None => Ok(()),
    }
}

/// Cut the same dendrogram at several thresholds in parallel.
///
/// The dendrogram and the clustering are only read, so the extractions are
/// independent. Results keep the order of `thresholds`.
pub fn sweep_thresholds(
    clustering: &HierarchicalClustering,
    dendrogram: &Dendrogram,
    thresholds: &[f64],
) -> Result<Vec<ModulePartition>> {
    validate_thresholds(thresholds)?;

    let partitions = thresholds
        .par_iter()
        .map(|&threshold| clustering.identify_modules(dendrogram, threshold))
        .collect::<Result<Vec<_>>>()?;

    for partition in &partitions {
        info!(
            threshold = partition.threshold,
            modules = partition.len(),
            "Modules identified"
        );
        if let Some(diagnostic) = &partition.diagnostic {
            warn!(threshold = partition.threshold, "{}", diagnostic);
        }
    }

    Ok(partitions)
}

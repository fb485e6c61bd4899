//! Architecture recovery from method call graphs.
//!
//! The pipeline aggregates a call graph into a normalized class coupling
//! graph, clusters classes into a dendrogram by greedy agglomerative merging,
//! and cuts the dendrogram into modules at a cohesion threshold.

// Export modules for library usage
pub mod builders;
pub mod call_graph;
pub mod cli;
pub mod clustering;
pub mod commands;
pub mod config;
pub mod coupling;
pub mod errors;
pub mod io;
pub mod observability;

// Re-export commonly used types
pub use crate::call_graph::{CallGraph, ClassNameExtractor};

pub use crate::coupling::{
    build_coupling_graph, CouplingGraph, CouplingGraphBuilder, SymmetricCouplingGraph,
};

pub use crate::clustering::{
    Dendrogram, DendrogramNode, HierarchicalClustering, Module, ModuleDiagnostic,
    ModulePartition, NodeId,
};

pub use crate::builders::{
    perform_architecture_analysis, AnalysisStage, ArchitectureOptions, ArchitectureReport,
};

pub use crate::errors::{Error, Result};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};

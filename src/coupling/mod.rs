//! Class-level coupling analysis
//!
//! Aggregates a method call graph into a directed, weighted graph between
//! classes. Each weight is the share of all cross-class call relations that
//! go from one class to another, so the weights of a non-empty graph sum
//! to 1.0. The symmetric view adds both directions together and is what the
//! clustering works on.

mod builder;
mod graph;
mod symmetric;

pub use builder::{build_coupling_graph, CouplingGraphBuilder};
pub use graph::{CouplingEdge, CouplingGraph, CouplingSummary};
pub use symmetric::SymmetricCouplingGraph;

//! Architecture recovery by hierarchical clustering of classes
//!
//! Classes start as singleton clusters and the two clusters with the highest
//! aggregate affinity are merged until a single root remains. The resulting
//! dendrogram is then cut top-down: a subtree becomes a module as soon as its
//! average internal coupling exceeds the cohesion threshold.
//!
//! ```
//! use archmap::clustering::HierarchicalClustering;
//! use archmap::coupling::CouplingGraph;
//!
//! let mut graph = CouplingGraph::new();
//! graph.insert("A", "B", 0.5);
//! graph.insert("B", "A", 0.3);
//! graph.insert("A", "C", 0.2);
//!
//! let clustering = HierarchicalClustering::new(graph);
//! let dendrogram = clustering.cluster()?;
//! let partition = clustering.identify_modules(&dendrogram, 0.5)?;
//! assert_eq!(partition.len(), 2);
//! # Ok::<(), archmap::errors::Error>(())
//! ```

mod dendrogram;
mod hierarchical;
mod modules;

pub use dendrogram::{Dendrogram, DendrogramNode, LeafNode, MergedNode, NodeId};
pub use hierarchical::HierarchicalClustering;
pub use modules::{Module, ModuleDiagnostic, ModulePartition};

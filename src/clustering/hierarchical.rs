//! Hierarchical agglomerative clustering over class coupling

use super::dendrogram::{Dendrogram, DendrogramArena, NodeId};
use crate::coupling::{CouplingGraph, SymmetricCouplingGraph};
use crate::errors::{Error, Result};
use std::collections::BTreeSet;

/// An active cluster during agglomeration.
///
/// `members` are indices into the sorted class list, kept sorted, so
/// comparing two member lists compares the clusters' sorted class names.
#[derive(Debug, Clone)]
struct Cluster {
    node: NodeId,
    members: Vec<usize>,
}

impl Cluster {
    fn merged(node: NodeId, left: &Cluster, right: &Cluster) -> Self {
        let mut members = Vec::with_capacity(left.members.len() + right.members.len());
        members.extend_from_slice(&left.members);
        members.extend_from_slice(&right.members);
        members.sort_unstable();
        Self { node, members }
    }
}

/// Dense symmetric affinity lookup over the sorted class list
struct AffinityMatrix {
    size: usize,
    weights: Vec<f64>,
}

impl AffinityMatrix {
    fn new(classes: &[String], symmetric: &SymmetricCouplingGraph) -> Self {
        let size = classes.len();
        let mut weights = vec![0.0; size * size];
        for (i, a) in classes.iter().enumerate() {
            for (j, b) in classes.iter().enumerate() {
                weights[i * size + j] = symmetric.weight(a, b);
            }
        }
        Self { size, weights }
    }

    fn get(&self, i: usize, j: usize) -> f64 {
        self.weights[i * self.size + j]
    }

    /// Sum of affinities over the cross product, rows then columns in
    /// ascending order
    fn cluster_coupling(&self, c1: &Cluster, c2: &Cluster) -> f64 {
        let mut total = 0.0;
        for &a in &c1.members {
            for &b in &c2.members {
                total += self.get(a, b);
            }
        }
        total
    }
}

/// Builds a dendrogram from a coupling graph and cuts it into modules.
///
/// The symmetric affinity graph is derived once here and never changes.
/// Both the graph and the affinity view are read-only afterwards, so one
/// instance can serve concurrent module extractions.
#[derive(Debug, Clone)]
pub struct HierarchicalClustering {
    coupling: CouplingGraph,
    symmetric: SymmetricCouplingGraph,
}

impl HierarchicalClustering {
    pub fn new(coupling: CouplingGraph) -> Self {
        let symmetric = coupling.symmetric();
        Self {
            coupling,
            symmetric,
        }
    }

    pub fn coupling_graph(&self) -> &CouplingGraph {
        &self.coupling
    }

    pub fn symmetric_graph(&self) -> &SymmetricCouplingGraph {
        &self.symmetric
    }

    /// Merge the two most coupled clusters until one remains.
    ///
    /// Cluster coupling is the sum (not the mean) of pairwise affinities.
    /// Clusters are kept ordered by their sorted class names and pairs are
    /// scanned in that order; a later pair only wins with strictly greater
    /// coupling, so ties go to the lexicographically smallest pair. The
    /// smaller cluster becomes the left child.
    ///
    /// Zero-coupling merges are legal: disconnected groups still end up
    /// under one root.
    ///
    /// Every round evaluates all cluster pairs, which is cubic in the class
    /// count overall. That is fine for tens to a few hundred classes.
    pub fn cluster(&self) -> Result<Dendrogram> {
        let classes: Vec<String> = self
            .coupling
            .classes()
            .into_iter()
            .map(str::to_string)
            .collect();
        if classes.is_empty() {
            return Err(Error::EmptyGraph);
        }

        let matrix = AffinityMatrix::new(&classes, &self.symmetric);
        let mut arena = DendrogramArena::with_capacity(classes.len());
        let mut active: Vec<Cluster> = classes
            .into_iter()
            .enumerate()
            .map(|(index, class)| Cluster {
                node: arena.push_leaf(class),
                members: vec![index],
            })
            .collect();

        while active.len() > 1 {
            let Some((i, j, coupling)) = find_best_pair(&active, &matrix) else {
                break;
            };

            // i < j, remove the later one first so i stays valid
            let right = active.remove(j);
            let left = active.remove(i);
            let node = arena.push_merged(left.node, right.node, coupling);
            let merged = Cluster::merged(node, &left, &right);

            let position = active
                .binary_search_by(|probe| probe.members.cmp(&merged.members))
                .unwrap_or_else(|pos| pos);
            active.insert(position, merged);
        }

        match active.pop() {
            Some(root) => Ok(arena.finish(root.node)),
            None => Err(Error::EmptyGraph),
        }
    }

    /// Sum of affinities between every class of `c1` and every class of `c2`
    pub fn cluster_coupling(&self, c1: &BTreeSet<String>, c2: &BTreeSet<String>) -> f64 {
        let mut total = 0.0;
        for a in c1 {
            for b in c2 {
                total += self.symmetric.weight(a, b);
            }
        }
        total
    }

    /// Mean affinity over all unordered pairs of `classes`.
    ///
    /// A set with fewer than two classes is perfectly cohesive and reports
    /// infinity.
    pub fn average_internal_coupling(&self, classes: &BTreeSet<String>) -> f64 {
        if classes.len() <= 1 {
            return f64::INFINITY;
        }

        let ordered: Vec<&String> = classes.iter().collect();
        let mut total = 0.0;
        let mut pairs = 0usize;
        for (i, a) in ordered.iter().enumerate() {
            for b in &ordered[i + 1..] {
                total += self.symmetric.weight(a, b);
                pairs += 1;
            }
        }
        total / pairs as f64
    }
}

/// Highest coupling pair, `i < j`, first pair wins ties
fn find_best_pair(active: &[Cluster], matrix: &AffinityMatrix) -> Option<(usize, usize, f64)> {
    let mut best: Option<(usize, usize, f64)> = None;

    for i in 0..active.len() {
        for j in (i + 1)..active.len() {
            let coupling = matrix.cluster_coupling(&active[i], &active[j]);
            if best.map_or(true, |(_, _, max)| coupling > max) {
                best = Some((i, j, coupling));
            }
        }
    }

    best
}

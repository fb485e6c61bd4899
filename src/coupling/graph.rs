use super::symmetric::SymmetricCouplingGraph;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

/// Directed coupling between classes: `from -> (to -> weight)`.
///
/// Weights lie in `[0, 1]`. Iteration follows class-name order, which is a
/// property of this representation and not something consumers should
/// depend on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CouplingGraph {
    edges: BTreeMap<String, BTreeMap<String, f64>>,
}

/// A single directed edge of the coupling graph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CouplingEdge<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub weight: f64,
}

/// Aggregate figures for reporting
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CouplingSummary {
    pub class_count: usize,
    pub edge_count: usize,
    pub total_weight: f64,
}

impl CouplingGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the weight of `from -> to`, replacing any previous value
    pub fn insert(&mut self, from: impl Into<String>, to: impl Into<String>, weight: f64) {
        self.edges
            .entry(from.into())
            .or_default()
            .insert(to.into(), weight);
    }

    pub fn weight(&self, from: &str, to: &str) -> Option<f64> {
        self.edges.get(from).and_then(|targets| targets.get(to)).copied()
    }

    pub fn targets(&self, from: &str) -> Option<&BTreeMap<String, f64>> {
        self.edges.get(from)
    }

    pub fn edges(&self) -> impl Iterator<Item = CouplingEdge<'_>> {
        self.edges.iter().flat_map(|(from, targets)| {
            targets.iter().map(move |(to, weight)| CouplingEdge {
                from,
                to,
                weight: *weight,
            })
        })
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.edge_count() == 0
    }

    /// Every class named by the graph, as a source or as a target
    pub fn classes(&self) -> BTreeSet<&str> {
        self.edges
            .iter()
            .flat_map(|(from, targets)| {
                std::iter::once(from.as_str()).chain(targets.keys().map(String::as_str))
            })
            .collect()
    }

    pub fn total_weight(&self) -> f64 {
        self.edges().map(|edge| edge.weight).sum()
    }

    pub fn summary(&self) -> CouplingSummary {
        CouplingSummary {
            class_count: self.classes().len(),
            edge_count: self.edge_count(),
            total_weight: self.total_weight(),
        }
    }

    /// Undirected view where both directions of a class pair are summed
    pub fn symmetric(&self) -> SymmetricCouplingGraph {
        SymmetricCouplingGraph::from_directed(self)
    }

    /// One line per edge: `<A> -> <B> (weight = <w>)`
    pub fn render(&self) -> String {
        let mut out = String::new();
        for edge in self.edges() {
            let _ = writeln!(out, "{} -> {} (weight = {})", edge.from, edge.to, edge.weight);
        }
        out
    }
}

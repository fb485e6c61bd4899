use super::graph::CouplingGraph;
use std::collections::BTreeMap;

/// Undirected affinity between classes.
///
/// `weight(A, B) == weight(B, A) == coupling(A -> B) + coupling(B -> A)`.
/// Pairs never observed have affinity 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymmetricCouplingGraph {
    weights: BTreeMap<String, BTreeMap<String, f64>>,
}

impl SymmetricCouplingGraph {
    pub fn from_directed(graph: &CouplingGraph) -> Self {
        let mut weights: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
        for edge in graph.edges() {
            *weights
                .entry(edge.from.to_string())
                .or_default()
                .entry(edge.to.to_string())
                .or_insert(0.0) += edge.weight;
            if edge.from != edge.to {
                *weights
                    .entry(edge.to.to_string())
                    .or_default()
                    .entry(edge.from.to_string())
                    .or_insert(0.0) += edge.weight;
            }
        }
        Self { weights }
    }

    pub fn weight(&self, a: &str, b: &str) -> f64 {
        self.weights
            .get(a)
            .and_then(|neighbours| neighbours.get(b))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn neighbours(&self, class: &str) -> impl Iterator<Item = (&str, f64)> {
        self.weights
            .get(class)
            .into_iter()
            .flat_map(|neighbours| neighbours.iter().map(|(name, w)| (name.as_str(), *w)))
    }
}

use super::graph::CouplingGraph;
use crate::call_graph::{CallGraph, ClassNameExtractor};
use std::collections::BTreeMap;

/// Builds the class coupling graph from a method call graph
#[derive(Debug, Clone, Default)]
pub struct CouplingGraphBuilder {
    extractor: ClassNameExtractor,
}

impl CouplingGraphBuilder {
    pub fn new(extractor: ClassNameExtractor) -> Self {
        Self { extractor }
    }

    /// Count cross-class relations per ordered class pair and normalise by
    /// the project-wide total.
    ///
    /// Calls within one class are not coupling and are skipped. A call graph
    /// without any cross-class relation yields an empty graph.
    pub fn build(&self, call_graph: &CallGraph) -> CouplingGraph {
        let (counts, total_relations) = self.count_relations(call_graph);

        let mut graph = CouplingGraph::new();
        if total_relations == 0 {
            return graph;
        }

        let total = total_relations as f64;
        for ((caller_class, callee_class), count) in counts {
            graph.insert(caller_class, callee_class, count as f64 / total);
        }
        graph
    }

    fn count_relations<'a>(
        &self,
        call_graph: &'a CallGraph,
    ) -> (BTreeMap<(&'a str, &'a str), usize>, usize) {
        let mut counts: BTreeMap<(&str, &str), usize> = BTreeMap::new();
        let mut total_relations = 0;

        for (caller, callees) in call_graph.iter() {
            let caller_class = self.extractor.class_of(caller);
            for callee in callees {
                let callee_class = self.extractor.class_of(callee);
                if caller_class == callee_class {
                    continue;
                }
                *counts.entry((caller_class, callee_class)).or_insert(0) += 1;
                total_relations += 1;
            }
        }

        (counts, total_relations)
    }
}

/// Build a coupling graph using the default `Class.method` convention
pub fn build_coupling_graph(call_graph: &CallGraph) -> CouplingGraph {
    CouplingGraphBuilder::default().build(call_graph)
}

//! Module extraction by cutting the dendrogram at a cohesion threshold

use super::dendrogram::{Dendrogram, DendrogramNode, NodeId};
use super::hierarchical::HierarchicalClustering;
use crate::errors::{Error, Result};
use serde::Serialize;
use std::collections::{BTreeSet, VecDeque};
use std::fmt;

/// A set of classes accepted as one cohesive unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Module {
    classes: BTreeSet<String>,
    /// Average internal coupling, absent for single-class modules
    cohesion: Option<f64>,
}

impl Module {
    pub fn classes(&self) -> &BTreeSet<String> {
        &self.classes
    }

    pub fn cohesion(&self) -> Option<f64> {
        self.cohesion
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn contains(&self, class: &str) -> bool {
        self.classes.contains(class)
    }
}

/// Observations about an extraction that do not change its result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModuleDiagnostic {
    /// More modules than half the classes; the threshold is likely too low
    /// to group anything meaningful
    TooManyModules { module_count: usize, limit: usize },
}

impl fmt::Display for ModuleDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooManyModules {
                module_count,
                limit,
            } => write!(
                f,
                "module count ({}) exceeds half the class count ({}); try a higher threshold",
                module_count, limit
            ),
        }
    }
}

/// Modules found for one threshold, in breadth-first discovery order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModulePartition {
    pub threshold: f64,
    pub class_count: usize,
    pub modules: Vec<Module>,
    pub diagnostic: Option<ModuleDiagnostic>,
}

impl ModulePartition {
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Module holding `class`, if any
    pub fn module_of(&self, class: &str) -> Option<&Module> {
        self.modules.iter().find(|module| module.contains(class))
    }
}

impl HierarchicalClustering {
    /// Cut the whole dendrogram into modules
    pub fn identify_modules(&self, dendrogram: &Dendrogram, threshold: f64) -> Result<ModulePartition> {
        self.identify_modules_from(dendrogram, dendrogram.root(), threshold)
    }

    /// Cut the subtree rooted at `start` into modules.
    ///
    /// Breadth-first: a merged node whose average internal coupling is
    /// strictly above `threshold` becomes one module, otherwise both
    /// children are queued. Leaves always become modules, so the result
    /// partitions the classes under `start`.
    pub fn identify_modules_from(
        &self,
        dendrogram: &Dendrogram,
        start: NodeId,
        threshold: f64,
    ) -> Result<ModulePartition> {
        if !threshold.is_finite() {
            return Err(Error::InvalidThreshold { value: threshold });
        }

        let class_count = dendrogram.node(start).size();
        let mut modules = Vec::new();
        let mut queue = VecDeque::from([start]);

        while let Some(id) = queue.pop_front() {
            match dendrogram.node(id) {
                DendrogramNode::Leaf(leaf) => modules.push(Module {
                    classes: BTreeSet::from([leaf.class_name().to_string()]),
                    cohesion: None,
                }),
                DendrogramNode::Merged(merged) => {
                    let classes = dendrogram.node(id).classes();
                    let average = self.average_internal_coupling(classes);
                    if average > threshold {
                        modules.push(Module {
                            classes: classes.clone(),
                            cohesion: average.is_finite().then_some(average),
                        });
                    } else {
                        queue.push_back(merged.left());
                        queue.push_back(merged.right());
                    }
                }
            }
        }

        let limit = class_count / 2;
        let diagnostic = (modules.len() > limit).then_some(ModuleDiagnostic::TooManyModules {
            module_count: modules.len(),
            limit,
        });

        Ok(ModulePartition {
            threshold,
            class_count,
            modules,
            diagnostic,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coupling::CouplingGraph;
    use pretty_assertions::assert_eq;

    fn scenario() -> (HierarchicalClustering, Dendrogram) {
        let mut graph = CouplingGraph::new();
        graph.insert("A", "B", 0.5);
        graph.insert("B", "A", 0.3);
        graph.insert("A", "C", 0.2);
        let clustering = HierarchicalClustering::new(graph);
        let tree = clustering.cluster().unwrap();
        (clustering, tree)
    }

    fn names(partition: &ModulePartition) -> Vec<Vec<&str>> {
        partition
            .modules
            .iter()
            .map(|m| m.classes().iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn test_low_threshold_accepts_root() {
        let (clustering, tree) = scenario();
        let partition = clustering.identify_modules(&tree, 0.3).unwrap();

        assert_eq!(names(&partition), vec![vec!["A", "B", "C"]]);
        let cohesion = partition.modules[0].cohesion().unwrap();
        assert!((cohesion - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(partition.diagnostic, None);
    }

    #[test]
    fn test_higher_threshold_splits_root() {
        let (clustering, tree) = scenario();
        let partition = clustering.identify_modules(&tree, 0.5).unwrap();

        assert_eq!(names(&partition), vec![vec!["A", "B"], vec!["C"]]);
        assert_eq!(partition.modules[1].cohesion(), None);
        // 2 modules > floor(3 / 2)
        assert_eq!(
            partition.diagnostic,
            Some(ModuleDiagnostic::TooManyModules {
                module_count: 2,
                limit: 1
            })
        );
    }

    #[test]
    fn test_huge_threshold_gives_singletons() {
        let (clustering, tree) = scenario();
        let partition = clustering.identify_modules(&tree, f64::MAX).unwrap();
        assert_eq!(names(&partition), vec![vec!["C"], vec!["A"], vec!["B"]]);
    }

    #[test]
    fn test_non_positive_threshold_gives_one_module() {
        let (clustering, tree) = scenario();
        for threshold in [0.0, -1.0, f64::MIN] {
            let partition = clustering.identify_modules(&tree, threshold).unwrap();
            assert_eq!(partition.len(), 1);
            assert_eq!(partition.modules[0].classes(), tree.classes());
        }
    }

    #[test]
    fn test_non_finite_threshold_is_rejected() {
        let (clustering, tree) = scenario();
        for threshold in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = clustering.identify_modules(&tree, threshold).unwrap_err();
            assert!(matches!(err, Error::InvalidThreshold { .. }));
        }
    }

    #[test]
    fn test_extraction_does_not_change_dendrogram() {
        let (clustering, tree) = scenario();
        let before = tree.clone();
        clustering.identify_modules(&tree, 0.5).unwrap();
        assert_eq!(tree, before);
    }

    #[test]
    fn test_subtree_extraction() {
        let (clustering, tree) = scenario();
        let (ab, _) = tree.merges().next().unwrap();
        let partition = clustering.identify_modules_from(&tree, ab, 0.9).unwrap();
        assert_eq!(partition.class_count, 2);
        assert_eq!(names(&partition), vec![vec!["A"], vec!["B"]]);
    }

    #[test]
    fn test_module_of() {
        let (clustering, tree) = scenario();
        let partition = clustering.identify_modules(&tree, 0.5).unwrap();
        assert!(partition.module_of("B").unwrap().contains("A"));
        assert!(partition.module_of("Z").is_none());
    }

    #[test]
    fn test_diagnostic_message() {
        let diagnostic = ModuleDiagnostic::TooManyModules {
            module_count: 7,
            limit: 5,
        };
        assert_eq!(
            diagnostic.to_string(),
            "module count (7) exceeds half the class count (5); try a higher threshold"
        );
    }
}

//! Arena-backed binary dendrogram
//!
//! Nodes are stored in creation order and refer to their children by
//! [`NodeId`]. Leaves are created first, one per class; every merge appends
//! one node, so the last node is always the root.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt::Write as _;

/// Index of a node inside its [`Dendrogram`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single class
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeafNode {
    class: String,
    #[serde(skip)]
    classes: BTreeSet<String>,
}

impl LeafNode {
    pub fn class_name(&self) -> &str {
        &self.class
    }
}

/// Two clusters joined at `coupling`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedNode {
    left: NodeId,
    right: NodeId,
    coupling: f64,
    #[serde(skip)]
    classes: BTreeSet<String>,
}

impl MergedNode {
    pub fn left(&self) -> NodeId {
        self.left
    }

    pub fn right(&self) -> NodeId {
        self.right
    }

    /// Aggregate coupling between the two children at merge time
    pub fn coupling(&self) -> f64 {
        self.coupling
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DendrogramNode {
    Leaf(LeafNode),
    Merged(MergedNode),
}

impl DendrogramNode {
    /// Every class under this node
    pub fn classes(&self) -> &BTreeSet<String> {
        match self {
            Self::Leaf(leaf) => &leaf.classes,
            Self::Merged(merged) => &merged.classes,
        }
    }

    /// Number of leaves under this node
    pub fn size(&self) -> usize {
        self.classes().len()
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    pub fn as_merged(&self) -> Option<&MergedNode> {
        match self {
            Self::Merged(merged) => Some(merged),
            Self::Leaf(_) => None,
        }
    }
}

/// Full binary tree recording the order and strength of cluster merges
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dendrogram {
    nodes: Vec<DendrogramNode>,
    root: NodeId,
}

impl Dendrogram {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn root_node(&self) -> &DendrogramNode {
        self.node(self.root)
    }

    /// Look up a node. Ids are only handed out by the dendrogram that owns
    /// them, so lookups are always in bounds.
    pub fn node(&self, id: NodeId) -> &DendrogramNode {
        &self.nodes[id.0]
    }

    /// The full class universe
    pub fn classes(&self) -> &BTreeSet<String> {
        self.root_node().classes()
    }

    /// Leaf count of the whole tree
    pub fn size(&self) -> usize {
        self.root_node().size()
    }

    /// Total number of nodes, leaves and merges
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &DendrogramNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index), node))
    }

    /// Merges in the order they were performed
    pub fn merges(&self) -> impl Iterator<Item = (NodeId, &MergedNode)> {
        self.nodes()
            .filter_map(|(id, node)| node.as_merged().map(|merged| (id, merged)))
    }

    /// Indented text tree, children below their parent
    pub fn render(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![(self.root, 0usize)];

        while let Some((id, depth)) = stack.pop() {
            let indent = "  ".repeat(depth);
            match self.node(id) {
                DendrogramNode::Leaf(leaf) => {
                    let _ = writeln!(out, "{}{}", indent, leaf.class_name());
                }
                DendrogramNode::Merged(merged) => {
                    let _ = writeln!(
                        out,
                        "{}merge {:.4} ({} classes)",
                        indent,
                        merged.coupling,
                        merged.classes.len()
                    );
                    stack.push((merged.right, depth + 1));
                    stack.push((merged.left, depth + 1));
                }
            }
        }
        out
    }
}

/// Append-only node storage used while clustering
#[derive(Debug, Default)]
pub(crate) struct DendrogramArena {
    nodes: Vec<DendrogramNode>,
}

impl DendrogramArena {
    pub(crate) fn with_capacity(leaves: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(leaves.saturating_mul(2).saturating_sub(1)),
        }
    }

    pub(crate) fn push_leaf(&mut self, class: String) -> NodeId {
        let classes = BTreeSet::from([class.clone()]);
        self.push(DendrogramNode::Leaf(LeafNode { class, classes }))
    }

    pub(crate) fn push_merged(&mut self, left: NodeId, right: NodeId, coupling: f64) -> NodeId {
        let classes = self.nodes[left.0]
            .classes()
            .union(self.nodes[right.0].classes())
            .cloned()
            .collect();
        self.push(DendrogramNode::Merged(MergedNode {
            left,
            right,
            coupling,
            classes,
        }))
    }

    pub(crate) fn finish(self, root: NodeId) -> Dendrogram {
        Dendrogram {
            nodes: self.nodes,
            root,
        }
    }

    fn push(&mut self, node: DendrogramNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }
}

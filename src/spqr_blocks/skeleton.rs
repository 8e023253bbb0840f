use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::{NodeType, error::PreconditionViolation, spqr_blocks::skeleton_graph::SkeletonGraph};

/// What a skeleton edge stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkeletonEdge {
    /// Copy of an edge of the original graph.
    Real(EdgeIndex),
    /// One half of the virtual edge pair of a tree edge.
    Virtual(usize),
    /// Second half of an edge subdivided by [`SpqrTree::replace_sk_edge_by_peak`](crate::SpqrTree::replace_sk_edge_by_peak).
    Peak,
}

/// The graph attached to one node of the SPQR tree.
///
/// - `original_nodes[v]`: node of the original graph that skeleton node `v` stands for,
///   `None` for the middle node of a peak.
/// - `edge_kinds[e]`: meaning of skeleton edge `e`.
/// - `reference_edge`: the edge towards the parent, or the real root edge.
#[derive(Debug, Clone)]
pub struct Skeleton {
    pub(crate) tree_node: usize,
    pub(crate) node_type: NodeType,
    pub(crate) graph: SkeletonGraph,
    pub(crate) original_nodes: Vec<Option<NodeIndex>>,
    pub(crate) edge_kinds: Vec<SkeletonEdge>,
    pub(crate) reference_edge: Option<usize>,
}

impl Skeleton {
    pub(crate) fn new(tree_node: usize, node_type: NodeType) -> Self {
        Self {
            tree_node,
            node_type,
            graph: SkeletonGraph::new(),
            original_nodes: Vec::new(),
            edge_kinds: Vec::new(),
            reference_edge: None,
        }
    }

    pub(crate) fn add_node(&mut self, original: Option<NodeIndex>) -> usize {
        self.original_nodes.push(original);
        self.graph.new_node()
    }

    pub(crate) fn add_edge(&mut self, s: usize, t: usize, kind: SkeletonEdge) -> usize {
        self.edge_kinds.push(kind);
        self.graph.new_edge(s, t)
    }

    pub(crate) fn check_edge(&self, e: usize) -> Result<(), PreconditionViolation> {
        if self.graph.contains_edge(e) {
            Ok(())
        } else {
            Err(PreconditionViolation::UnknownSkeletonEdge {
                tree_node: self.tree_node,
                edge: e,
            })
        }
    }

    pub(crate) fn check_node(&self, v: usize) -> Result<(), PreconditionViolation> {
        if self.graph.contains_node(v) {
            Ok(())
        } else {
            Err(PreconditionViolation::UnknownSkeletonNode {
                tree_node: self.tree_node,
                node: v,
            })
        }
    }

    pub fn graph(&self) -> &SkeletonGraph {
        &self.graph
    }

    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    /// Tree node owning this skeleton.
    pub fn tree_node(&self) -> usize {
        self.tree_node
    }

    pub fn reference_edge(&self) -> Option<usize> {
        self.reference_edge
    }

    pub fn original_node(&self, v: usize) -> Result<Option<NodeIndex>, PreconditionViolation> {
        self.check_node(v)?;
        Ok(self.original_nodes[v])
    }

    pub fn edge_kind(&self, e: usize) -> Result<SkeletonEdge, PreconditionViolation> {
        self.check_edge(e)?;
        Ok(self.edge_kinds[e])
    }

    /// Original edge of a real skeleton edge.
    pub fn real_edge(&self, e: usize) -> Result<Option<EdgeIndex>, PreconditionViolation> {
        Ok(match self.edge_kind(e)? {
            SkeletonEdge::Real(oe) => Some(oe),
            _ => None,
        })
    }

    pub fn is_virtual(&self, e: usize) -> Result<bool, PreconditionViolation> {
        Ok(matches!(self.edge_kind(e)?, SkeletonEdge::Virtual(_)))
    }

    /// Tree edge of a virtual skeleton edge.
    pub fn tree_edge_of(&self, e: usize) -> Result<Option<usize>, PreconditionViolation> {
        Ok(match self.edge_kind(e)? {
            SkeletonEdge::Virtual(t) => Some(t),
            _ => None,
        })
    }

    /// True once an edge of this skeleton was replaced by a peak.
    pub fn has_peak(&self) -> bool {
        self.original_nodes.iter().any(Option::is_none)
    }

    /// Original endpoints of skeleton edge `e`, `None` if one of them is a peak node.
    pub(crate) fn original_endpoints(&self, e: usize) -> Option<(NodeIndex, NodeIndex)> {
        let (s, t) = self.graph.endpoints(e);
        Some((self.original_nodes[s]?, self.original_nodes[t]?))
    }
}

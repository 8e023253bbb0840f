use std::cell::RefCell;

use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::spqr_blocks::{pertinent::PertinentCache, skeleton::Skeleton};

/// An edge of the SPQR tree, backed by one virtual edge in each of the two skeletons
/// it connects.
///
/// `ends[i] = (tree node, skeleton edge)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeEdge {
    pub ends: [(usize, usize); 2],
}

impl TreeEdge {
    /// The end of this tree edge that is not in `tree_node`.
    pub fn twin(&self, tree_node: usize) -> (usize, usize) {
        if self.ends[0].0 == tree_node {
            self.ends[1]
        } else {
            self.ends[0]
        }
    }

    /// Skeleton edge of this tree edge inside `tree_node`.
    pub fn end_in(&self, tree_node: usize) -> usize {
        if self.ends[0].0 == tree_node {
            self.ends[0].1
        } else {
            self.ends[1].1
        }
    }
}

/// Rooted SPQR tree of a biconnected multigraph.
///
/// - Tree nodes are numbered from `0` to `k-1`, node `v` owns `skeletons[v]`.
/// - `adj[v]`: tree edges incident to `v`.
/// - `parent_edge[v]`: tree edge towards the parent, `None` for the root.
/// - `real_edges[e]`: the `(tree node, skeleton edge)` holding original edge `e`.
/// - `original_edges[e]`: endpoints of original edge `e`.
#[derive(Debug)]
pub struct SpqrTree {
    pub(crate) skeletons: Vec<Skeleton>,
    pub(crate) tree_edges: Vec<TreeEdge>,
    pub(crate) adj: Vec<Vec<usize>>,
    pub(crate) parent_edge: Vec<Option<usize>>,
    pub(crate) root: usize,
    pub(crate) root_edge: Option<EdgeIndex>,

    pub(crate) real_edges: Vec<(usize, usize)>,
    pub(crate) original_edges: Vec<(NodeIndex, NodeIndex)>,
    pub(crate) original_node_count: usize,

    pub(crate) cache: RefCell<PertinentCache>,
}

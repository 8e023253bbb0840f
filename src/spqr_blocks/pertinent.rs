use log::trace;
use petgraph::graph::{EdgeIndex, NodeIndex};
use scopeguard::guard;

use crate::{
    EdgeLabel, UnGraph,
    error::PreconditionViolation,
    spqr_blocks::{outside_structures::SpqrTree, skeleton::SkeletonEdge},
};

/// Original node -> pertinent node map used while one pertinent graph is built.
/// Every touched entry is reset before the extraction returns.
#[derive(Debug, Default)]
pub(crate) struct PertinentCache {
    copy_of: Vec<Option<NodeIndex>>,
    touched: Vec<usize>,
}

impl PertinentCache {
    pub(crate) fn new(n: usize) -> Self {
        Self {
            copy_of: vec![None; n],
            touched: Vec::new(),
        }
    }

    fn copy_node(&mut self, v: NodeIndex, out: &mut PertinentGraph) -> NodeIndex {
        if let Some(copy) = self.copy_of[v.index()] {
            return copy;
        }

        let copy = out.graph.add_node(v.index() as u32);
        out.orig_v.push(v);
        self.copy_of[v.index()] = Some(copy);
        self.touched.push(v.index());

        copy
    }

    fn drain(&mut self) {
        for v in self.touched.drain(..) {
            self.copy_of[v] = None;
        }
    }

    #[cfg(test)]
    pub(crate) fn is_clean(&self) -> bool {
        self.touched.is_empty() && self.copy_of.iter().all(Option::is_none)
    }
}

/// Subgraph of the original graph hanging below a tree node.
///
/// - `graph`: node weights are the original node indices, edges are labelled `Real`
///   except `v_edge`.
/// - `orig_v[v]` / `orig_e[e]`: original node / edge of pertinent node `v` / edge `e`,
///   `orig_e` is `None` only for `v_edge`.
/// - `v_edge`: the `Virtual` edge standing for the reference edge of `tree_node`,
///   `None` when the tree node has no reference edge.
/// - `sk_ref_edge`: that reference edge in the skeleton of `tree_node`.
#[derive(Debug, Clone)]
pub struct PertinentGraph {
    pub graph: UnGraph,
    pub orig_v: Vec<NodeIndex>,
    pub orig_e: Vec<Option<EdgeIndex>>,
    pub v_edge: Option<EdgeIndex>,
    pub tree_node: usize,
    pub sk_ref_edge: Option<usize>,
}

impl PertinentGraph {
    /// Number of copied original edges, `v_edge` excluded.
    pub fn pertinent_edge_count(&self) -> usize {
        self.orig_e.iter().filter(|e| e.is_some()).count()
    }
}

impl SpqrTree {
    /// Builds the pertinent graph of tree node `v`: everything on the side of `v`'s
    /// skeleton away from its reference edge, with virtual edges expanded into the
    /// subtrees they stand for. Peak edges contribute nothing.
    ///
    /// Fails with [`PreconditionViolation::SyntheticEndpoint`] when an endpoint of the
    /// reference edge is the middle node of a peak.
    pub fn pertinent_graph(&self, v: usize) -> Result<PertinentGraph, PreconditionViolation> {
        let skeleton = self.skeleton(v)?;
        let mut cache = guard(self.cache.borrow_mut(), |mut cache| cache.drain());

        let mut out = PertinentGraph {
            graph: UnGraph::default(),
            orig_v: Vec::new(),
            orig_e: Vec::new(),
            v_edge: None,
            tree_node: v,
            sk_ref_edge: skeleton.reference_edge,
        };

        // (tree node, skeleton edge leading back to where we came from)
        let mut stack = vec![(v, skeleton.reference_edge)];
        while let Some((x, skip)) = stack.pop() {
            for (e, &kind) in self.skeletons[x].edge_kinds.iter().enumerate() {
                if Some(e) == skip {
                    continue;
                }

                match kind {
                    SkeletonEdge::Real(oe) => {
                        let (s, t) = self.original_edges[oe.index()];
                        let cs = cache.copy_node(s, &mut out);
                        let ct = cache.copy_node(t, &mut out);
                        out.graph.add_edge(cs, ct, EdgeLabel::Real);
                        out.orig_e.push(Some(oe));
                    }
                    SkeletonEdge::Virtual(t) => {
                        let (twin_node, twin_edge) = self.tree_edges[t].twin(x);
                        stack.push((twin_node, Some(twin_edge)));
                    }
                    SkeletonEdge::Peak => {}
                }
            }
        }

        if let Some(r) = skeleton.reference_edge {
            let (s, t) = skeleton.original_endpoints(r).ok_or(
                PreconditionViolation::SyntheticEndpoint {
                    tree_node: v,
                    edge: r,
                },
            )?;

            let cs = cache.copy_node(s, &mut out);
            let ct = cache.copy_node(t, &mut out);
            out.v_edge = Some(out.graph.add_edge(cs, ct, EdgeLabel::Virtual));
            out.orig_e.push(None);
        }

        trace!(
            "pertinent graph of tree node {}: {} nodes, {} edges",
            v,
            out.graph.node_count(),
            out.graph.edge_count()
        );

        Ok(out)
    }
}

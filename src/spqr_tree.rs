use std::{cell::RefCell, collections::VecDeque};

use fixedbitset::FixedBitSet;
use log::{debug, trace};
use petgraph::{
    graph::{EdgeIndex, NodeIndex, UnGraph},
    visit::EdgeRef,
};

use crate::{
    NodeType,
    error::{InvalidInput, PreconditionViolation},
    spqr_blocks::{
        outside_structures::{SpqrTree, TreeEdge},
        pertinent::PertinentCache,
        skeleton::{Skeleton, SkeletonEdge},
    },
    triconnected::get_triconnected_components,
    triconnected_blocks::outside_structures::TriconnectedComponents,
};

impl SpqrTree {
    /// Builds the SPQR tree of a biconnected, loopless multigraph with at least 3 edges,
    /// rooted at the skeleton holding edge `0`.
    pub fn new<N, E>(graph: &UnGraph<N, E>) -> Result<Self, InvalidInput> {
        Self::with_root_edge(graph, EdgeIndex::new(0))
    }

    /// Same as [`SpqrTree::new`], rooted at the skeleton holding `root_edge`. The
    /// reference edge of the root is the copy of `root_edge`.
    pub fn with_root_edge<N, E>(
        graph: &UnGraph<N, E>,
        root_edge: EdgeIndex,
    ) -> Result<Self, InvalidInput> {
        let tricon = get_triconnected_components(graph)?;
        if root_edge.index() >= graph.edge_count() {
            return Err(InvalidInput::UnknownRootEdge(root_edge));
        }

        let mut tree = Self::from_components(graph, &tricon);
        tree.root_at(root_edge);

        debug!(
            "spqr tree of {} nodes and {} edges: {} S-nodes, {} P-nodes, {} R-nodes",
            graph.node_count(),
            graph.edge_count(),
            tree.number_of_s_nodes(),
            tree.number_of_p_nodes(),
            tree.number_of_r_nodes()
        );

        Ok(tree)
    }

    /// One skeleton per component, virtual edges shared by two components become tree
    /// edges. The result is not rooted yet.
    fn from_components<N, E>(graph: &UnGraph<N, E>, tricon: &TriconnectedComponents) -> Self {
        let n = graph.node_count();
        let m = graph.edge_count();
        let k = tricon.components.len();

        let mut skeletons = Vec::with_capacity(k);
        let mut real_edges = vec![(usize::MAX, usize::MAX); m];
        let mut virtual_ends = vec![Vec::new(); tricon.edges.len() - m];

        let mut sk_node_of: Vec<Option<usize>> = vec![None; n];
        let mut touched = Vec::new();

        for (i, component) in tricon.components.iter().enumerate() {
            let mut skeleton = Skeleton::new(i, component.node_type());

            for &eid in &component.edges {
                let (s, t) = tricon.edges[eid];
                let mut sk_node = |x: usize| match sk_node_of[x] {
                    Some(sx) => sx,
                    None => {
                        let sx = skeleton.add_node(Some(NodeIndex::new(x)));
                        sk_node_of[x] = Some(sx);
                        touched.push(x);
                        sx
                    }
                };
                let (ss, st) = (sk_node(s), sk_node(t));

                if eid < m {
                    let sk_e = skeleton.add_edge(ss, st, SkeletonEdge::Real(EdgeIndex::new(eid)));
                    real_edges[eid] = (i, sk_e);
                } else {
                    // tree edge id is assigned below
                    let sk_e = skeleton.add_edge(ss, st, SkeletonEdge::Virtual(usize::MAX));
                    virtual_ends[eid - m].push((i, sk_e));
                }
            }

            for x in touched.drain(..) {
                sk_node_of[x] = None;
            }
            skeletons.push(skeleton);
        }

        let mut tree_edges = Vec::new();
        let mut adj = vec![Vec::new(); k];
        for ends in virtual_ends {
            // merged away virtual edges are in no component
            let &[a, b] = ends.as_slice() else {
                debug_assert!(ends.is_empty());
                continue;
            };

            let t = tree_edges.len();
            tree_edges.push(TreeEdge { ends: [a, b] });
            for (v, sk_e) in [a, b] {
                skeletons[v].edge_kinds[sk_e] = SkeletonEdge::Virtual(t);
                adj[v].push(t);
            }
        }

        SpqrTree {
            skeletons,
            tree_edges,
            adj,
            parent_edge: vec![None; k],
            root: 0,
            root_edge: None,

            real_edges,
            original_edges: graph
                .edge_references()
                .map(|e| (e.source(), e.target()))
                .collect(),
            original_node_count: n,

            cache: RefCell::new(PertinentCache::new(n)),
        }
    }

    /// Roots the tree from scratch by BFS from the skeleton holding `root_edge`.
    fn root_at(&mut self, root_edge: EdgeIndex) {
        let (root, sk_e) = self.real_edges[root_edge.index()];
        self.root = root;
        self.root_edge = Some(root_edge);
        self.parent_edge[root] = None;
        self.skeletons[root].reference_edge = Some(sk_e);

        let mut visited = FixedBitSet::with_capacity(self.skeletons.len());
        visited.insert(root);
        let mut queue = VecDeque::from([root]);

        while let Some(v) = queue.pop_front() {
            for &t in &self.adj[v] {
                let (w, ew) = self.tree_edges[t].twin(v);
                if !visited.put(w) {
                    self.parent_edge[w] = Some(t);
                    self.skeletons[w].reference_edge = Some(ew);
                    queue.push_back(w);
                }
            }
        }
    }

    fn check_tree_node(&self, v: usize) -> Result<(), PreconditionViolation> {
        if v < self.skeletons.len() {
            Ok(())
        } else {
            Err(PreconditionViolation::UnknownTreeNode(v))
        }
    }

    fn check_original_edge(&self, e: EdgeIndex) -> Result<(), PreconditionViolation> {
        if e.index() < self.real_edges.len() {
            Ok(())
        } else {
            Err(PreconditionViolation::UnknownOriginalEdge(e))
        }
    }

    pub fn root_node(&self) -> usize {
        self.root
    }

    /// The real edge the tree is rooted at, `None` after [`SpqrTree::root_tree_at_node`].
    pub fn root_edge(&self) -> Option<EdgeIndex> {
        self.root_edge
    }

    pub fn tree_node_count(&self) -> usize {
        self.skeletons.len()
    }

    pub fn tree_edge_count(&self) -> usize {
        self.tree_edges.len()
    }

    pub fn tree_edge(&self, t: usize) -> Option<&TreeEdge> {
        self.tree_edges.get(t)
    }

    pub fn original_node_count(&self) -> usize {
        self.original_node_count
    }

    pub fn original_edge_count(&self) -> usize {
        self.original_edges.len()
    }

    pub fn type_of(&self, v: usize) -> Result<NodeType, PreconditionViolation> {
        Ok(self.skeleton(v)?.node_type)
    }

    pub fn skeleton(&self, v: usize) -> Result<&Skeleton, PreconditionViolation> {
        self.skeletons
            .get(v)
            .ok_or(PreconditionViolation::UnknownTreeNode(v))
    }

    pub fn nodes_of_type(&self, node_type: NodeType) -> Vec<usize> {
        (0..self.skeletons.len())
            .filter(|&v| self.skeletons[v].node_type == node_type)
            .collect()
    }

    fn count_of_type(&self, node_type: NodeType) -> usize {
        self.skeletons
            .iter()
            .filter(|skeleton| skeleton.node_type == node_type)
            .count()
    }

    pub fn number_of_s_nodes(&self) -> usize {
        self.count_of_type(NodeType::S)
    }

    pub fn number_of_p_nodes(&self) -> usize {
        self.count_of_type(NodeType::P)
    }

    pub fn number_of_r_nodes(&self) -> usize {
        self.count_of_type(NodeType::R)
    }

    pub fn parent(&self, v: usize) -> Result<Option<usize>, PreconditionViolation> {
        self.check_tree_node(v)?;
        Ok(self.parent_edge[v].map(|t| self.tree_edges[t].twin(v).0))
    }

    pub fn children(&self, v: usize) -> Result<Vec<usize>, PreconditionViolation> {
        self.check_tree_node(v)?;
        Ok(self.adj[v]
            .iter()
            .filter(|&&t| Some(t) != self.parent_edge[v])
            .map(|&t| self.tree_edges[t].twin(v).0)
            .collect())
    }

    /// Skeleton holding the real copy of original edge `e`.
    pub fn skeleton_of_real(&self, e: EdgeIndex) -> Result<&Skeleton, PreconditionViolation> {
        self.check_original_edge(e)?;
        Ok(&self.skeletons[self.real_edges[e.index()].0])
    }

    /// Skeleton edge that is the real copy of original edge `e`.
    pub fn copy_of_real(&self, e: EdgeIndex) -> Result<usize, PreconditionViolation> {
        self.check_original_edge(e)?;
        Ok(self.real_edges[e.index()].1)
    }

    fn twin_of(&self, v: usize, e: usize) -> Result<(usize, usize), PreconditionViolation> {
        match self.skeleton(v)?.tree_edge_of(e)? {
            Some(t) => Ok(self.tree_edges[t].twin(v)),
            None => Err(PreconditionViolation::NotVirtual {
                tree_node: v,
                edge: e,
            }),
        }
    }

    /// Tree node on the other side of virtual edge `e` of skeleton `v`.
    pub fn twin_tree_node(&self, v: usize, e: usize) -> Result<usize, PreconditionViolation> {
        Ok(self.twin_of(v, e)?.0)
    }

    /// The virtual edge paired with virtual edge `e` of skeleton `v`.
    pub fn twin_edge(&self, v: usize, e: usize) -> Result<usize, PreconditionViolation> {
        Ok(self.twin_of(v, e)?.1)
    }

    /// Makes `v` the root by flipping the parent pointers on the path to the old root.
    fn make_root(&mut self, v: usize) {
        let mut path = Vec::new();
        let mut x = v;
        while let Some(t) = self.parent_edge[x] {
            path.push((x, t));
            x = self.tree_edges[t].twin(x).0;
        }

        trace!("rerooting from {} to {} over {} tree edges", self.root, v, path.len());

        for (x, t) in path {
            let (p, ep) = self.tree_edges[t].twin(x);
            self.parent_edge[p] = Some(t);
            self.skeletons[p].reference_edge = Some(ep);
        }

        self.parent_edge[v] = None;
        self.root = v;
    }

    /// Roots the tree at the skeleton holding original edge `e`, its copy becomes the
    /// reference edge of the root. Runs in time proportional to the distance between
    /// the old and the new root.
    pub fn root_tree_at_edge(&mut self, e: EdgeIndex) -> Result<usize, PreconditionViolation> {
        self.check_original_edge(e)?;
        if self.root_edge == Some(e) {
            return Ok(self.root);
        }

        let (v, sk_e) = self.real_edges[e.index()];
        self.make_root(v);
        self.skeletons[v].reference_edge = Some(sk_e);
        self.root_edge = Some(e);

        Ok(v)
    }

    /// Roots the tree at tree node `v`. The root has no reference edge afterwards.
    pub fn root_tree_at_node(&mut self, v: usize) -> Result<usize, PreconditionViolation> {
        self.check_tree_node(v)?;
        if self.root == v && self.root_edge.is_none() {
            return Ok(v);
        }

        self.make_root(v);
        self.skeletons[v].reference_edge = None;
        self.root_edge = None;

        Ok(v)
    }

    /// Orients edge `e` of skeleton `v` so that its source is `src`.
    pub fn direct_sk_edge(
        &mut self,
        v: usize,
        e: usize,
        src: usize,
    ) -> Result<(), PreconditionViolation> {
        self.check_tree_node(v)?;
        let skeleton = &mut self.skeletons[v];
        skeleton.check_edge(e)?;
        skeleton.check_node(src)?;

        let (s, t) = skeleton.graph.endpoints(e);
        if src != s && src != t {
            return Err(PreconditionViolation::NotAnEndpoint {
                tree_node: v,
                edge: e,
                node: src,
            });
        }

        if s != src {
            skeleton.graph.reverse_edge(e);
        }

        Ok(())
    }

    /// Subdivides edge `e = (a, b)` of skeleton `v` by a new node `w` and orients the
    /// two halves as `a -> w <- b`. `e` keeps its meaning and becomes `(a, w)`, the
    /// other half is a [`SkeletonEdge::Peak`]. Returns `w`.
    pub fn replace_sk_edge_by_peak(
        &mut self,
        v: usize,
        e: usize,
    ) -> Result<usize, PreconditionViolation> {
        self.check_tree_node(v)?;
        let skeleton = &mut self.skeletons[v];
        skeleton.check_edge(e)?;

        let f = skeleton.graph.split_edge(e);
        skeleton.graph.reverse_edge(f);
        skeleton.edge_kinds.push(SkeletonEdge::Peak);
        skeleton.original_nodes.push(None);

        let w = skeleton.graph.target(f);
        trace!("edge {} of skeleton {} replaced by peak at {}", e, v, w);

        Ok(w)
    }
}

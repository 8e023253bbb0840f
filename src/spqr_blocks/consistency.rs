use std::collections::VecDeque;

use fixedbitset::FixedBitSet;
use hashbrown::HashSet;
use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::{
    NodeType,
    error::Inconsistency,
    spqr_blocks::{outside_structures::SpqrTree, skeleton::{Skeleton, SkeletonEdge}},
};

fn unordered(a: NodeIndex, b: NodeIndex) -> (NodeIndex, NodeIndex) {
    if a <= b { (a, b) } else { (b, a) }
}

fn is_cycle(skeleton: &Skeleton) -> bool {
    let graph = &skeleton.graph;
    let n = graph.node_count();
    if n < 3 || graph.edge_count() != n || (0..n).any(|v| graph.degree(v) != 2) {
        return false;
    }

    // walk around the cycle starting at node 0
    let mut prev_edge = graph.adjacent_edges(0)[0];
    let mut v = graph.opposite(prev_edge, 0);
    let mut len = 1;
    while v != 0 {
        let next = graph.adjacent_edges(v)[0];
        prev_edge = if next == prev_edge {
            graph.adjacent_edges(v)[1]
        } else {
            next
        };
        v = graph.opposite(prev_edge, v);
        len += 1;
    }

    len == n
}

fn is_bond(skeleton: &Skeleton) -> bool {
    skeleton.graph.node_count() == 2 && skeleton.graph.edge_count() >= 3
}

/// Simple, at least 4 nodes, minimum degree 3. Full triconnectivity is checked by the
/// decomposition tests.
fn looks_rigid(skeleton: &Skeleton) -> bool {
    let graph = &skeleton.graph;
    let n = graph.node_count();
    if n < 4 || (0..n).any(|v| graph.degree(v) < 3) {
        return false;
    }

    let mut seen = HashSet::new();
    (0..graph.edge_count()).all(|e| {
        let (s, t) = graph.endpoints(e);
        seen.insert((s.min(t), s.max(t)))
    })
}

impl SpqrTree {
    /// Validates the structural invariants of the tree: every original edge is real in
    /// exactly one skeleton, every tree edge is a virtual edge pair with matching
    /// endpoints, skeletons have the shape of their type, no two adjacent tree nodes
    /// are both S or both P, and the rooting is consistent.
    ///
    /// Shape checks are skipped for skeletons containing a peak, endpoint checks for
    /// edges ending in a peak node.
    pub fn check_consistency(&self) -> Result<(), Inconsistency> {
        self.check_real_edges()?;
        self.check_tree_edges()?;
        self.check_skeleton_shapes()?;
        self.check_rooting()
    }

    fn check_real_edges(&self) -> Result<(), Inconsistency> {
        let mut occurrences = vec![0; self.original_edges.len()];
        for skeleton in &self.skeletons {
            for kind in &skeleton.edge_kinds {
                if let SkeletonEdge::Real(oe) = kind {
                    occurrences[oe.index()] += 1;
                }
            }
        }

        for (i, &cnt) in occurrences.iter().enumerate() {
            let oe = EdgeIndex::new(i);
            if cnt != 1 {
                return Err(Inconsistency::RealEdgeCount(oe, cnt));
            }

            let (v, e) = self.real_edges[i];
            let skeleton = &self.skeletons[v];
            if skeleton.edge_kinds.get(e) != Some(&SkeletonEdge::Real(oe)) {
                return Err(Inconsistency::RealEdgeIndex(oe));
            }

            if let Some((s, t)) = skeleton.original_endpoints(e) {
                let (a, b) = self.original_edges[i];
                if unordered(s, t) != unordered(a, b) {
                    return Err(Inconsistency::RealEdgeEndpoints(oe));
                }
            }
        }

        Ok(())
    }

    fn check_tree_edges(&self) -> Result<(), Inconsistency> {
        for (t, tree_edge) in self.tree_edges.iter().enumerate() {
            let [(v, ev), (w, ew)] = tree_edge.ends;
            let paired = v != w
                && self.skeletons[v].edge_kinds.get(ev) == Some(&SkeletonEdge::Virtual(t))
                && self.skeletons[w].edge_kinds.get(ew) == Some(&SkeletonEdge::Virtual(t))
                && self.adj[v].contains(&t)
                && self.adj[w].contains(&t);
            if !paired {
                return Err(Inconsistency::TreeEdgePairing(t));
            }

            let ends_v = self.skeletons[v].original_endpoints(ev);
            let ends_w = self.skeletons[w].original_endpoints(ew);
            if let (Some((a, b)), Some((c, d))) = (ends_v, ends_w) {
                if unordered(a, b) != unordered(c, d) {
                    return Err(Inconsistency::TreeEdgeEndpoints(t));
                }
            }
        }

        // a virtual edge not referenced back by its tree edge
        for (v, skeleton) in self.skeletons.iter().enumerate() {
            for (e, kind) in skeleton.edge_kinds.iter().enumerate() {
                if let SkeletonEdge::Virtual(t) = *kind {
                    let known = self
                        .tree_edges
                        .get(t)
                        .is_some_and(|tree_edge| tree_edge.ends.contains(&(v, e)));
                    if !known {
                        return Err(Inconsistency::TreeEdgePairing(t));
                    }
                }
            }
        }

        Ok(())
    }

    fn check_skeleton_shapes(&self) -> Result<(), Inconsistency> {
        for (v, skeleton) in self.skeletons.iter().enumerate() {
            if skeleton.has_peak() {
                continue;
            }

            let ok = match skeleton.node_type {
                NodeType::S => is_cycle(skeleton),
                NodeType::P => is_bond(skeleton),
                NodeType::R => looks_rigid(skeleton),
            };
            if !ok {
                return Err(Inconsistency::SkeletonShape(v, skeleton.node_type));
            }
        }

        for tree_edge in &self.tree_edges {
            let [(v, _), (w, _)] = tree_edge.ends;
            let node_type = self.skeletons[v].node_type;
            if node_type != NodeType::R && node_type == self.skeletons[w].node_type {
                return Err(Inconsistency::AdjacentSameType(v, w, node_type));
            }
        }

        Ok(())
    }

    fn check_rooting(&self) -> Result<(), Inconsistency> {
        let root = self.root;
        let root_ref = self.skeletons[root].reference_edge;
        let expected_root_ref = self.root_edge.map(|oe| self.real_edges[oe.index()]);
        if self.parent_edge[root].is_some()
            || root_ref.map(|e| (root, e)) != expected_root_ref
        {
            return Err(Inconsistency::ReferenceEdge(root));
        }

        let mut visited = FixedBitSet::with_capacity(self.skeletons.len());
        visited.insert(root);
        let mut queue = VecDeque::from([root]);

        while let Some(v) = queue.pop_front() {
            for &t in &self.adj[v] {
                if Some(t) == self.parent_edge[v] {
                    continue;
                }

                let (child, child_edge) = self.tree_edges[t].twin(v);
                if visited.put(child) {
                    // reached twice, the tree edges contain a cycle
                    return Err(Inconsistency::ReferenceEdge(child));
                }
                if self.parent_edge[child] != Some(t)
                    || self.skeletons[child].reference_edge != Some(child_edge)
                {
                    return Err(Inconsistency::ReferenceEdge(child));
                }

                queue.push_back(child);
            }
        }

        match (0..self.skeletons.len()).find(|&v| !visited.contains(v)) {
            Some(v) => Err(Inconsistency::Unreachable(v)),
            None => Ok(()),
        }
    }
}

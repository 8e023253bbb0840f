use petgraph::graph::UnGraph;
use petgraph::visit::EdgeRef;

use crate::{
    NodeType,
    block_cut::check_biconnected,
    error::InvalidInput,
    triconnected_blocks::{
        acceptable_adj::make_adjacency_lists_acceptable,
        graph_internal::GraphInternal,
        handle_duplicate_edges::handle_duplicate_edges,
        merge_components::merge_components,
        outside_structures::{Component, EdgeType, TriconnectedComponents},
        palm_dfs::run_palm_dfs,
        pathfinder::run_pathfinder,
    },
};

/// Entry of the triple stack: `(h, a, b)` describes a candidate type-2 separation
/// pair `(a, b)` whose split component spans the vertices numbered `a..=h`.
type Triple = (usize, usize, usize);

/// Pops triples with `a > cutoff`, returns the triple that replaces them.
fn pop_tstack(
    cutoff: usize,
    mut max_h: usize,
    mut last_b: usize,
    tstack: &mut Vec<Triple>,
) -> Triple {
    while let Some(&(h, a, b)) = tstack.last() {
        if a > cutoff {
            tstack.pop();
            max_h = h.max(max_h);
            last_b = b;
        } else {
            break;
        }
    }

    (max_h, cutoff, last_b)
}

/// State of the path search: the working graph, the edge stack and the split
/// components found so far. A new triple stack is opened for every path.
struct PathSearch<'a> {
    root: usize,
    vedges_cutoff: usize,
    graph: &'a mut GraphInternal,
    estack: Vec<usize>,
    split_components: &'a mut Vec<Component>,
}

/// A vertex whose outgoing edges are being walked by the path search.
///
/// `saved_tstack` is the triple stack of the parent, put aside while the tree edge
/// into `u` starts a new path.
struct Frame {
    u: usize,
    next: usize,
    tedges_left: usize,
    saved_tstack: Option<Vec<Triple>>,
}

impl PathSearch<'_> {
    fn open_frame(&self, u: usize, saved_tstack: Option<Vec<Triple>>) -> Frame {
        let tedges_left = self.graph.adj[u]
            .iter()
            .filter(|&&eid| self.graph.edge_type[eid] == Some(EdgeType::Tree))
            .count();

        Frame {
            u,
            next: 0,
            tedges_left,
            saved_tstack,
        }
    }

    /// Walks the palm tree from the root with an explicit stack of frames, splitting
    /// off components whenever a subtree is finished.
    fn find_components(&mut self) {
        let mut tstack: Vec<Triple> = Vec::new();
        let mut frames = vec![self.open_frame(self.root, None)];

        while let Some(frame) = frames.last_mut() {
            let u = frame.u;
            let next = self.graph.adj[u].get(frame.next).copied();
            frame.next += 1;

            // virtual edges are appended past the cutoff, we don't care about them here
            let Some(eid) = next.filter(|&eid| eid < self.vedges_cutoff) else {
                let Some(done) = frames.pop() else { break };
                if let Some(parent) = frames.last_mut() {
                    parent.tedges_left -= 1;
                    let (p, tedges_left) = (parent.u, parent.tedges_left);
                    self.finish_subtree(p, done, tedges_left, &mut tstack);
                }
                continue;
            };

            let to = self.graph.get_other_vertex(eid, u);
            let starts_path = self.graph.starts_path[eid];
            if starts_path {
                self.update_tstack(u, to, eid, &mut tstack);
            }

            if self.graph.edge_type[eid] == Some(EdgeType::Tree) {
                let saved = starts_path.then(|| std::mem::take(&mut tstack));
                let child = self.open_frame(to, saved);
                frames.push(child);
            } else {
                self.estack.push(eid);
            }
        }
    }

    /// Runs the split checks for the tree edge `u -> done.u` once its subtree is walked.
    fn finish_subtree(
        &mut self,
        u: usize,
        done: Frame,
        tedges_left: usize,
        tstack: &mut Vec<Triple>,
    ) {
        let to = done.u;

        // the tree edge could be killed by the multiple edge case in check_type_x
        let push_eid = self.graph.par_edge[to].expect("visited vertex has a parent edge");
        self.estack.push(push_eid);

        self.check_type_2(u, to, tstack);
        if let Some(saved) = done.saved_tstack {
            *tstack = saved;
        }
        self.check_type_1(u, to, tedges_left);

        self.check_highpoint(u, tstack);
    }

    fn update_tstack(&self, u: usize, to: usize, eid: usize, tstack: &mut Vec<Triple>) {
        let graph = &*self.graph;
        let triple = if graph.edge_type[eid] == Some(EdgeType::Tree) {
            pop_tstack(
                graph.low1[to],
                graph.num[to] + graph.sub[to] - 1,
                graph.num[u],
                tstack,
            )
        } else {
            pop_tstack(graph.num[to], graph.num[u], graph.num[u], tstack)
        };

        tstack.push(triple);
    }

    fn check_highpoint(&mut self, u: usize, tstack: &mut Vec<Triple>) {
        let u_high = self.graph.get_high(u);
        let u_num = self.graph.num[u];

        while let Some(&(h, a, b)) = tstack.last() {
            if a != u_num && b != u_num && u_high > h {
                tstack.pop();
            } else {
                break;
            }
        }
    }

    fn check_type_2(&mut self, u: usize, mut to: usize, tstack: &mut Vec<Triple>) {
        if u == self.root {
            return;
        }

        loop {
            let (h, a, b) = tstack.last().copied().unwrap_or((0, usize::MAX, 0));

            let graph = &*self.graph;
            let cond_1 = a == graph.num[u];
            let cond_2 = graph.deg[to] == 2
                && graph
                    .first_alive(self.root, to)
                    .is_some_and(|x| graph.num[x] > graph.num[to]);

            if !(cond_1 || cond_2) {
                break;
            }
            if cond_1 && graph.par[graph.numrev[b]] == Some(u) {
                tstack.pop();
                continue;
            }

            let mut eab = None;
            let mut evirt;
            if cond_2 {
                to = self
                    .graph
                    .first_alive(self.root, to)
                    .expect("degree two vertex has a child");

                let mut component = Component::new(Some(NodeType::S));

                for _ in 0..2 {
                    let eid = self.estack.pop().expect("path edges are on the stack");
                    component.push_edge(eid, self.graph, false);
                }

                evirt = self.graph.new_edge(u, to, None);
                component.push_edge(evirt, self.graph, true);

                component.commit(self.split_components);

                if let Some(&eid) = self.estack.last() {
                    if self.graph.edges[eid] == (to, u) {
                        self.estack.pop();
                        eab = Some(eid);
                    }
                }
            } else {
                to = self.graph.numrev[b];
                tstack.pop();

                let u_num = self.graph.num[u];
                let mut component = Component::new(None);
                while let Some(&eid) = self.estack.last() {
                    let (x, y) = self.graph.edges[eid];

                    let x_in_subtree = u_num <= self.graph.num[x] && self.graph.num[x] <= h;
                    let y_in_subtree = u_num <= self.graph.num[y] && self.graph.num[y] <= h;
                    if !(x_in_subtree && y_in_subtree) {
                        break;
                    }

                    self.estack.pop();

                    if x == u && y == to || y == u && x == to {
                        eab = Some(eid);
                    } else {
                        component.push_edge(eid, self.graph, false);
                    }
                }

                evirt = self.graph.new_edge(u, to, None);
                component.push_edge(evirt, self.graph, true);
                component.commit(self.split_components);
            }

            if let Some(eab) = eab {
                let mut component = Component::new(Some(NodeType::P));
                component.push_edge(eab, self.graph, false);

                component.push_edge(evirt, self.graph, false); // is an old vedge

                evirt = self.graph.new_edge(u, to, None);
                component.push_edge(evirt, self.graph, true);

                component.commit(self.split_components);
            }

            self.estack.push(evirt);
            self.graph.make_tedge(evirt);
        }
    }

    fn check_type_1(&mut self, u: usize, to: usize, t_edges_left: usize) {
        let graph = &*self.graph;
        if !(graph.low2[to] >= graph.num[u]
            && graph.low1[to] < graph.num[u]
            && (Some(self.root) != graph.par[u] || t_edges_left != 0))
        {
            return;
        }

        let subtree = graph.num[to]..graph.num[to] + graph.sub[to];
        let lowpoint = graph.numrev[graph.low1[to]];

        let mut component = Component::new(None);
        while let Some(&eid) = self.estack.last() {
            let (x, y) = self.graph.edges[eid];
            if !(subtree.contains(&self.graph.num[x]) || subtree.contains(&self.graph.num[y])) {
                break;
            }

            self.estack.pop();
            component.push_edge(eid, self.graph, false);
        }

        let mut evirt = self.graph.new_edge(u, lowpoint, None);
        component.push_edge(evirt, self.graph, true);

        component.commit(self.split_components);

        if let Some(&eid) = self.estack.last() {
            let (x, y) = self.graph.edges[eid];
            if (x == u && y == lowpoint) || (y == u && x == lowpoint) {
                self.estack.pop();
                let mut component = Component::new(Some(NodeType::P));

                component.push_edge(eid, self.graph, false);

                component.push_edge(evirt, self.graph, false); // is an old vedge

                evirt = self.graph.new_edge(u, lowpoint, None);
                component.push_edge(evirt, self.graph, true);

                component.commit(self.split_components);
            }
        }

        let parent = self.graph.par[u];
        if Some(lowpoint) != parent {
            self.estack.push(evirt);

            self.graph.make_bedge(evirt);
        } else {
            let parent_edge = self.graph.par_edge[u].expect("non-root vertex has a parent edge");

            let mut component = Component::new(Some(NodeType::P));

            component.push_edge(parent_edge, self.graph, false);

            component.push_edge(evirt, self.graph, false); // is an old vedge

            evirt = self.graph.new_edge(lowpoint, u, None);
            component.push_edge(evirt, self.graph, true);

            component.commit(self.split_components);

            self.graph.make_tedge(evirt);
        }
    }
}

/// Computes the triconnected components of a biconnected, loopless undirected multigraph.
///
/// # Overview
///
/// A pair of vertices `(s, t)` is called a *split-pair* if removing both `s` and `t`
/// disconnects the graph, or there are multiple edges directly connecting `s` and `t`.
///
/// When a split-pair `(s, t)` is found, the graph is split into components at `s` and `t`.
/// For each resulting component, a new *virtual* edge `(s, t)` is added to keep it
/// biconnected. The components can be glued back together along the virtual edges.
///
/// ## Component Types
/// After recursively splitting on all split-pairs, the *split components* are:
/// - **P**: two vertices with exactly three edges between them,
/// - **S**: a triangle,
/// - **R**: a simple triconnected graph.
///
/// Merging bonds with bonds and polygons with polygons (along shared virtual edges)
/// gives the unique triconnected components.
///
/// ## Output
/// Edge `i < graph.edge_count()` of the result is edge `i` of `graph`.
///
/// ## Reference
/// - [Hopcroft, J., & Tarjan, R. (1973). Dividing a Graph into Triconnected Components. SIAM Journal on Computing, 2(3), 135–158.](https://epubs.siam.org/doi/10.1137/0202012)
/// - [Gutwenger, C., & Mutzel, P. (2001). A Linear Time Implementation of SPQR-Trees.](https://doi.org/10.1007/3-540-44541-2_8)
pub fn get_triconnected_components<N, E>(
    in_graph: &UnGraph<N, E>,
) -> Result<TriconnectedComponents, InvalidInput> {
    check_biconnected(in_graph)?;

    let n = in_graph.node_count();
    let m = in_graph.edge_count();
    let root = 0;

    if n == 2 {
        // a single bond
        let edges = in_graph
            .edge_references()
            .map(|e| {
                let (s, t) = (e.source().index(), e.target().index());
                (s.min(t), s.max(t))
            })
            .collect();

        let mut component = Component::new(Some(NodeType::P));
        component.edges = (0..m).collect();

        return Ok(TriconnectedComponents::new(vec![component], edges, m));
    }

    let mut split_components = Vec::new();
    let mut graph = GraphInternal::from_petgraph(in_graph);

    handle_duplicate_edges(&mut graph, &mut split_components);

    // first dfs, computes num, low1, low2, sub, par, deg, edge_type and fixes the edges' direction
    run_palm_dfs(&mut graph, root);

    // compute acceptable adjacency list structure
    make_adjacency_lists_acceptable(&mut graph);

    // pathfinder part: calculate high(v), newnum(v), starts_path(e)
    run_pathfinder(root, &mut graph);

    let vedges_cutoff = graph.m;
    let mut search = PathSearch {
        root,
        vedges_cutoff,
        graph: &mut graph,
        estack: Vec::new(),
        split_components: &mut split_components,
    };
    search.find_components();

    let mut estack = std::mem::take(&mut search.estack);
    let mut component = Component::new(None);
    while let Some(eid) = estack.pop() {
        component.push_edge(eid, &mut graph, false);
    }
    component.commit(&mut split_components);

    log::trace!(
        "{} split components before merging, {} virtual edges",
        split_components.len(),
        graph.m - m
    );

    let components = merge_components(graph.m, split_components);

    Ok(TriconnectedComponents::new(components, graph.edges, m))
}

#[cfg(test)]
mod tests {
    use petgraph::visit::{IntoNodeReferences, NodeIndexable};

    use crate::{
        UnGraph,
        testing::{
            graph_enumerator::GraphEnumeratorState, grids::generate_grid_graph,
            random_graphs::random_biconnected_graph,
        },
    };

    use super::*;

    fn are_triconnected_brute(in_graph: &UnGraph) -> Vec<Vec<bool>> {
        let n = in_graph.node_references().count();
        let mut res: Vec<Vec<bool>> = vec![vec![false; n]; n];
        let mut cap = vec![vec![0; n * 2]; n * 2]; // indices from 0 to n-1 are 'ins', rest are 'outs'

        for (u, v) in in_graph
            .edge_references()
            .map(|e| (e.source().index(), e.target().index()))
        {
            cap[u + n][v] += 1;
            cap[v + n][u] += 1;
        }
        for u in 0..n {
            cap[u][u + n] += 1; // ins to outs
        }

        fn is_3_conn(s: usize, t: usize, cap: &[Vec<usize>]) -> bool {
            let mut cap = cap.to_vec();
            let mut vis = vec![false; cap.len()];
            fn dfs(u: usize, t: usize, cap: &mut Vec<Vec<usize>>, vis: &mut Vec<bool>) -> bool {
                vis[u] = true;
                if u == t {
                    return true;
                }
                for v in 0..cap.len() {
                    if !vis[v] && cap[u][v] > 0 && dfs(v, t, cap, vis) {
                        cap[u][v] -= 1;
                        cap[v][u] += 1;
                        return true;
                    }
                }
                false
            }
            for _ in 0..3 {
                if !dfs(s + cap.len() / 2, t, &mut cap, &mut vis) {
                    return false;
                }
                vis.fill(false);
            }
            true
        }

        for u in 0..n {
            for v in 0..n {
                if u == v {
                    continue;
                }
                res[u][v] = is_3_conn(u, v, &cap);
            }
        }

        res
    }

    fn answer_fast(n: usize, tricon: &TriconnectedComponents) -> Vec<Vec<bool>> {
        let mut res = vec![vec![false; n]; n];

        for c in &tricon.components {
            if c.component_type == Some(NodeType::S) {
                // not triconnected
                continue;
            }

            let mut vertex_set = Vec::new();
            for e in c.edges.iter() {
                let (u, v) = tricon.edges[*e];
                vertex_set.push(u);
                vertex_set.push(v);
            }
            vertex_set.sort();
            vertex_set.dedup();

            for &x in &vertex_set {
                for &y in &vertex_set {
                    if x != y {
                        res[x][y] = true;
                    }
                }
            }
        }

        res
    }

    fn is_splitpair(in_graph: &UnGraph, s: usize, t: usize) -> bool {
        let n = in_graph.node_references().count();
        let mut vis = vec![false; n];
        fn dfs(u: usize, in_graph: &UnGraph, vis: &mut Vec<bool>) {
            vis[u] = true;
            for v in in_graph.neighbors(in_graph.from_index(u)) {
                if !vis[v.index()] {
                    dfs(v.index(), in_graph, vis);
                }
            }
        }

        vis[s] = true;
        vis[t] = true;

        if let Some(i) = (0..n).find(|&i| i != s && i != t) {
            dfs(i, in_graph, &mut vis);
        }

        let direct_cnt = in_graph
            .neighbors(in_graph.from_index(s))
            .filter(|v| v.index() == t)
            .count();

        vis.iter().any(|&v| !v) || direct_cnt > 1
    }

    fn nodes_of(tricon: &TriconnectedComponents, c: &Component) -> Vec<usize> {
        let mut nodes = vec![];
        for &eid in &c.edges {
            let (s, t) = tricon.edges[eid];
            nodes.push(s);
            nodes.push(t);
        }
        nodes.sort();
        nodes.dedup();
        nodes
    }

    fn verify_components(in_graph: &UnGraph, tricon: &TriconnectedComponents) {
        let n = in_graph.node_references().count();
        let m = tricon.edges.len();

        let mut edges_occs = vec![0; m];
        for c in &tricon.components {
            for &eid in &c.edges {
                edges_occs[eid] += 1;
            }

            let nodes = nodes_of(tricon, c);
            match c.component_type {
                Some(NodeType::P) => {
                    assert_eq!(nodes.len(), 2);
                    assert!(c.edges.len() >= 3);
                }
                Some(NodeType::S) => {
                    assert!(nodes.len() >= 3);
                    assert_eq!(c.edges.len(), nodes.len());

                    let mut deg = vec![0; n];
                    for &eid in &c.edges {
                        let (s, t) = tricon.edges[eid];
                        deg[s] += 1;
                        deg[t] += 1;
                    }

                    assert!(deg.iter().all(|&d| d == 0 || d == 2));
                }
                Some(NodeType::R) => assert!(nodes.len() >= 4),
                None => panic!("component without type"),
            }
        }

        // every real edge exactly once, every surviving virtual edge exactly twice
        for (eid, cnt) in edges_occs.iter().enumerate() {
            if eid < tricon.real_edges {
                assert_eq!(*cnt, 1);
            } else {
                assert!(*cnt == 0 || *cnt == 2);
            }
            // if an edge occurs twice, then it's a vedge -- thus, a split pair.
            if *cnt == 2 {
                let (s, t) = tricon.edges[eid];
                assert!(is_splitpair(in_graph, s, t));
            }
        }

        // no bond next to a bond, no polygon next to a polygon
        let mut owner = vec![Vec::new(); m];
        for (i, c) in tricon.components.iter().enumerate() {
            for &eid in &c.edges {
                owner[eid].push(i);
            }
        }
        for comps in owner.iter().filter(|c| c.len() == 2) {
            let (a, b) = (&tricon.components[comps[0]], &tricon.components[comps[1]]);
            assert!(
                a.component_type != b.component_type || a.component_type == Some(NodeType::R)
            );
        }
    }

    fn check_graph(in_graph: &UnGraph) {
        let tricon = get_triconnected_components(in_graph).unwrap();
        verify_components(in_graph, &tricon);

        let n = in_graph.node_references().count();
        let brute_mat = are_triconnected_brute(in_graph);
        let fast_mat = answer_fast(n, &tricon);

        assert_eq!(brute_mat, fast_mat);
    }

    #[cfg(all(test, not(debug_assertions)))]
    #[test]
    fn test_triconnected_components() {
        for i in 0..1000 {
            let n = 2 + i / 10;
            let m: usize = n + 1 + i % 20;

            check_graph(&random_biconnected_graph(n, m, i));
        }
    }

    #[test]
    fn test_triconnected_components_light() {
        for i in 0..100 {
            let n = 2 + i / 10;
            let m: usize = n + 1 + i % 7;

            check_graph(&random_biconnected_graph(n, m, i));
        }
    }

    #[test]
    fn test_triconnected_components_exhaustive_small() {
        for n in 3..=5 {
            let mut enumerator = GraphEnumeratorState::new(n);

            while let Some(in_graph) = enumerator.next() {
                if check_biconnected(&in_graph).is_err() {
                    continue;
                }
                check_graph(&in_graph);
            }
        }
    }

    #[cfg(all(test, not(debug_assertions)))]
    #[test]
    fn test_triconnected_components_exhaustive() {
        for n in 6..=7 {
            let mut enumerator = GraphEnumeratorState::new(n);

            while let Some(in_graph) = enumerator.next() {
                if check_biconnected(&in_graph).is_err() {
                    continue;
                }
                check_graph(&in_graph);
            }
        }
    }

    #[test]
    fn test_grids() {
        for (rows, cols) in [(2, 2), (2, 5), (3, 3), (4, 5)] {
            check_graph(&generate_grid_graph(rows, cols));
        }
    }

    #[test]
    fn test_not_biconnected() {
        let mut graph = UnGraph::new_undirected();
        let a = graph.add_node(0);
        let b = graph.add_node(1);
        let c = graph.add_node(2);
        graph.add_edge(a, b, crate::EdgeLabel::Real);
        graph.add_edge(b, c, crate::EdgeLabel::Real);
        graph.add_edge(b, c, crate::EdgeLabel::Real);

        assert_eq!(
            get_triconnected_components(&graph).unwrap_err(),
            InvalidInput::CutVertex(b)
        );
    }
}

/// Small directed multigraph backing a skeleton.
///
/// Nodes and edges are numbered from `0` and never removed. `adj[v]` holds the
/// edges incident to `v` in rotation order, an edge keeps its slot when it is
/// reversed.
#[derive(Debug, Clone, Default)]
pub struct SkeletonGraph {
    edges: Vec<(usize, usize)>, // (source, target)
    adj: Vec<Vec<usize>>,
}

impl SkeletonGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.adj.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_node(&self, v: usize) -> bool {
        v < self.adj.len()
    }

    pub fn contains_edge(&self, e: usize) -> bool {
        e < self.edges.len()
    }

    pub fn new_node(&mut self) -> usize {
        self.adj.push(Vec::new());
        self.adj.len() - 1
    }

    pub fn new_edge(&mut self, s: usize, t: usize) -> usize {
        debug_assert!(s != t);
        let eid = self.edges.len();

        self.edges.push((s, t));
        self.adj[s].push(eid);
        self.adj[t].push(eid);

        eid
    }

    pub fn source(&self, e: usize) -> usize {
        self.edges[e].0
    }

    pub fn target(&self, e: usize) -> usize {
        self.edges[e].1
    }

    pub fn endpoints(&self, e: usize) -> (usize, usize) {
        self.edges[e]
    }

    pub fn opposite(&self, e: usize, v: usize) -> usize {
        let (s, t) = self.edges[e];
        if s == v { t } else { s }
    }

    /// Edges incident to `v` in rotation order.
    pub fn adjacent_edges(&self, v: usize) -> &[usize] {
        &self.adj[v]
    }

    pub fn degree(&self, v: usize) -> usize {
        self.adj[v].len()
    }

    pub fn reverse_edge(&mut self, e: usize) {
        let (s, t) = self.edges[e];
        self.edges[e] = (t, s);
    }

    /// Subdivides `e = (u, v)` by a new node `w`: `e` becomes `(u, w)` and the
    /// returned edge `(w, v)` takes the place of `e` in the rotation of `v`.
    pub fn split_edge(&mut self, e: usize) -> usize {
        let (u, v) = self.edges[e];
        let w = self.new_node();

        let f = self.edges.len();
        self.edges.push((w, v));
        self.edges[e] = (u, w);

        if let Some(slot) = self.adj[v].iter_mut().find(|eid| **eid == e) {
            *slot = f;
        }
        self.adj[w].push(e);
        self.adj[w].push(f);

        f
    }
}

use petgraph::graph::{NodeIndex, Neighbors, UnGraph};
use petgraph::visit::EdgeRef;

use crate::error::InvalidInput;

struct Frame<'a, E> {
    u: usize,
    parent: Option<usize>,
    neighbors: Neighbors<'a, E>,
    /// lowest preorder reachable from the subtree of `u` seen so far [lowpoint]
    low: usize,
    is_potential_cut: bool,
}

impl<'a, E> Frame<'a, E> {
    fn new<N>(graph: &'a UnGraph<N, E>, u: usize, parent: Option<usize>, preorder: usize) -> Self {
        Self {
            u,
            parent,
            neighbors: graph.neighbors(NodeIndex::new(u)),
            low: preorder,
            // the root is a cut vertex only with more than one dfs tree child
            is_potential_cut: parent.is_some(),
        }
    }
}

/// Depth-first search from `root` with an explicit stack, returns the number of
/// visited vertices.
///
/// The first cut vertex found is stored in `cut`.
fn dfs<N, E>(
    graph: &UnGraph<N, E>,
    root: usize,
    preorder: &mut [usize],
    cut: &mut Option<usize>,
) -> usize {
    let mut time = 0;
    preorder[root] = time;
    time += 1;
    let mut stack = vec![Frame::new(graph, root, None, preorder[root])];

    while let Some(frame) = stack.last_mut() {
        let u = frame.u;
        match frame.neighbors.next().map(|n| n.index()) {
            Some(v) if preorder[v] == usize::MAX => {
                preorder[v] = time;
                time += 1;
                stack.push(Frame::new(graph, v, Some(u), preorder[v]));
            }
            Some(v) => {
                if Some(v) != frame.parent {
                    // back edge
                    frame.low = frame.low.min(preorder[v]);
                }
            }
            None => {
                let Some(done) = stack.pop() else { break };
                if let Some(parent) = stack.last_mut() {
                    // maybe some descendant of u has lower lowpoint
                    parent.low = parent.low.min(done.low);
                    if done.low >= preorder[parent.u] && parent.is_potential_cut && cut.is_none() {
                        *cut = Some(parent.u);
                    }
                    parent.is_potential_cut = true;
                }
            }
        }
    }

    time
}

/// Checks the preconditions of the decomposition: at least 3 edges, no self-loops,
/// connected and without cut vertices.
///
/// Parallel edges are allowed.
pub fn check_biconnected<N, E>(graph: &UnGraph<N, E>) -> Result<(), InvalidInput> {
    let m = graph.edge_count();
    if m < 3 {
        return Err(InvalidInput::TooFewEdges(m));
    }

    if let Some(e) = graph.edge_references().find(|e| e.source() == e.target()) {
        return Err(InvalidInput::SelfLoop(e.id()));
    }

    let n = graph.node_count();
    let mut preorder = vec![usize::MAX; n];
    let mut cut = None;
    let visited = dfs(graph, 0, &mut preorder, &mut cut);

    if visited != n {
        return Err(InvalidInput::Disconnected);
    }
    if let Some(u) = cut {
        return Err(InvalidInput::CutVertex(NodeIndex::new(u)));
    }

    Ok(())
}

#[cfg(test)]
mod dfs_tests {
    use super::*;
    use crate::{EdgeLabel, UnGraph};

    fn run_dfs(g: &UnGraph, start: usize) -> Option<usize> {
        let mut preorder = vec![usize::MAX; g.node_count()];
        let mut cut = None;
        dfs(g, start, &mut preorder, &mut cut);
        cut
    }

    fn graph_from_edges(n: u32, edges: &[(u32, u32)]) -> UnGraph {
        let mut g = UnGraph::new_undirected();
        for i in 0..n {
            g.add_node(i);
        }
        for &(u, v) in edges {
            g.add_edge(NodeIndex::new(u as usize), NodeIndex::new(v as usize), EdgeLabel::Real);
        }
        g
    }

    #[test]
    fn test_dfs_triangle() {
        let g = graph_from_edges(3, &[(0, 1), (1, 2), (2, 0)]);
        assert_eq!(run_dfs(&g, 0), None);
        assert_eq!(check_biconnected(&g), Ok(()));
    }

    #[test]
    fn test_dfs_with_cut_vertex() {
        let g = graph_from_edges(3, &[(0, 1), (1, 2)]);
        assert_eq!(run_dfs(&g, 0), Some(1));
    }

    #[test]
    fn test_dfs_root_cut_vertex() {
        let g = graph_from_edges(3, &[(0, 1), (0, 2)]);
        assert_eq!(run_dfs(&g, 0), Some(0));
    }

    #[test]
    fn test_dfs_complex_graph() {
        // 1----\        /---- 4
        // |     0 ---- 3      |
        // 2----/        \---- 5
        let g = graph_from_edges(
            6,
            &[(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3), (0, 3)],
        );
        let cut = run_dfs(&g, 0);
        assert!(cut == Some(0) || cut == Some(3));
        assert!(matches!(
            check_biconnected(&g),
            Err(InvalidInput::CutVertex(_))
        ));
    }

    #[test]
    fn test_two_triangles_sharing_a_vertex() {
        let g = graph_from_edges(5, &[(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 2)]);
        assert_eq!(
            check_biconnected(&g),
            Err(InvalidInput::CutVertex(NodeIndex::new(2)))
        );
    }

    #[test]
    fn test_too_few_edges() {
        let g = graph_from_edges(2, &[(0, 1), (0, 1)]);
        assert_eq!(check_biconnected(&g), Err(InvalidInput::TooFewEdges(2)));
    }

    #[test]
    fn test_self_loop() {
        let g = graph_from_edges(3, &[(0, 1), (1, 2), (2, 0), (1, 1)]);
        assert!(matches!(check_biconnected(&g), Err(InvalidInput::SelfLoop(_))));
    }

    #[test]
    fn test_disconnected() {
        let g = graph_from_edges(5, &[(0, 1), (1, 2), (2, 0)]);
        assert_eq!(check_biconnected(&g), Err(InvalidInput::Disconnected));
    }

    #[test]
    fn test_parallel_edges_are_fine() {
        let g = graph_from_edges(2, &[(0, 1), (0, 1), (1, 0)]);
        assert_eq!(check_biconnected(&g), Ok(()));
    }

    #[test]
    fn test_long_cycle() {
        let n = 200_000;
        let edges: Vec<_> = (0..n).map(|i| (i, (i + 1) % n)).collect();
        let g = graph_from_edges(n, &edges);
        assert_eq!(check_biconnected(&g), Ok(()));
    }

    #[test]
    fn test_long_path_has_cut_vertex() {
        let n = 200_000;
        let edges: Vec<_> = (0..n - 1).map(|i| (i, i + 1)).collect();
        let g = graph_from_edges(n, &edges);
        assert!(matches!(
            check_biconnected(&g),
            Err(InvalidInput::CutVertex(_))
        ));
    }
}

use std::mem;

use crate::triconnected_blocks::{graph_internal::GraphInternal, outside_structures::EdgeType};

fn enter(u: usize, time: &mut usize, graph: &mut GraphInternal) {
    graph.num[u] = *time;
    graph.low1[u] = *time;
    graph.low2[u] = *time;
    graph.sub[u] = 1;
    *time += 1;
}

/// Folds the finished subtree of the tree child `to` into `u`.
fn leave(u: usize, to: usize, graph: &mut GraphInternal) {
    graph.sub[u] += graph.sub[to];

    if graph.low1[to] < graph.low1[u] {
        graph.low2[u] = graph.low1[u].min(graph.low2[to]);
        graph.low1[u] = graph.low1[to];
    } else if graph.low1[to] == graph.low1[u] {
        graph.low2[u] = graph.low2[u].min(graph.low2[to]);
    } else {
        graph.low2[u] = graph.low2[u].min(graph.low1[to]);
    }
}

/// Depth-first walk from `root` with an explicit stack of `(vertex, next adjacency index)`.
fn dfs(root: usize, graph: &mut GraphInternal) {
    let mut time = 0;
    enter(root, &mut time, graph);
    let mut stack = vec![(root, 0)];

    while let Some((u, next)) = stack.last_mut() {
        let u = *u;
        let Some(&eid) = graph.adj[u].get(*next) else {
            stack.pop();
            if let Some(&(p, _)) = stack.last() {
                leave(p, u, graph);
            }
            continue;
        };
        *next += 1;

        if graph.edge_type[eid].is_some() {
            continue; // already visited or killed
        }

        let to = graph.get_other_vertex(eid, u);
        if graph.num[to] == usize::MAX {
            // tree edge
            graph.par_edge[to] = Some(eid);
            graph.par[to] = Some(u);
            graph.edge_type[eid] = Some(EdgeType::Tree);

            enter(to, &mut time, graph);
            stack.push((to, 0));
        } else {
            // back edge (upwards)
            graph.edge_type[eid] = Some(EdgeType::Back);

            if graph.num[to] < graph.low1[u] {
                graph.low2[u] = graph.low1[u];
                graph.low1[u] = graph.num[to];
            } else if graph.num[to] > graph.low1[u] {
                graph.low2[u] = graph.low2[u].min(graph.num[to]);
            }
        }
    }
}

/// Given a graph, this function calculates the `palm tree` of the graph using a DFS algorithm.
///
/// In particular, it calculates the values needed further in the algorithm:
/// - `num[u]` - the order of the vertex in the DFS traversal (preorder number)
/// - `low1[u]` - the lowest `num` value reachable from `u` via tree edges followed by one back edge
/// - `low2[u]` - the second lowest `num` value reachable the same way
/// - `sub[u]` - the size of the subtree rooted at `u`
///
/// It also determines the type of each edge in the graph, which can be either `Tree` or `Back`,
/// and makes tree edges point downwards and back edges upwards.
pub(crate) fn run_palm_dfs(graph: &mut GraphInternal, root: usize) {
    dfs(root, graph);

    for (eid, edge) in graph.edges.iter_mut().enumerate() {
        let (s, t) = *edge;
        if (graph.edge_type[eid] == Some(EdgeType::Back) && graph.num[s] < graph.num[t])
            || (graph.edge_type[eid] == Some(EdgeType::Tree) && graph.num[s] > graph.num[t])
        {
            mem::swap(&mut edge.0, &mut edge.1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palm_dfs_on_square_with_diagonal() {
        // 0 - 1 - 2 - 3 - 0 and 0 - 2
        let mut graph = GraphInternal::new(4);
        for (s, t) in [(0, 1), (1, 2), (2, 3), (0, 3), (0, 2)] {
            let eid = graph.new_edge(s, t, None);
            graph.adj[t].push(eid);
        }

        run_palm_dfs(&mut graph, 0);

        assert_eq!(graph.num, vec![0, 1, 2, 3]);
        assert_eq!(graph.sub, vec![4, 3, 2, 1]);
        assert_eq!(graph.low1, vec![0, 0, 0, 0]);
        assert_eq!(graph.low2, vec![0, 1, 2, 3]);
        assert_eq!(graph.par, vec![None, Some(0), Some(1), Some(2)]);

        let tree_edges = graph
            .edge_type
            .iter()
            .filter(|&&t| t == Some(EdgeType::Tree))
            .count();
        assert_eq!(tree_edges, 3);
        // back edges point upwards
        assert_eq!(graph.edges[3], (3, 0));
        assert_eq!(graph.edges[4], (2, 0));
    }
}

use crate::triconnected_blocks::{graph_internal::GraphInternal, outside_structures::EdgeType};

/// Walks the palm tree in adjacency order, marks the edges that start a new path and
/// fills the frond lists. Returns the new number of every vertex: vertices are numbered
/// `n - 1, n - 2, ..` in the order their subtrees are finished.
fn walk_paths(root: usize, graph: &mut GraphInternal) -> Vec<usize> {
    let mut newnum = vec![0; graph.n];
    let mut unassigned = graph.n;

    // (vertex, next adjacency index, head of the edge continuing the current path)
    let mut stack = vec![(root, 0, None)];

    while let Some((u, next, path_head)) = stack.last_mut() {
        let u = *u;
        let Some(&eid) = graph.adj[u].get(*next) else {
            stack.pop();
            unassigned -= 1;
            newnum[u] = unassigned;
            continue;
        };
        *next += 1;

        let to = graph.get_other_vertex(eid, u);
        if Some(to) != *path_head {
            graph.starts_path[eid] = true;
        }

        if graph.edge_type[eid] == Some(EdgeType::Tree) {
            let head = graph.first_alive(root, to);
            stack.push((to, 0, head));
        } else {
            // fronds only, tree edges were oriented downwards
            graph.high[to].push(eid);
        }
    }

    newnum
}

/// Calculates `starts_path(e)`, the `high` lists and renumbers the vertices so that
/// the subtree of `v` occupies `num[v]..num[v] + sub[v]` and the children visited
/// first get the highest numbers.
pub(crate) fn run_pathfinder(root: usize, graph: &mut GraphInternal) {
    let newnum = walk_paths(root, graph);

    let mut renumber = vec![0; graph.n];
    for (&old, &new) in graph.num.iter().zip(&newnum) {
        renumber[old] = new;
    }

    for u in 0..graph.n {
        graph.low1[u] = renumber[graph.low1[u]];
        graph.low2[u] = renumber[graph.low2[u]];
        graph.num[u] = newnum[u];
        graph.numrev[newnum[u]] = u;
        // the first visited frond is the highpoint, keep it on top
        graph.high[u].reverse();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triconnected_blocks::{
        acceptable_adj::make_adjacency_lists_acceptable, palm_dfs::run_palm_dfs,
    };

    fn prepared(n: usize, edges: &[(usize, usize)]) -> GraphInternal {
        let mut graph = GraphInternal::new(n);
        for &(s, t) in edges {
            let eid = graph.new_edge(s, t, None);
            graph.adj[t].push(eid);
        }
        run_palm_dfs(&mut graph, 0);
        make_adjacency_lists_acceptable(&mut graph);
        graph
    }

    #[test]
    fn test_subtrees_are_number_intervals() {
        let mut graph = prepared(5, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0), (1, 3), (0, 2)]);
        run_pathfinder(0, &mut graph);

        for u in 0..graph.n {
            assert_eq!(graph.numrev[graph.num[u]], u);
            if let Some(p) = graph.par[u] {
                let parent_range = graph.num[p]..graph.num[p] + graph.sub[p];
                assert!(parent_range.contains(&graph.num[u]));
                assert!(graph.num[u] + graph.sub[u] <= graph.num[p] + graph.sub[p]);
            }
        }
        assert_eq!(graph.num[0], 0);
    }

    #[test]
    fn test_long_path_is_one_path() {
        let n = 50_000;
        let edges: Vec<_> = (0..n).map(|i| (i, (i + 1) % n)).collect();
        let mut graph = prepared(n, &edges);
        run_pathfinder(0, &mut graph);

        // the tree edges and the closing frond form a single path
        let starting = graph.starts_path.iter().filter(|&&s| s).count();
        assert_eq!(starting, 1);
        for u in 0..n {
            assert_eq!(graph.num[u], u);
        }
        assert_eq!(graph.high[0].len(), 1);
    }
}

use crate::triconnected_blocks::{graph_internal::GraphInternal, outside_structures::EdgeType};

/// Sort key of an oriented edge `u -> to`. A child whose `low2` is also below `u`
/// comes before the fronds into its `low1`, any other child after them.
fn phi(graph: &GraphInternal, eid: usize) -> usize {
    let (u, to) = graph.edges[eid];
    match graph.edge_type[eid] {
        Some(EdgeType::Tree) if graph.low2[to] < graph.num[u] => 3 * graph.low1[to],
        Some(EdgeType::Tree) => 3 * graph.low1[to] + 2,
        _ => 3 * graph.num[to] + 1,
    }
}

/// Reorders the outgoing edges of every vertex by `phi`, so that the children
/// with the lowest `low1` come first and fronds are interleaved by their targets.
/// Ties keep the edge id order.
pub(crate) fn make_adjacency_lists_acceptable(graph: &mut GraphInternal) {
    let mut order: Vec<usize> = (0..graph.edges.len())
        .filter(|&eid| graph.edge_type[eid] != Some(EdgeType::Killed))
        .collect();
    radsort::sort_by_key(&mut order, |&eid| phi(graph, eid));

    let mut adj = vec![Vec::new(); graph.n];
    for eid in order {
        adj[graph.edges[eid].0].push(eid);
    }

    graph.adj = adj;
}

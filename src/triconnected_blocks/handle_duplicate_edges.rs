use crate::{
    NodeType,
    triconnected_blocks::{graph_internal::GraphInternal, outside_structures::Component},
};

/// Splits off every group of parallel edges as a bond.
///
/// Each group is replaced by one virtual edge. Also (re)builds the undirected
/// adjacency lists used by the palm tree DFS.
pub(crate) fn handle_duplicate_edges(
    graph: &mut GraphInternal,
    split_components: &mut Vec<Component>,
) {
    let len = graph.m;

    // radsort is stable, so sorting by target and then by source groups equal edges
    // and keeps them in index order
    let mut order: Vec<usize> = (0..len).collect();
    radsort::sort_by_key(&mut order, |&eid| graph.edges[eid].1);
    radsort::sort_by_key(&mut order, |&eid| graph.edges[eid].0);

    graph.adj = vec![Vec::new(); graph.n]; // reset adjacency list

    let mut i = 0;
    while i < len {
        let eid = order[i];
        let (s, t) = graph.edges[eid];

        let mut j = i + 1;
        while j < len && graph.edges[order[j]] == (s, t) {
            j += 1;
        }

        if j - i > 1 {
            let mut component = Component::new(Some(NodeType::P));

            let evirt = graph.new_edge(s, t, None);
            graph.adj[t].push(evirt); // add t->s edge as well, since we are not rooted yet

            component.push_edge(evirt, graph, true);
            for &dup in &order[i..j] {
                component.push_edge(dup, graph, false);
            }

            component.commit(split_components);
        } else {
            graph.adj[s].push(eid);
            graph.adj[t].push(eid); // add both directions, since we are not rooted yet
        }

        i = j;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triconnected_blocks::outside_structures::EdgeType;

    #[test]
    fn test_parallel_edges_become_a_bond() {
        let mut graph = GraphInternal::new(3);
        for (s, t) in [(0, 1), (1, 2), (0, 1), (0, 2), (0, 1)] {
            graph.new_edge(s, t, None);
        }

        let mut split_components = Vec::new();
        handle_duplicate_edges(&mut graph, &mut split_components);

        assert_eq!(split_components.len(), 1);
        let bond = &split_components[0];
        assert_eq!(bond.component_type, Some(NodeType::P));
        assert_eq!(bond.edges, vec![5, 0, 2, 4]);

        assert_eq!(graph.edges[5], (0, 1));
        for eid in [0, 2, 4] {
            assert_eq!(graph.edge_type[eid], Some(EdgeType::Killed));
        }
        assert_eq!(graph.deg, vec![2, 2, 2]);
        assert_eq!(graph.adj[0], vec![5, 3]);
        assert_eq!(graph.adj[1], vec![5, 1]);
    }
}

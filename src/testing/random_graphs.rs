use petgraph::visit::NodeIndexable;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::EdgeLabel;
use crate::UnGraph;

/// A random cycle on shuffled vertices plus `m - n` random chords, which is always
/// biconnected and loopless. Chords may be parallel to other edges.
pub fn random_biconnected_graph(n: usize, m: usize, seed: usize) -> UnGraph {
    assert!(n >= 2 && m >= n);
    let mut rng = StdRng::seed_from_u64(seed as u64);
    let mut graph = UnGraph::new_undirected();

    for i in 0..n {
        graph.add_node(i.try_into().unwrap());
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(&mut rng);
    for i in 0..n {
        let (s, t) = (order[i], order[(i + 1) % n]);
        graph.add_edge(graph.from_index(s), graph.from_index(t), EdgeLabel::Real);
    }

    for _ in n..m {
        let s = rng.random_range(0..n);
        let mut t = rng.random_range(0..n - 1);
        if t >= s {
            t += 1;
        }
        graph.add_edge(graph.from_index(s), graph.from_index(t), EdgeLabel::Real);
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block_cut::check_biconnected;

    #[test]
    fn test_random_graphs_are_biconnected() {
        for seed in 0..50 {
            let n = 2 + seed % 9;
            let graph = random_biconnected_graph(n, n + 1 + seed % 5, seed);
            assert_eq!(graph.node_count(), n);
            assert_eq!(check_biconnected(&graph), Ok(()));
        }
    }
}

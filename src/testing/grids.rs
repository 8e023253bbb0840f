use crate::{EdgeLabel, UnGraph};
use petgraph::graph::NodeIndex;

/// Generates a grid graph with the specified number of rows and columns.
pub fn generate_grid_graph(rows: usize, cols: usize) -> UnGraph {
    assert!(rows > 1 && cols > 1); // we want biconnected graph
    let mut graph = UnGraph::new_undirected();

    for r in 0..rows {
        for c in 0..cols {
            graph.add_node((r * cols + c) as u32);
        }
    }

    for r in 0..rows {
        for c in 0..cols {
            if r + 1 < rows {
                graph.add_edge(
                    NodeIndex::new(r * cols + c),
                    NodeIndex::new((r + 1) * cols + c),
                    EdgeLabel::Real,
                );
            }
            if c + 1 < cols {
                graph.add_edge(
                    NodeIndex::new(r * cols + c),
                    NodeIndex::new(r * cols + c + 1),
                    EdgeLabel::Real,
                );
            }
        }
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_size() {
        let grid = generate_grid_graph(3, 4);
        assert_eq!(grid.node_count(), 12);
        assert_eq!(grid.edge_count(), 2 * 4 + 3 * 3);
    }
}

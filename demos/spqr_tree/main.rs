/// Example of drawing the spqr tree of a small graph.
/// I use it with `cargo run --example spqr_tree | dot -Tsvg > spqr_tree.svg`
use petgraph::graph::EdgeIndex;
use spqr_trees::spqr_blocks::visualize::{visualize_skeleton, visualize_spqr_tree};
use spqr_trees::{EdgeLabel, SpqrError, SpqrTree, UnGraph};

/// Two K4s sharing the edge (0, 1), with a triangle hanging on (2, 3).
fn sample_graph() -> UnGraph {
    let edges = [
        (0, 1),
        (0, 2),
        (0, 3),
        (1, 2),
        (1, 3),
        (0, 4),
        (0, 5),
        (1, 4),
        (1, 5),
        (4, 5),
        (2, 6),
        (6, 3),
        (2, 3),
    ];

    let mut graph = UnGraph::new_undirected();
    let nodes: Vec<_> = (0..7).map(|i| graph.add_node(i)).collect();
    for (a, b) in edges {
        graph.add_edge(nodes[a], nodes[b], EdgeLabel::Real);
    }

    graph
}

fn main() -> Result<(), SpqrError> {
    let _logger = flexi_logger::Logger::try_with_env_or_str("info")
        .and_then(|logger| logger.start())
        .ok();

    let graph = sample_graph();
    let mut tree = SpqrTree::new(&graph)?;

    tree.root_tree_at_edge(EdgeIndex::new(10))?;
    let root = tree.root_node();
    log::info!(
        "rooted at tree node {} ({}), {} children",
        root,
        tree.type_of(root)?,
        tree.children(root)?.len()
    );

    for v in tree.children(root)? {
        let pertinent = tree.pertinent_graph(v)?;
        log::info!(
            "pertinent graph of {}: {} nodes, {} edges",
            v,
            pertinent.graph.node_count(),
            pertinent.graph.edge_count()
        );
    }

    eprint!("{}", visualize_skeleton(tree.skeleton(root)?));
    print!("{}", visualize_spqr_tree(&tree));

    Ok(())
}

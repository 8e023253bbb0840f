/// Enum representing the type of edge in a graph.
///
/// In a pertinent graph every copied edge is `Real`, the edge standing in for
/// the reference edge is `Virtual`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EdgeLabel {
    Real,
    Virtual,
}

/// Type of a node in the SPQR tree.
///
/// - `S`: polygon (simple cycle)
/// - `P`: bond (two nodes, at least three parallel edges)
/// - `R`: rigid (simple triconnected graph)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    S,
    P,
    R,
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeType::S => write!(f, "S"),
            NodeType::P => write!(f, "P"),
            NodeType::R => write!(f, "R"),
        }
    }
}

/// Wrapper for petgraph's graph type.
pub type UnGraph = petgraph::graph::UnGraph<u32, EdgeLabel>;

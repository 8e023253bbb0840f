use petgraph::graph::{EdgeIndex, NodeIndex};

/// The input graph cannot be decomposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInput {
    #[error("graph has {0} edges, at least 3 are required")]
    TooFewEdges(usize),
    #[error("self loop on edge {0:?}")]
    SelfLoop(EdgeIndex),
    #[error("graph is not connected")]
    Disconnected,
    #[error("graph is not biconnected, {0:?} is a cut vertex")]
    CutVertex(NodeIndex),
    #[error("root edge {0:?} is not an edge of the graph")]
    UnknownRootEdge(EdgeIndex),
}

/// A single call was made with arguments outside of its contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PreconditionViolation {
    #[error("tree node {0} does not exist")]
    UnknownTreeNode(usize),
    #[error("skeleton of tree node {tree_node} has no edge {edge}")]
    UnknownSkeletonEdge { tree_node: usize, edge: usize },
    #[error("skeleton of tree node {tree_node} has no node {node}")]
    UnknownSkeletonNode { tree_node: usize, node: usize },
    #[error("edge {0:?} is not an edge of the original graph")]
    UnknownOriginalEdge(EdgeIndex),
    #[error("node {node} is not an endpoint of edge {edge} in skeleton of tree node {tree_node}")]
    NotAnEndpoint {
        tree_node: usize,
        edge: usize,
        node: usize,
    },
    #[error("edge {edge} in skeleton of tree node {tree_node} is not virtual")]
    NotVirtual { tree_node: usize, edge: usize },
    #[error("edge {edge} in skeleton of tree node {tree_node} has an endpoint without original node")]
    SyntheticEndpoint { tree_node: usize, edge: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SpqrError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),
    #[error("precondition violated: {0}")]
    PreconditionViolation(#[from] PreconditionViolation),
}

/// An invariant of the tree does not hold. Reported by
/// [`SpqrTree::check_consistency`](crate::SpqrTree::check_consistency).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Inconsistency {
    #[error("original edge {0:?} is real in {1} skeletons")]
    RealEdgeCount(EdgeIndex, usize),
    #[error("real edge index of {0:?} points to the wrong skeleton edge")]
    RealEdgeIndex(EdgeIndex),
    #[error("endpoints of original edge {0:?} differ from its skeleton copy")]
    RealEdgeEndpoints(EdgeIndex),
    #[error("tree edge {0} is not backed by a virtual edge pair")]
    TreeEdgePairing(usize),
    #[error("virtual edges of tree edge {0} have different endpoints")]
    TreeEdgeEndpoints(usize),
    #[error("skeleton of tree node {0} does not match its type {1}")]
    SkeletonShape(usize, crate::NodeType),
    #[error("adjacent tree nodes {0} and {1} are both of type {2}")]
    AdjacentSameType(usize, usize, crate::NodeType),
    #[error("tree node {0} is not reachable from the root")]
    Unreachable(usize),
    #[error("reference edge of tree node {0} is misplaced")]
    ReferenceEdge(usize),
}

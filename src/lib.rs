//! # spqr_trees
//!
//! Construction and maintenance of SPQR trees of biconnected multigraphs.
//!
//! Based on [`petgraph`](https://docs.rs/petgraph).
//!
//! The input graph is split into its triconnected components in linear time
//! ([`triconnected::get_triconnected_components`]). [`SpqrTree`] glues the components
//! into a rooted tree of skeletons which can be re-rooted, have single skeleton edges
//! reoriented or subdivided, and rebuild the part of the input graph hanging below
//! any tree node ([`SpqrTree::pertinent_graph`]).
//!
//! ```
//! use spqr_trees::{EdgeLabel, NodeType, SpqrTree, UnGraph};
//!
//! let mut graph = UnGraph::new_undirected();
//! let v: Vec<_> = (0..4).map(|i| graph.add_node(i)).collect();
//! for (a, b) in [(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)] {
//!     graph.add_edge(v[a], v[b], EdgeLabel::Real);
//! }
//!
//! let tree = SpqrTree::new(&graph).unwrap();
//! assert_eq!(tree.number_of_s_nodes(), 2);
//! assert_eq!(tree.number_of_p_nodes(), 1);
//! assert_eq!(tree.type_of(tree.root_node()).unwrap(), NodeType::S);
//! ```
//!
//! ## References
//! - [Hopcroft, J., & Tarjan, R. (1973). Dividing a Graph into Triconnected Components.](https://epubs.siam.org/doi/10.1137/0202012)
//! - [Gutwenger, C., & Mutzel, P. (2001). A Linear Time Implementation of SPQR-Trees.](https://doi.org/10.1007/3-540-44541-2_8)
//! - [Di Battista, G., & Tamassia, R. (1996). On-Line Planarity Testing.](https://doi.org/10.1137/S0097539794280736)

pub mod block_cut;
pub mod error;
pub mod spqr_blocks;
pub mod spqr_tree;
pub mod triconnected;
pub mod triconnected_blocks;
pub mod types;

#[cfg(test)]
mod testing;

pub use error::{Inconsistency, InvalidInput, PreconditionViolation, SpqrError};
pub use spqr_blocks::outside_structures::{SpqrTree, TreeEdge};
pub use spqr_blocks::pertinent::PertinentGraph;
pub use spqr_blocks::skeleton::{Skeleton, SkeletonEdge};
pub use types::EdgeLabel;
pub use types::NodeType;
pub use types::UnGraph;

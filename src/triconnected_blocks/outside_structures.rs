use crate::{NodeType, triconnected_blocks::graph_internal::GraphInternal};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EdgeType {
    Tree,
    Back,
    Killed,
}

/// Represents a component in the triconnected block decomposition.
///
/// Contains a list of edges that belong to the component and its type.
/// `None` means the type is decided on [`Component::commit`].
#[derive(Debug, Clone)]
pub struct Component {
    pub edges: Vec<usize>,
    pub component_type: Option<NodeType>,
}

impl Component {
    pub(crate) fn new(component_type: Option<NodeType>) -> Self {
        Self {
            edges: Vec::new(),
            component_type,
        }
    }

    /// Adds an edge to the component. Edges that are not virtual leave the working graph.
    pub(crate) fn push_edge(
        &mut self,
        eid: usize,
        graph: &mut GraphInternal,
        is_virtual: bool,
    ) -> &mut Self {
        self.edges.push(eid);
        if !is_virtual {
            graph.remove_edge(eid);
        }

        self
    }

    /// Split components are triangles, triple bonds or triconnected graphs, so the
    /// number of edges is enough to tell a polygon from a rigid component.
    pub(crate) fn commit(mut self, split_components: &mut Vec<Component>) {
        if self.component_type.is_none() {
            self.component_type = Some(if self.edges.len() >= 4 {
                NodeType::R
            } else {
                NodeType::S
            });
        }

        split_components.push(self);
    }

    /// Type of a committed component.
    pub fn node_type(&self) -> NodeType {
        self.component_type.expect("component type is decided on commit")
    }
}

/// Holds the triconnected components of a graph.
///
/// - `components`: triconnected components after merging bonds and polygons.
/// - `edges`: endpoints of every edge, the first `real_edges` are the edges of the
///   input graph (same indices as in petgraph), the rest are virtual edges created
///   while splitting.
#[derive(Debug, Clone)]
pub struct TriconnectedComponents {
    pub components: Vec<Component>,
    pub edges: Vec<(usize, usize)>,
    pub real_edges: usize,
}

impl TriconnectedComponents {
    pub(crate) fn new(
        components: Vec<Component>,
        edges: Vec<(usize, usize)>,
        real_edges: usize,
    ) -> Self {
        Self {
            components,
            edges,
            real_edges,
        }
    }
}

use std::fmt::Write;

use dot::{Edges, GraphWalk, Labeller, Nodes, Style};

use crate::{
    NodeType,
    spqr_blocks::{
        outside_structures::SpqrTree,
        skeleton::{Skeleton, SkeletonEdge},
    },
};

fn node_label(skeleton: &Skeleton, v: usize) -> String {
    match skeleton.original_nodes[v] {
        Some(orig) => orig.index().to_string(),
        None => "peak".to_string(),
    }
}

fn edge_label(kind: SkeletonEdge) -> String {
    match kind {
        SkeletonEdge::Real(oe) => oe.index().to_string(),
        SkeletonEdge::Virtual(t) => format!("t{}", t),
        SkeletonEdge::Peak => String::new(),
    }
}

/// Renders the whole tree: one cluster per skeleton, tree edges drawn between the
/// clusters. The reference edge of every skeleton is bold.
pub fn visualize_spqr_tree(tree: &SpqrTree) -> String {
    let mut output = String::new();

    writeln!(output, "graph spqr {{").unwrap();
    writeln!(output, "  graph [splines=true, compound=true];").unwrap();
    writeln!(output, "  node [fontname=\"Helvetica\"];").unwrap();
    writeln!(output).unwrap();

    for (i, skeleton) in tree.skeletons.iter().enumerate() {
        let (fillcolor, nodecolor) = match skeleton.node_type {
            NodeType::R => ("#e6e6ff", "#ccccff"),
            NodeType::P => ("#e6ffe6", "#ccffcc"),
            NodeType::S => ("#ffe6e6", "#ffcccc"),
        };
        let root_mark = if i == tree.root { ", root" } else { "" };

        writeln!(output, "  subgraph cluster_{} {{", i).unwrap();
        writeln!(
            output,
            "    label=\"{}-node ({}){}\";",
            skeleton.node_type, i, root_mark
        )
        .unwrap();
        writeln!(output, "    style=filled; fillcolor=\"{}\";", fillcolor).unwrap();

        for v in 0..skeleton.graph.node_count() {
            writeln!(
                output,
                "    T{}_{} [label=\"{}\", shape=circle, fillcolor=\"{}\", style=filled];",
                i,
                v,
                node_label(skeleton, v),
                nodecolor
            )
            .unwrap();
        }

        for (e, &kind) in skeleton.edge_kinds.iter().enumerate() {
            let (s, t) = skeleton.graph.endpoints(e);
            let style = match kind {
                SkeletonEdge::Real(_) => "solid",
                SkeletonEdge::Virtual(_) => "dashed",
                SkeletonEdge::Peak => "dotted",
            };
            let width = if skeleton.reference_edge == Some(e) { 2.5 } else { 1.0 };
            writeln!(
                output,
                "    T{}_{} -- T{}_{} [label=\"{}\", style={}, penwidth={}];",
                i,
                s,
                i,
                t,
                edge_label(kind),
                style,
                width
            )
            .unwrap();
        }

        writeln!(output, "  }}").unwrap();
        writeln!(output).unwrap();
    }

    // connect the first skeleton node of both clusters
    for (t, tree_edge) in tree.tree_edges.iter().enumerate() {
        let [(v, _), (w, _)] = tree_edge.ends;
        writeln!(
            output,
            "  T{}_0 -- T{}_0 [ltail=cluster_{}, lhead=cluster_{}, label=\"t{}\", color=gray, penwidth=0.5];",
            v, w, v, w, t
        )
        .unwrap();
    }

    writeln!(output, "}}").unwrap();

    output
}

type Node = usize;

#[derive(Debug, Clone)]
struct Edge {
    id: usize,
    kind: SkeletonEdge,
    source: Node,
    target: Node,
}

struct SkeletonDrawing<'a> {
    skeleton: &'a Skeleton,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl<'a> Labeller<'a, Node, Edge> for SkeletonDrawing<'a> {
    fn graph_id(&self) -> dot::Id<'_> {
        dot::Id::new(format!("skeleton{}", self.skeleton.tree_node)).unwrap()
    }

    fn node_id(&self, n: &Node) -> dot::Id<'_> {
        dot::Id::new(format!("N{}", n)).unwrap()
    }

    fn node_label(&self, n: &Node) -> dot::LabelText<'a> {
        dot::LabelText::label(node_label(self.skeleton, *n))
    }

    fn edge_label(&self, e: &Edge) -> dot::LabelText<'a> {
        let reference = if self.skeleton.reference_edge == Some(e.id) {
            " ref"
        } else {
            ""
        };
        dot::LabelText::label(format!("{}: {}{}", e.id, edge_label(e.kind), reference))
    }

    fn edge_style(&self, e: &Edge) -> Style {
        match e.kind {
            SkeletonEdge::Real(_) => Style::None,
            SkeletonEdge::Virtual(_) => Style::Dashed,
            SkeletonEdge::Peak => Style::Dotted,
        }
    }
}

impl<'a> GraphWalk<'a, Node, Edge> for SkeletonDrawing<'a> {
    fn nodes(&self) -> Nodes<'_, Node> {
        self.nodes.iter().cloned().collect()
    }

    fn edges(&self) -> Edges<'_, Edge> {
        self.edges.as_slice().into()
    }

    fn source(&self, e: &Edge) -> Node {
        e.source
    }

    fn target(&self, e: &Edge) -> Node {
        e.target
    }
}

/// Renders one skeleton as a directed DOT graph, edges keep their stored direction.
pub fn visualize_skeleton(skeleton: &Skeleton) -> String {
    let drawing = SkeletonDrawing {
        skeleton,
        nodes: (0..skeleton.graph.node_count()).collect(),
        edges: skeleton
            .edge_kinds
            .iter()
            .enumerate()
            .map(|(id, &kind)| Edge {
                id,
                kind,
                source: skeleton.graph.source(id),
                target: skeleton.graph.target(id),
            })
            .collect(),
    };

    let mut buffer = std::io::Cursor::new(Vec::new());
    dot::render(&drawing, &mut buffer).unwrap();
    String::from_utf8(buffer.into_inner()).unwrap()
}

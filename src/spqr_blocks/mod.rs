pub(crate) mod consistency;
pub mod outside_structures;
pub mod pertinent;
pub mod skeleton;
pub mod skeleton_graph;
pub mod visualize;

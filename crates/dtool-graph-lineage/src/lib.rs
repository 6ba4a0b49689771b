//! Dataset lineage graphs
//!
//! This crate handles:
//! - Building a dependency graph from the flat dataset list the lookup server returns
//! - Rendering that graph as Graphviz DOT

pub mod graph;
pub mod dot;

pub use graph::{
    build_graph, is_valid_identifier, is_valid_uuid, InvalidReference, LineageGraph, Vertex,
    VertexId, VertexKind, MISSING_DATASET_NAME,
};
pub use dot::{render_dot, render_dot_with, DefaultFormatter, NameFormatter, VertexFormatter};

//! Graphviz DOT rendering
//!
//! Nodes are named by their index in the graph's key order, so dataset
//! names and UUIDs only ever appear inside quoted labels. Each node gets its
//! own hue, spread over two thirds of the colour wheel so the first and last
//! node don't end up looking alike.
//!
//! The digraph is always called `dependency_graph` (not `snakemake_dag`,
//! the name the dtool lookup client plugin used to emit), and the graph,
//! node and edge attribute lines in the preamble are fixed.

use std::borrow::Cow;

use crate::graph::{LineageGraph, Vertex, VertexKind};

const PREAMBLE: &str = "digraph dependency_graph {\n\
    \tgraph[bgcolor=white, margin=0];\n\
    \tnode[shape=box, style=rounded, fontname=sans, fontsize=10, penwidth=2];\n\
    \tedge[penwidth=2, color=grey];\n";

const POSTAMBLE: &str = "}\n";

const SATURATION: &str = "0.6";
const VALUE: &str = "0.85";

/// Per-vertex presentation hooks for [`render_dot_with`]
pub trait VertexFormatter {
    /// Text shown in the node box
    fn label<'a>(&self, vertex: &'a Vertex) -> Cow<'a, str> {
        Cow::Borrowed(&vertex.uuid)
    }

    /// Graphviz `style` attribute
    fn style<'a>(&self, _vertex: &'a Vertex) -> Cow<'a, str> {
        Cow::Borrowed("rounded")
    }

    /// UUID of the vertex whose colour this vertex takes.
    ///
    /// Returning another vertex's UUID groups both under one colour; an
    /// unknown UUID falls back to the vertex's own colour.
    fn color_key<'a>(&self, vertex: &'a Vertex) -> &'a str {
        &vertex.uuid
    }
}

/// UUID labels, rounded boxes, one colour per vertex
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFormatter;

impl VertexFormatter for DefaultFormatter {}

/// Labels nodes with dataset name and UUID, and dashes the border of
/// datasets missing from the server response.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameFormatter;

impl VertexFormatter for NameFormatter {
    fn label<'a>(&self, vertex: &'a Vertex) -> Cow<'a, str> {
        if vertex.name.is_empty() {
            Cow::Borrowed(&vertex.uuid)
        } else {
            Cow::Owned(format!("{}\n{}", vertex.name, vertex.uuid))
        }
    }

    fn style<'a>(&self, vertex: &'a Vertex) -> Cow<'a, str> {
        match vertex.kind {
            VertexKind::DoesNotExist => Cow::Borrowed("rounded,dashed"),
            VertexKind::Root | VertexKind::Dependent => Cow::Borrowed("rounded"),
        }
    }
}

/// Render a lineage graph as DOT with the default presentation
pub fn render_dot(graph: &LineageGraph) -> String {
    render_dot_with(graph, &DefaultFormatter)
}

/// Render a lineage graph as DOT.
///
/// Edges point from parent to child, so derivation reads forward.
pub fn render_dot_with<F>(graph: &LineageGraph, formatter: &F) -> String
where
    F: VertexFormatter + ?Sized,
{
    let n = graph.len();
    tracing::debug!("Graph has {} nodes", n);

    let mut out = String::from(PREAMBLE);

    if n == 0 {
        out.push_str(POSTAMBLE);
        return out;
    }

    let colors: Vec<String> = (0..n).map(|index| hsv_color(index, n)).collect();

    for (index, vertex) in graph.vertices().enumerate() {
        let color = graph
            .index_of(formatter.color_key(vertex))
            .map_or(&colors[index], |key_index| &colors[key_index]);

        out.push_str(&format!(
            "\t{}[label = \"{}\", color = \"{}\", style=\"{}\"];\n",
            index,
            escape_label(&formatter.label(vertex)),
            color,
            formatter.style(vertex),
        ));
    }

    for (edge, (child, parent)) in graph.edges().enumerate() {
        tracing::debug!("Edge {}: {} -> {}", edge, child, parent);

        if let (Some(from), Some(to)) = (graph.index_of(parent), graph.index_of(child)) {
            out.push_str(&format!("\t{} -> {}\n", from, to));
        }
    }

    out.push_str(POSTAMBLE);
    out
}

/// Graphviz HSV colour for node `index` of `count`.
///
/// `count` must be non-zero.
fn hsv_color(index: usize, count: usize) -> String {
    let hue = index as f64 * (2.0 / (3.0 * count as f64));
    format!("{:.2} {} {}", hue, SATURATION, VALUE)
}

fn escape_label(label: &str) -> Cow<'_, str> {
    if !label.contains(['"', '\\', '\n']) {
        return Cow::Borrowed(label);
    }

    let mut escaped = String::with_capacity(label.len() + 8);
    for c in label.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

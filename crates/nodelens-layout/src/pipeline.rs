use crate::edges::{collapse_multi_edges, init_edges_from_nodes};
use crate::error::Result;
use crate::graph::{GraphNodes, LayoutOptions, validate};
use nodelens_core::{Layout, LayoutEdges};
use std::time::Instant;

/// An external layout algorithm (force-directed or otherwise).
///
/// Implementations must be deterministic for identical input and must copy each node's
/// adjacency onto the returned [`LayoutNode`](nodelens_core::LayoutNode)s.
pub trait Layouter {
    fn layout(
        &self,
        nodes: &GraphNodes,
        edges: &LayoutEdges,
        options: &LayoutOptions,
    ) -> Result<Layout>;
}

impl<L: Layouter + ?Sized> Layouter for Box<L> {
    fn layout(
        &self,
        nodes: &GraphNodes,
        edges: &LayoutEdges,
        options: &LayoutOptions,
    ) -> Result<Layout> {
        (**self).layout(nodes, edges, options)
    }
}

/// Full layout of the shown nodes: edge init, layouter call, validation, multi-edge collapse.
///
/// An empty node set short-circuits to an empty layout without calling the layouter.
pub fn graph_layout(
    nodes: &GraphNodes,
    options: &LayoutOptions,
    layouter: &dyn Layouter,
) -> Result<Layout> {
    if nodes.is_empty() {
        return Ok(Layout::default());
    }

    let edges = init_edges_from_nodes(nodes);
    let start = Instant::now();
    let mut layout = layouter.layout(nodes, &edges, options)?;
    tracing::debug!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        nodes = layout.nodes.len(),
        edges = layout.edges.len(),
        "graph layout calculated"
    );

    validate(&layout)?;
    layout.edges = collapse_multi_edges(&layout.edges);
    Ok(layout)
}

use crate::error::Result;
use crate::graph::{GraphNodes, LayoutOptions};
use crate::pipeline::Layouter;
use nodelens_core::{Layout, LayoutEdges, LayoutNode, LayoutNodes, Point};
use rustc_hash::FxHashMap;

/// Deterministic fallback layouter: nodes sorted by id on a square grid.
///
/// Edges are routed through their midpoint so they carry a multi-point route like a real
/// force-directed layout would produce.
#[derive(Debug, Clone)]
pub struct GridLayouter {
    pub spacing: f64,
}

impl Default for GridLayouter {
    fn default() -> Self {
        Self { spacing: 100.0 }
    }
}

impl Layouter for GridLayouter {
    fn layout(
        &self,
        nodes: &GraphNodes,
        edges: &LayoutEdges,
        _options: &LayoutOptions,
    ) -> Result<Layout> {
        let mut ids = nodes.keys().map(String::as_str).collect::<Vec<_>>();
        ids.sort_unstable();
        let columns = (ids.len() as f64).sqrt().ceil().max(1.0) as usize;

        let mut positions: FxHashMap<&str, Point> = FxHashMap::default();
        for (idx, id) in ids.iter().enumerate() {
            let col = idx % columns;
            let row = idx / columns;
            positions.insert(
                *id,
                Point::new(col as f64 * self.spacing, row as f64 * self.spacing),
            );
        }

        let laid_out_nodes: LayoutNodes = nodes
            .iter()
            .filter_map(|(id, node)| {
                let p = positions.get(id.as_str())?;
                let mut out = LayoutNode::new(id.as_str(), p.x, p.y);
                out.adjacency = node.adjacency.clone();
                Some((id.clone(), out))
            })
            .collect();

        let laid_out_edges: LayoutEdges = edges
            .iter()
            .map(|(id, edge)| {
                let mut edge = edge.clone();
                if let (Some(&a), Some(&b)) = (
                    positions.get(edge.source.as_str()),
                    positions.get(edge.target.as_str()),
                ) {
                    let mid = Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
                    edge.points = vec![a, mid, b];
                }
                (id.clone(), edge)
            })
            .collect();

        Ok(Layout::new(laid_out_nodes, laid_out_edges))
    }
}

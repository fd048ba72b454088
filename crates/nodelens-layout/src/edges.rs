use crate::graph::GraphNodes;
use nodelens_core::{LayoutEdge, LayoutEdges};

pub const EDGE_ID_SEPARATOR: &str = "---";

pub fn edge_id(source: &str, target: &str) -> String {
    format!("{source}{EDGE_ID_SEPARATOR}{target}")
}

/// One directed edge per adjacency entry whose target is also a shown node.
pub fn init_edges_from_nodes(nodes: &GraphNodes) -> LayoutEdges {
    let mut edges = LayoutEdges::new();
    for (source, node) in nodes {
        for target in &node.adjacency {
            if !nodes.contains_key(target) {
                continue;
            }
            let id = edge_id(source, target);
            edges.insert(id.clone(), LayoutEdge::new(id, source.as_str(), target.as_str()));
        }
    }
    edges
}

/// Merges `a -> b` and `b -> a` into the edge seen first, marking it bidirectional.
pub fn collapse_multi_edges(edges: &LayoutEdges) -> LayoutEdges {
    let mut collapsed = LayoutEdges::with_capacity(edges.len());
    for (id, edge) in edges {
        let reversed = edge_id(&edge.target, &edge.source);
        if reversed != *id {
            if let Some(existing) = collapsed.get_mut(&reversed) {
                existing.bidirectional = true;
                continue;
            }
        }
        collapsed.insert(id.clone(), edge.clone());
    }
    collapsed
}

//! Focus re-layout: the selected node moves to the viewport center and its neighbors form a
//! circle around it, with every touching edge straightened.
//!
//! Everything here is a pure function of its arguments. The full layout is borrowed and never
//! changed, so dropping the selection simply means rendering the full layout again.

use crate::geom;
use crate::model::{Layout, LayoutEdges, LayoutNodes, Point};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Derived geometry parameters for one focus pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusSettings {
    pub selected_scale: f64,
    pub circular_radius: f64,
    /// `None` when there are no neighbors to place.
    pub circular_inner_angle: Option<f64>,
}

pub fn focus_settings(
    camera_scale: f64,
    neighbor_count: usize,
    viewport_expanse: f64,
    node_base_size: f64,
) -> FocusSettings {
    FocusSettings {
        selected_scale: geom::selected_node_scale(
            viewport_expanse,
            node_base_size,
            neighbor_count,
            camera_scale,
        ),
        circular_radius: geom::neighbor_circle_radius(
            neighbor_count,
            viewport_expanse,
            camera_scale,
        ),
        circular_inner_angle: geom::neighbor_angle_step(neighbor_count),
    }
}

/// Ids adjacent to `selected` in either direction, excluding `selected` itself.
///
/// The result is sorted so angle assignment does not depend on map iteration order.
pub fn neighbor_ids(selected: Option<&str>, nodes: &LayoutNodes) -> Vec<String> {
    let Some(selected) = selected else {
        return Vec::new();
    };
    let Some(node) = nodes.get(selected) else {
        return Vec::new();
    };

    let mut out: BTreeSet<&str> = node.adjacency.iter().map(String::as_str).collect();
    for (id, other) in nodes {
        if other.adjacency.iter().any(|a| a == selected) {
            out.insert(id.as_str());
        }
    }
    out.remove(selected);
    out.into_iter().map(str::to_string).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusedLayout {
    pub nodes: LayoutNodes,
    pub edges: LayoutEdges,
    pub selected_scale: f64,
}

impl FocusedLayout {
    fn pass_through(layout: &Layout, selected_scale: f64) -> Self {
        Self {
            nodes: layout.nodes.clone(),
            edges: layout.edges.clone(),
            selected_scale,
        }
    }
}

/// Each neighbor's angle on the circle follows its position in `neighbor_ids`.
pub fn compute_focus_layout(
    selected: Option<&str>,
    layout: &Layout,
    center: Point,
    neighbor_ids: &[String],
    settings: &FocusSettings,
) -> FocusedLayout {
    let Some(selected) = selected else {
        return FocusedLayout::pass_through(layout, settings.selected_scale);
    };
    if !layout.nodes.contains_key(selected) {
        tracing::trace!(selected, "selected node is not part of the layout");
        return FocusedLayout::pass_through(layout, settings.selected_scale);
    }

    // A repeated id keeps its first slot; later repeats leave their slot empty.
    let mut neighbors: IndexMap<&str, usize> = IndexMap::with_capacity(neighbor_ids.len());
    for (position, id) in neighbor_ids.iter().enumerate() {
        neighbors.entry(id.as_str()).or_insert(position);
    }

    let nodes: LayoutNodes = layout
        .nodes
        .iter()
        .map(|(id, node)| {
            let placed = if id == selected {
                node.moved_to(center)
            } else if let (Some(index), Some(step)) =
                (neighbors.get(id.as_str()), settings.circular_inner_angle)
            {
                let angle = geom::CIRCULAR_OFFSET_ANGLE + *index as f64 * step;
                node.moved_to(geom::circle_point(center, settings.circular_radius, angle))
            } else {
                node.clone()
            };
            (id.clone(), placed)
        })
        .collect();

    let in_focus = |id: &str| id == selected || neighbors.contains_key(id);
    let edges: LayoutEdges = layout
        .edges
        .iter()
        .map(|(id, edge)| {
            let mut edge = edge.clone();
            if in_focus(&edge.source) || in_focus(&edge.target) {
                if let (Some(source), Some(target)) =
                    (nodes.get(&edge.source), nodes.get(&edge.target))
                {
                    edge.points = vec![source.position(), target.position()];
                }
            }
            (id.clone(), edge)
        })
        .collect();

    FocusedLayout {
        nodes,
        edges,
        selected_scale: settings.selected_scale,
    }
}

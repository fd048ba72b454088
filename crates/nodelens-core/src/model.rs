//! Layout data model shared by the focus engine, the camera and the layout pipeline.
//!
//! Collections are id-keyed [`IndexMap`]s so iteration order is the upstream layout order and
//! serialization is stable.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutNode {
    pub id: String,
    pub x: f64,
    pub y: f64,
    /// Outgoing neighbor ids, in upstream order.
    #[serde(default)]
    pub adjacency: Vec<String>,
}

impl LayoutNode {
    pub fn new(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            adjacency: Vec::new(),
        }
    }

    pub fn with_adjacency<I, S>(mut self, adjacency: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.adjacency = adjacency.into_iter().map(Into::into).collect();
        self
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Returns a copy placed at `position`, every other field preserved.
    pub fn moved_to(&self, position: Point) -> Self {
        Self {
            x: position.x,
            y: position.y,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    /// Rendering route; at least two points once laid out.
    pub points: Vec<Point>,
    /// Set when a reverse edge between the same pair was collapsed into this one.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub bidirectional: bool,
}

impl LayoutEdge {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            points: Vec::new(),
            bidirectional: false,
        }
    }

    pub fn with_points(mut self, points: Vec<Point>) -> Self {
        self.points = points;
        self
    }

    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}

pub type LayoutNodes = IndexMap<String, LayoutNode>;
pub type LayoutEdges = IndexMap<String, LayoutEdge>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Layout {
    pub nodes: LayoutNodes,
    pub edges: LayoutEdges,
}

impl Layout {
    pub fn new(nodes: LayoutNodes, edges: LayoutEdges) -> Self {
        Self { nodes, edges }
    }

    pub fn from_parts(
        nodes: impl IntoIterator<Item = LayoutNode>,
        edges: impl IntoIterator<Item = LayoutEdge>,
    ) -> Self {
        Self {
            nodes: nodes.into_iter().map(|n| (n.id.clone(), n)).collect(),
            edges: edges.into_iter().map(|e| (e.id.clone(), e)).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

use crate::error::{Error, Result};
use indexmap::IndexMap;
use nodelens_core::{CanvasMargins, Layout, LayoutIdentity};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A shown node as handed to the layout pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub adjacency: Vec<String>,
}

impl GraphNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
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
}

pub type GraphNodes = IndexMap<String, GraphNode>;

pub fn graph_nodes(nodes: impl IntoIterator<Item = GraphNode>) -> GraphNodes {
    nodes.into_iter().map(|n| (n.id.clone(), n)).collect()
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutOptions {
    /// Canvas the layouter may fit to. `NodesChart` fills these from its viewport and config.
    pub width: f64,
    pub height: f64,
    pub margins: CanvasMargins,
    pub topology_id: String,
    pub topology_options: BTreeMap<String, Value>,
    pub force_relayout: bool,
}

impl LayoutOptions {
    /// Cache key of the topology/options pair these options describe.
    pub fn identity(&self) -> LayoutIdentity {
        LayoutIdentity::for_topology(&self.topology_id, &self.topology_options)
    }
}

/// Checks that every edge of a laid-out graph points at nodes it contains.
pub fn validate(layout: &Layout) -> Result<()> {
    for e in layout.edges.values() {
        if !layout.nodes.contains_key(&e.source) || !layout.nodes.contains_key(&e.target) {
            return Err(Error::MissingEndpoint {
                edge_id: e.id.clone(),
            });
        }
    }
    Ok(())
}

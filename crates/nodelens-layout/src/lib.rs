#![forbid(unsafe_code)]

//! Graph layout pipeline for `nodelens`.
//!
//! The layout algorithm itself is pluggable through [`Layouter`]; this crate owns what happens
//! around it: building edges from adjacency, timing the call, validating the result and
//! collapsing reverse edges into bidirectional ones.

pub mod edges;
pub mod error;
pub mod graph;
pub mod grid;
pub mod pipeline;

pub use edges::{EDGE_ID_SEPARATOR, collapse_multi_edges, edge_id, init_edges_from_nodes};
pub use error::{Error, Result};
pub use graph::{GraphNode, GraphNodes, LayoutOptions, graph_nodes, validate};
pub use grid::GridLayouter;
pub use pipeline::{Layouter, graph_layout};

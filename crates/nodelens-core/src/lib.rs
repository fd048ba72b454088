#![forbid(unsafe_code)]

//! Focus re-layout geometry and viewport math for node-link graph views (headless).
//!
//! Design goals:
//! - pure, deterministic functions over an already computed layout
//! - no failure modes in geometry: degenerate inputs are clamped or skipped, never propagated
//!   as `NaN`
//! - the full layout is borrowed, never mutated; focus results are fresh collections

pub mod config;
pub mod error;
pub mod focus;
pub mod geom;
pub mod identity;
pub mod model;
pub mod transform;
pub mod viewport;
pub mod zoom;

pub use config::{CanvasMargins, ChartConfig, ZoomConfig};
pub use error::{Error, Result};
pub use focus::{FocusSettings, FocusedLayout, compute_focus_layout, focus_settings, neighbor_ids};
pub use identity::LayoutIdentity;
pub use model::{Layout, LayoutEdge, LayoutEdges, LayoutNode, LayoutNodes, Point};
pub use transform::CameraTransform;
pub use viewport::{Viewport, ViewportMetrics, viewport_center};
pub use zoom::{Bounds, ZoomLimits, content_bounds, default_zoom, zoom_limits};

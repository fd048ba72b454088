use crate::config::CanvasMargins;
use crate::model::Point;
use crate::transform::CameraTransform;
use serde::{Deserialize, Serialize};

/// Raw size of the chart container, margins included.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Usable canvas dimensions after the fixed margins are taken off.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportMetrics {
    pub width: f64,
    pub height: f64,
    /// The shorter of `width` and `height`; normalizes scale-dependent geometry across aspect
    /// ratios.
    pub expanse: f64,
}

impl ViewportMetrics {
    pub fn new(viewport: Viewport, margins: &CanvasMargins) -> Self {
        let width = viewport.width - margins.left - margins.right;
        let height = viewport.height - margins.top;
        Self {
            width,
            height,
            expanse: width.min(height),
        }
    }
}

/// Content-space point shown at the middle of the free canvas area.
///
/// `panel_width` is the width of an open details panel (0 when closed); the center shifts left
/// to stay visible next to it.
pub fn viewport_center(
    viewport: Viewport,
    margins: &CanvasMargins,
    panel_width: f64,
    transform: &CameraTransform,
) -> Point {
    let half_width = (viewport.width + margins.left - panel_width) / 2.0;
    let half_height = (viewport.height + margins.top) / 2.0;
    Point::new(
        (-transform.translate_x + half_width) / transform.scale_x,
        (-transform.translate_y + half_height) / transform.scale_y,
    )
}

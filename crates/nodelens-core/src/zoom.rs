//! Per-layout zoom derivation: the fit-to-viewport transform and the scale/translate limits the
//! camera is bounded by.

use crate::config::{CanvasMargins, ZoomConfig};
use crate::geom;
use crate::model::LayoutNodes;
use crate::transform::CameraTransform;
use crate::viewport::ViewportMetrics;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        let mut it = points.into_iter();
        let (x0, y0) = it.next()?;
        let mut b = Self {
            min_x: x0,
            min_y: y0,
            max_x: x0,
            max_y: y0,
        };
        for (x, y) in it {
            b.min_x = b.min_x.min(x);
            b.min_y = b.min_y.min(y);
            b.max_x = b.max_x.max(x);
            b.max_y = b.max_y.max(y);
        }
        Some(b)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Bounds of the camera for one layout. Any bound may be absent, which leaves that side open.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoomLimits {
    pub min_scale: Option<f64>,
    pub max_scale: Option<f64>,
    pub min_translate_x: Option<f64>,
    pub max_translate_x: Option<f64>,
    pub min_translate_y: Option<f64>,
    pub max_translate_y: Option<f64>,
}

impl ZoomLimits {
    pub fn is_degenerate_scale(&self) -> bool {
        matches!((self.min_scale, self.max_scale), (Some(lo), Some(hi)) if lo > hi)
    }

    pub fn is_degenerate_translate_x(&self) -> bool {
        matches!((self.min_translate_x, self.max_translate_x), (Some(lo), Some(hi)) if lo > hi)
    }

    pub fn is_degenerate_translate_y(&self) -> bool {
        matches!((self.min_translate_y, self.max_translate_y), (Some(lo), Some(hi)) if lo > hi)
    }

    pub fn clamp_scale(&self, scale: f64) -> f64 {
        geom::clamp(scale, self.min_scale, self.max_scale)
    }

    pub fn clamp_translate_x(&self, tx: f64) -> f64 {
        geom::clamp(tx, self.min_translate_x, self.max_translate_x)
    }

    pub fn clamp_translate_y(&self, ty: f64) -> f64 {
        geom::clamp(ty, self.min_translate_y, self.max_translate_y)
    }
}

/// Bounds of the node centers, `None` for an empty layout.
pub fn content_bounds(nodes: &LayoutNodes) -> Option<Bounds> {
    Bounds::from_points(nodes.values().map(|n| (n.x, n.y)))
}

fn fit_scale(bounds: &Bounds, metrics: &ViewportMetrics) -> f64 {
    let x_factor = (bounds.width() > 0.0).then(|| metrics.width / bounds.width());
    let y_factor = (bounds.height() > 0.0).then(|| metrics.height / bounds.height());
    let fit = match (x_factor, y_factor) {
        (Some(x), Some(y)) => x.min(y),
        (Some(f), None) | (None, Some(f)) => f,
        (None, None) => 1.0,
    };
    if fit.is_finite() && fit > 0.0 { fit } else { 1.0 }
}

/// Transform that fits and centers the whole layout in the usable canvas.
pub fn default_zoom(
    nodes: &LayoutNodes,
    metrics: &ViewportMetrics,
    margins: &CanvasMargins,
) -> Option<CameraTransform> {
    let bounds = content_bounds(nodes)?;
    let scale = fit_scale(&bounds, metrics);
    let translate_x = (metrics.width - (bounds.min_x + bounds.max_x) * scale) / 2.0 + margins.left;
    let translate_y = (metrics.height - (bounds.min_y + bounds.max_y) * scale) / 2.0 + margins.top;
    Some(CameraTransform::uniform(translate_x, translate_y, scale))
}

/// Limits derived from the layout's content bounds; `None` when there is no content.
pub fn zoom_limits(
    nodes: &LayoutNodes,
    metrics: &ViewportMetrics,
    margins: &CanvasMargins,
    config: &ZoomConfig,
) -> Option<ZoomLimits> {
    let bounds = content_bounds(nodes)?;
    let fit = fit_scale(&bounds, metrics);
    Some(ZoomLimits {
        min_scale: Some(fit * config.min_scale_ratio),
        max_scale: Some(fit.max(config.max_scale)),
        min_translate_x: Some(margins.left - bounds.max_x * fit),
        max_translate_x: Some(margins.left + metrics.width - bounds.min_x * fit),
        min_translate_y: Some(margins.top - bounds.max_y * fit),
        max_translate_y: Some(margins.top + metrics.height - bounds.min_y * fit),
    })
}

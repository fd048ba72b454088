//! Pure geometry helpers used by the focus layout and the camera.

use crate::model::Point;
use crate::transform::CameraTransform;
use std::f64::consts::PI;

/// Rotational offset of the first neighbor on the focus circle, so a single neighbor does not
/// sit straight below the selected node.
pub const CIRCULAR_OFFSET_ANGLE: f64 = PI / 4.0;

/// Divisor applied to the viewport expanse when sizing the neighbor circle.
pub fn radius_density(count: usize) -> f64 {
    match count {
        0..=3 => 2.5,
        4..=6 => 3.5,
        _ => 3.0,
    }
}

/// Radius of the circle the neighbors of a focused node are placed on.
///
/// `scale` is the camera scale; dividing by it keeps the on-screen radius stable while zoomed.
/// A non-positive or non-finite scale is treated as `1.0`.
pub fn neighbor_circle_radius(count: usize, expanse: f64, scale: f64) -> f64 {
    expanse / radius_density(count) / sanitize_scale(scale)
}

/// Angle between two consecutive neighbors, `None` when there is nothing to place.
pub fn neighbor_angle_step(count: usize) -> Option<f64> {
    (count > 0).then(|| 2.0 * PI / count as f64)
}

/// Scale factor applied to the selected node while it is in focus.
///
/// The node never covers more than a third of the viewport expanse; the factor then shrinks with
/// the square root of the neighbor count (offset by 10 so it stays stable for tiny counts) and
/// cancels out the current camera zoom.
pub fn selected_node_scale(expanse: f64, base_size: f64, count: usize, camera_scale: f64) -> f64 {
    let max_scale = expanse / base_size / 3.0;
    let shrink = ((count + 10) as f64).sqrt();
    max_scale / shrink / sanitize_scale(camera_scale)
}

/// Point at `angle` on a circle around `center`; angle 0 lies on the +y axis.
pub fn circle_point(center: Point, radius: f64, angle: f64) -> Point {
    Point::new(center.x + radius * angle.sin(), center.y + radius * angle.cos())
}

pub fn apply_point(content: Point, t: &CameraTransform) -> Point {
    Point::new(
        t.translate_x + content.x * t.scale_x,
        t.translate_y + content.y * t.scale_y,
    )
}

/// Exact inverse of [`apply_point`].
pub fn invert_point(screen: Point, t: &CameraTransform) -> Point {
    Point::new(
        (screen.x - t.translate_x) / t.scale_x,
        (screen.y - t.translate_y) / t.scale_y,
    )
}

/// Clamps `value` into `[min, max]`; a missing bound leaves that side open.
///
/// When both bounds are present but `min > max`, both are ignored.
pub fn clamp(value: f64, min: Option<f64>, max: Option<f64>) -> f64 {
    if let (Some(lo), Some(hi)) = (min, max) {
        if lo > hi {
            return value;
        }
    }
    let mut out = value;
    if let Some(lo) = min {
        out = out.max(lo);
    }
    if let Some(hi) = max {
        out = out.min(hi);
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WheelDeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

impl WheelDeltaMode {
    /// Maps the DOM `WheelEvent.deltaMode` value.
    pub fn from_dom(mode: u32) -> Self {
        match mode {
            1 => Self::Line,
            2 => Self::Page,
            _ => Self::Pixel,
        }
    }

    fn multiplier(self) -> f64 {
        match self {
            Self::Pixel => 0.002,
            Self::Line => 0.05,
            Self::Page => 1.0,
        }
    }
}

/// Converts a wheel delta into the factor the camera divides its scale by.
///
/// Positive deltas (scrolling down) give factors above 1, i.e. zooming out.
pub fn wheel_zoom_factor(delta_y: f64, mode: WheelDeltaMode) -> f64 {
    (delta_y * mode.multiplier()).exp2()
}

fn sanitize_scale(scale: f64) -> f64 {
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    }
}

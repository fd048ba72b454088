use crate::model::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pan + independent X/Y scale applied to the whole graph canvas.
///
/// Forward mapping: `screen = translate + content * scale`, per axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraTransform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl Default for CameraTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl CameraTransform {
    pub const IDENTITY: Self = Self {
        translate_x: 0.0,
        translate_y: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
    };

    pub fn new(translate_x: f64, translate_y: f64, scale_x: f64, scale_y: f64) -> Self {
        Self {
            translate_x,
            translate_y,
            scale_x,
            scale_y,
        }
    }

    pub fn uniform(translate_x: f64, translate_y: f64, scale: f64) -> Self {
        Self::new(translate_x, translate_y, scale, scale)
    }

    pub fn translate(&self) -> Point {
        Point::new(self.translate_x, self.translate_y)
    }

    /// Maps a content-space point to screen space.
    pub fn apply(&self, content: Point) -> Point {
        crate::geom::apply_point(content, self)
    }

    /// Maps a screen-space point back to content space.
    pub fn invert(&self, screen: Point) -> Point {
        crate::geom::invert_point(screen, self)
    }

    /// SVG `transform` attribute value, e.g. `translate(10,20) scale(1.5,1.5)`.
    pub fn to_svg_transform(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CameraTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "translate({},{}) scale({},{})",
            self.translate_x, self.translate_y, self.scale_x, self.scale_y
        )
    }
}

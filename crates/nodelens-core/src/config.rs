use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fixed margins around the usable graph canvas, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasMargins {
    pub top: f64,
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Default for CanvasMargins {
    fn default() -> Self {
        Self {
            top: 130.0,
            left: 40.0,
            right: 40.0,
            bottom: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ZoomConfig {
    /// Lower scale bound as a fraction of the fit-to-viewport scale.
    pub min_scale_ratio: f64,
    /// Upper scale bound; raised to the fit scale when the content is tiny.
    pub max_scale: f64,
    /// Clamp panning to the derived translate bounds.
    pub bounded: bool,
    /// Keep the horizontal axis out of the persisted camera state.
    pub fix_horizontal: bool,
    /// Keep the vertical axis out of the persisted camera state.
    pub fix_vertical: bool,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_scale_ratio: 0.5,
            max_scale: 3.0,
            bounded: false,
            fix_horizontal: false,
            fix_vertical: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartConfig {
    pub canvas_margins: CanvasMargins,
    /// Rendered size of a node at scale 1.
    pub node_base_size: f64,
    /// Width subtracted from the viewport while the details panel is open.
    pub details_panel_width: f64,
    /// Quiet period before the camera state is written to the zoom cache.
    pub zoom_cache_debounce_ms: u64,
    /// Above this many nodes, frames are rendered without transitions.
    pub graph_complexity_nodes_threshold: usize,
    pub zoom: ZoomConfig,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            canvas_margins: CanvasMargins::default(),
            node_base_size: 100.0,
            details_panel_width: 420.0,
            zoom_cache_debounce_ms: 500,
            graph_complexity_nodes_threshold: 100,
            zoom: ZoomConfig::default(),
        }
    }
}

impl ChartConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::default().with_overrides(&value)
    }

    /// Deep-merges a partial JSON object onto this config.
    ///
    /// Object keys merge recursively; any other value replaces the current one.
    pub fn with_overrides(&self, overrides: &Value) -> Result<Self> {
        if !overrides.is_object() {
            return Err(Error::InvalidConfig {
                message: format!("expected a JSON object, got {overrides}"),
            });
        }
        let mut base = serde_json::to_value(self)?;
        deep_merge_value(&mut base, overrides);
        let merged: Self = serde_json::from_value(base)?;
        merged.validate()?;
        Ok(merged)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.node_base_size.is_finite() && self.node_base_size > 0.0) {
            return Err(Error::InvalidConfig {
                message: format!("nodeBaseSize must be positive, got {}", self.node_base_size),
            });
        }
        if !(self.zoom.min_scale_ratio.is_finite() && self.zoom.min_scale_ratio > 0.0) {
            return Err(Error::InvalidConfig {
                message: format!(
                    "zoom.minScaleRatio must be positive, got {}",
                    self.zoom.min_scale_ratio
                ),
            });
        }
        Ok(())
    }

    pub fn zoom_cache_debounce(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.zoom_cache_debounce_ms)
    }
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => merge_maps(base_map, in_map),
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}

fn merge_maps(base_map: &mut Map<String, Value>, in_map: &Map<String, Value>) {
    for (key, in_value) in in_map {
        match base_map.get_mut(key) {
            Some(base_value) => deep_merge_value(base_value, in_value),
            None => {
                base_map.insert(key.clone(), in_value.clone());
            }
        }
    }
}

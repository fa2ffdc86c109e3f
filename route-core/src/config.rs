use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, LayoutResult};

/// Layout constants. Coordinates are percent of the board unless noted.
pub const DEFAULT_ZOOM: f64 = 1.0;
/// Stretch applied to raw inter-node distances by the spacer.
pub const DEFAULT_DISTANCE_SCALE: f64 = 1.65;
/// Minimum distance between consecutive nodes after spacing.
pub const DEFAULT_MIN_GAP: f64 = 16.0;
/// Empty band kept along every viewport edge.
pub const DEFAULT_MARGIN: f64 = 6.0;
/// Floor for spans so degenerate layouts never divide by zero.
pub const SPAN_EPSILON: f64 = 1e-6;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pan {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

/// Tunables for the board layout and view transform.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderConfig {
    #[serde(default = "default_zoom")]
    pub zoom: f64,
    #[serde(default)]
    pub pan: Pan,
    #[serde(default = "default_distance_scale")]
    pub distance_scale: f64,
    #[serde(default = "default_min_gap")]
    pub min_gap: f64,
    #[serde(default = "default_margin")]
    pub margin: f64,
}

fn default_zoom() -> f64 {
    DEFAULT_ZOOM
}
fn default_distance_scale() -> f64 {
    DEFAULT_DISTANCE_SCALE
}
fn default_min_gap() -> f64 {
    DEFAULT_MIN_GAP
}
fn default_margin() -> f64 {
    DEFAULT_MARGIN
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            zoom: DEFAULT_ZOOM,
            pan: Pan::default(),
            distance_scale: DEFAULT_DISTANCE_SCALE,
            min_gap: DEFAULT_MIN_GAP,
            margin: DEFAULT_MARGIN,
        }
    }
}

impl RenderConfig {
    pub fn from_json(text: &str) -> LayoutResult<RenderConfig> {
        let cfg: RenderConfig = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> LayoutResult<()> {
        if !(self.zoom.is_finite() && self.zoom > 0.0) {
            return Err(LayoutError::InvalidConfig(format!(
                "zoom must be positive, got {}",
                self.zoom
            )));
        }
        if !(self.distance_scale.is_finite() && self.distance_scale > 1.0) {
            return Err(LayoutError::InvalidConfig(format!(
                "distanceScale must be greater than 1, got {}",
                self.distance_scale
            )));
        }
        if !(self.min_gap.is_finite() && self.min_gap > 0.0) {
            return Err(LayoutError::InvalidConfig(format!(
                "minGap must be positive, got {}",
                self.min_gap
            )));
        }
        if !(self.margin.is_finite() && (0.0..50.0).contains(&self.margin)) {
            return Err(LayoutError::InvalidConfig(format!(
                "margin must be in [0, 50), got {}",
                self.margin
            )));
        }
        if !(self.pan.x.is_finite() && self.pan.y.is_finite()) {
            return Err(LayoutError::InvalidConfig("pan must be finite".to_string()));
        }
        Ok(())
    }

    /// Apply a single `key=value` override as used in page query strings.
    /// Unknown keys and unparsable values are ignored.
    pub fn apply_override(&mut self, key: &str, value: &str) {
        let Ok(v) = value.trim().parse::<f64>() else {
            return;
        };
        match key {
            "zoom" => self.zoom = v,
            "panX" => self.pan.x = v,
            "panY" => self.pan.y = v,
            "scale" | "distanceScale" => self.distance_scale = v,
            "gap" | "minGap" => self.min_gap = v,
            "margin" => self.margin = v,
            _ => {}
        }
    }
}

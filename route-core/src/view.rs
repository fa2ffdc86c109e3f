use geo_types::Coord;

use crate::config::RenderConfig;
use crate::pipeline::PlacedNode;

/// Apply zoom (about the board centre) and pan to a fitted position.
/// Input and output are percent of the board.
pub fn to_view(p: Coord<f64>, cfg: &RenderConfig) -> Coord<f64> {
    Coord {
        x: (p.x - 50.0) * cfg.zoom + 50.0 + cfg.pan.x,
        y: (p.y - 50.0) * cfg.zoom + 50.0 + cfg.pan.y,
    }
}

/// Percent-of-board to pixel coordinates.
pub fn to_pixels(p: Coord<f64>, width: f64, height: f64) -> Coord<f64> {
    Coord {
        x: p.x / 100.0 * width,
        y: p.y / 100.0 * height,
    }
}

/// Node centre in pixels.
pub fn node_pixels(n: &PlacedNode, cfg: &RenderConfig, width: f64, height: f64) -> Coord<f64> {
    to_pixels(to_view(n.position, cfg), width, height)
}

/// Label anchor in pixels: node centre plus its label offset.
pub fn label_pixels(n: &PlacedNode, cfg: &RenderConfig, width: f64, height: f64) -> Coord<f64> {
    let c = node_pixels(n, cfg, width, height);
    Coord {
        x: c.x + n.label.dx,
        y: c.y + n.label.dy,
    }
}

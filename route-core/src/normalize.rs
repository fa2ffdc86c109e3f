use geo_types::Coord;

use crate::config::SPAN_EPSILON;
use crate::model::Node;

/// Fallback row used when a node has no precomputed `y`.
pub const DEFAULT_Y: f64 = 50.0;

/// Scale projected km offsets into 0..100 with north up.
///
/// Both axes share one span so the route keeps its true aspect ratio. Offsets
/// are non-negative by construction of the projector's origin. A single point
/// (or all-coincident points) lands at `(0, 100)`.
pub fn normalize_projected(coords: &[Coord<f64>]) -> Vec<Coord<f64>> {
    let span_x = coords.iter().map(|c| c.x).fold(SPAN_EPSILON, f64::max);
    let span_y = coords.iter().map(|c| c.y).fold(SPAN_EPSILON, f64::max);
    let span = span_x.max(span_y).max(SPAN_EPSILON);
    coords
        .iter()
        .map(|c| Coord {
            x: c.x / span * 100.0,
            y: 100.0 - c.y / span * 100.0,
        })
        .collect()
}

/// Percent coordinates for nodes without usable geography.
///
/// Present `x`/`y` are taken as-is (clamped to 0..100). A missing `x` is
/// placed proportionally to `km` when the route has distances, otherwise
/// proportionally to the node's position in the list. A missing `y` falls
/// back to [`DEFAULT_Y`].
pub fn normalize_precomputed(nodes: &[Node]) -> Vec<Coord<f64>> {
    let max_km = nodes
        .iter()
        .filter_map(|n| n.km)
        .filter(|k| k.is_finite())
        .fold(0.0, f64::max);
    let last = nodes.len().saturating_sub(1);
    nodes
        .iter()
        .enumerate()
        .map(|(i, n)| {
            let x = n.x.filter(|v| v.is_finite()).unwrap_or_else(|| {
                match n.km.filter(|k| k.is_finite()) {
                    Some(km) if max_km > 0.0 => km / max_km * 100.0,
                    _ if last > 0 => i as f64 / last as f64 * 100.0,
                    _ => 50.0,
                }
            });
            let y = n.y.filter(|v| v.is_finite()).unwrap_or(DEFAULT_Y);
            Coord {
                x: x.clamp(0.0, 100.0),
                y: y.clamp(0.0, 100.0),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_point_lands_at_left_bottom_corner() {
        let out = normalize_projected(&[Coord { x: 0.0, y: 0.0 }]);
        assert_eq!(out, vec![Coord { x: 0.0, y: 100.0 }]);
    }

    #[test]
    fn shared_span_preserves_aspect() {
        let out = normalize_projected(&[
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 20.0, y: 10.0 },
        ]);
        assert_eq!(out[1], Coord { x: 100.0, y: 50.0 });
    }

    #[test]
    fn north_is_up() {
        let out = normalize_projected(&[
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 0.0, y: 5.0 },
        ]);
        assert!(out[1].y < out[0].y);
        assert_eq!(out[1].y, 0.0);
    }

    #[test]
    fn precomputed_defaults_fill_gaps() {
        let nodes = vec![
            Node {
                km: Some(0.0),
                x: Some(10.0),
                y: Some(120.0),
                ..Default::default()
            },
            Node {
                km: Some(25.0),
                ..Default::default()
            },
            Node {
                km: Some(50.0),
                ..Default::default()
            },
        ];
        let out = normalize_precomputed(&nodes);
        assert_eq!(out[0], Coord { x: 10.0, y: 100.0 });
        assert_eq!(out[1], Coord { x: 50.0, y: DEFAULT_Y });
        assert_eq!(out[2], Coord { x: 100.0, y: DEFAULT_Y });
    }

    #[test]
    fn precomputed_without_km_spreads_by_index() {
        let nodes = vec![Node::default(), Node::default(), Node::default()];
        let xs: Vec<f64> = normalize_precomputed(&nodes).iter().map(|c| c.x).collect();
        assert_eq!(xs, vec![0.0, 50.0, 100.0]);
        assert_eq!(normalize_precomputed(&[Node::default()])[0].x, 50.0);
    }
}

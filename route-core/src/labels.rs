//! Label placement beside the route line.
//!
//! Each label is pushed perpendicular to the local path direction, on
//! alternating sides, and further out when its node is crowded by a neighbour.

use geo_types::Coord;

use crate::spacing::{planar_distance, unit_direction, FALLBACK_DIRECTION};

/// Base label distance from its node, in pixels.
pub const LABEL_BASE_OFFSET: f64 = 52.0;
/// Upper bound for the label distance, in pixels.
pub const LABEL_MAX_OFFSET: f64 = 120.0;
/// Pixels of extra offset per unit of missing neighbour distance.
pub const LABEL_CROWD_BOOST: f64 = 0.9;
/// Neighbours closer than `min_gap * LABEL_CROWD_FACTOR` trigger a boost.
pub const LABEL_CROWD_FACTOR: f64 = 1.2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelOffset {
    /// Displacement from the node centre in pixels.
    pub dx: f64,
    pub dy: f64,
    pub side: Side,
    /// Length of the displacement.
    pub spread: f64,
}

fn local_direction(points: &[Coord<f64>], i: usize) -> Coord<f64> {
    let prev = i.checked_sub(1).map(|j| points[j]);
    let next = points.get(i + 1).copied();
    match (prev, next) {
        (Some(a), Some(b)) => unit_direction(a, b),
        (None, Some(b)) => unit_direction(points[i], b),
        (Some(a), None) => unit_direction(a, points[i]),
        (None, None) => FALLBACK_DIRECTION,
    }
}

fn nearest_neighbor_distance(points: &[Coord<f64>], i: usize) -> Option<f64> {
    let prev = i.checked_sub(1).map(|j| planar_distance(points[j], points[i]));
    let next = points.get(i + 1).map(|p| planar_distance(points[i], *p));
    match (prev, next) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// Spread for a node whose closest neighbour is `neighbor_distance` away.
pub fn label_spread(neighbor_distance: Option<f64>, min_gap: f64) -> f64 {
    let boost = neighbor_distance
        .map(|d| (min_gap * LABEL_CROWD_FACTOR - d).max(0.0) * LABEL_CROWD_BOOST)
        .unwrap_or(0.0);
    (LABEL_BASE_OFFSET + boost).min(LABEL_MAX_OFFSET)
}

/// Label offsets for fitted node positions, in path order.
pub fn label_offsets(points: &[Coord<f64>], min_gap: f64) -> Vec<LabelOffset> {
    (0..points.len())
        .map(|i| {
            let dir = local_direction(points, i);
            let perp = Coord {
                x: -dir.y,
                y: dir.x,
            };
            let spread = label_spread(nearest_neighbor_distance(points, i), min_gap);
            let (sign, side) = if i % 2 == 0 {
                (1.0, Side::Left)
            } else {
                (-1.0, Side::Right)
            };
            LabelOffset {
                dx: perp.x * spread * sign,
                dy: perp.y * spread * sign,
                side,
                spread,
            }
        })
        .collect()
}

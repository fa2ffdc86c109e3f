use geo_types::Point;

use crate::error::{LayoutError, LayoutResult};
use crate::model::Node;
use crate::projection::{geo_points, haversine_km};

/// One stop of a computed visiting order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stop {
    /// Index into the input list.
    pub index: usize,
    /// Cumulative distance at this stop, rounded to one decimal.
    pub km: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RouteOrder {
    pub stops: Vec<Stop>,
    /// Unrounded total distance travelled.
    pub total_km: f64,
}

impl RouteOrder {
    pub fn indices(&self) -> Vec<usize> {
        self.stops.iter().map(|s| s.index).collect()
    }
}

/// Round to `places` decimals on the exact binary value of `v`, ties away
/// from zero. `1.45` is stored as `1.4499…` and so rounds down to `1.4`.
pub fn to_fixed(v: f64, places: usize) -> f64 {
    if !v.is_finite() || v.abs() >= 1e15 {
        return v;
    }
    // Wide enough to hold every significant digit of a double below 1e15.
    let exact = format!("{:.80}", v.abs());
    let Some((whole, frac)) = exact.split_once('.') else {
        return v;
    };
    let Ok(mut n) = whole.parse::<u64>() else {
        return v;
    };
    let mut digits = frac.bytes().map(|b| u64::from(b - b'0'));
    for _ in 0..places {
        n = n * 10 + digits.next().unwrap_or(0);
    }
    if digits.next().is_some_and(|d| d >= 5) {
        n += 1;
    }
    (n as f64 / 10f64.powi(places as i32)).copysign(v)
}

pub fn round1(v: f64) -> f64 {
    to_fixed(v, 1)
}

/// Greedy nearest-neighbour tour over great-circle distance.
///
/// Starting at `start`, repeatedly hop to the closest unvisited point. The
/// scan runs in input order and keeps the first minimum, so ties resolve to
/// the earlier point. The running total stays unrounded; only the value
/// stored per stop is rounded.
pub fn nearest_neighbor(points: &[Point<f64>], start: usize) -> LayoutResult<RouteOrder> {
    if points.is_empty() {
        return Err(LayoutError::EmptyInput);
    }
    if start >= points.len() {
        return Err(LayoutError::StartOutOfRange {
            index: start,
            len: points.len(),
        });
    }

    let mut visited = vec![false; points.len()];
    let mut stops = Vec::with_capacity(points.len());
    let mut total = 0.0;
    let mut current = start;
    visited[start] = true;
    stops.push(Stop {
        index: start,
        km: 0.0,
    });

    while stops.len() < points.len() {
        let mut nearest: Option<(usize, f64)> = None;
        for (i, p) in points.iter().enumerate() {
            if visited[i] {
                continue;
            }
            let d = haversine_km(points[current], *p);
            if nearest.is_none_or(|(_, best)| d < best) {
                nearest = Some((i, d));
            }
        }
        // Loop condition guarantees an unvisited point remains.
        let Some((next, dist)) = nearest else { break };
        visited[next] = true;
        total += dist;
        stops.push(Stop {
            index: next,
            km: round1(total),
        });
        current = next;
    }

    log::debug!(
        "ordered {} nodes from #{start}, {:.1} km total",
        stops.len(),
        total
    );
    Ok(RouteOrder {
        stops,
        total_km: total,
    })
}

/// Reorder geo-authored nodes and stamp each with its cumulative `km`.
pub fn order_nodes(nodes: &[Node], start: usize) -> LayoutResult<(Vec<Node>, f64)> {
    if nodes.is_empty() {
        return Err(LayoutError::EmptyInput);
    }
    let points = geo_points(nodes)?;
    let order = nearest_neighbor(&points, start)?;
    let ordered = order
        .stops
        .iter()
        .map(|s| Node {
            km: Some(s.km),
            ..nodes[s.index].clone()
        })
        .collect();
    Ok((ordered, order.total_km))
}

use geo::{Distance, Euclidean};
use geo_types::{Coord, Point};

/// Direction used when two consecutive nodes coincide.
pub const FALLBACK_DIRECTION: Coord<f64> = Coord { x: 1.0, y: 0.0 };

pub fn planar_distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    Euclidean.distance(Point::from(a), Point::from(b))
}

/// Unit vector from `from` to `to`, or [`FALLBACK_DIRECTION`] for a zero-length offset.
pub fn unit_direction(from: Coord<f64>, to: Coord<f64>) -> Coord<f64> {
    let len = planar_distance(from, to);
    if len > 0.0 {
        (to - from) / len
    } else {
        FALLBACK_DIRECTION
    }
}

/// Walk the path and re-place every node so consecutive nodes are at least
/// `min_gap` apart.
///
/// Node `i` keeps the heading it had from its original predecessor but is
/// measured from the predecessor's adjusted position, at
/// `max(original_distance * scale, min_gap)`. The first node does not move.
pub fn space_out(points: &[Coord<f64>], scale: f64, min_gap: f64) -> Vec<Coord<f64>> {
    let mut out: Vec<Coord<f64>> = Vec::with_capacity(points.len());
    for (i, &p) in points.iter().enumerate() {
        if i == 0 {
            out.push(p);
            continue;
        }
        let prev = points[i - 1];
        let dir = unit_direction(prev, p);
        let dist = (planar_distance(prev, p) * scale).max(min_gap);
        out.push(out[i - 1] + dir * dist);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn first_node_is_untouched() {
        let pts = [Coord { x: 3.0, y: 4.0 }, Coord { x: 3.5, y: 4.0 }];
        let out = space_out(&pts, 1.65, 16.0);
        assert_eq!(out[0], pts[0]);
        assert!((out[1].x - 19.0).abs() < EPS);
        assert!((out[1].y - 4.0).abs() < EPS);
    }

    #[test]
    fn long_hops_are_stretched_by_scale() {
        let pts = [Coord { x: 0.0, y: 0.0 }, Coord { x: 0.0, y: 40.0 }];
        let out = space_out(&pts, 1.25, 16.0);
        assert!((out[1].y - 50.0).abs() < EPS);
    }

    #[test]
    fn coincident_nodes_step_along_fallback() {
        let p = Coord { x: 50.0, y: 50.0 };
        let out = space_out(&[p, p, p], 1.65, 16.0);
        assert_eq!(out[1], Coord { x: 66.0, y: 50.0 });
        assert_eq!(out[2], Coord { x: 82.0, y: 50.0 });
        assert!(out.iter().all(|c| c.x.is_finite() && c.y.is_finite()));
    }

    #[test]
    fn heading_comes_from_original_not_adjusted_predecessor() {
        // Original path turns 90 degrees at the second node.
        let pts = [
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 1.0, y: 0.0 },
            Coord { x: 1.0, y: 1.0 },
        ];
        let out = space_out(&pts, 1.65, 16.0);
        assert!((out[2].x - out[1].x).abs() < EPS);
        assert!((out[2].y - out[1].y - 16.0).abs() < EPS);
    }

    #[test]
    fn every_gap_respects_minimum() {
        let pts: Vec<Coord<f64>> = (0..20)
            .map(|i| {
                let f = i as f64;
                Coord {
                    x: 50.0 + (f * 0.7).sin() * 3.0,
                    y: 50.0 + (f * 1.3).cos() * 2.0,
                }
            })
            .collect();
        let out = space_out(&pts, 1.65, 16.0);
        for w in out.windows(2) {
            assert!(planar_distance(w[0], w[1]) >= 16.0 - 1e-6);
        }
    }
}

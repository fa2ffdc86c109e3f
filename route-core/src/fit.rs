use geo::BoundingRect;
use geo_types::{Coord, LineString};

use crate::config::SPAN_EPSILON;

/// Remap `v` from `[min, min + range]` into `[margin, 100 - margin]`.
/// An axis with no extent is centred.
fn fit_axis(v: f64, min: f64, range: f64, margin: f64) -> f64 {
    if range < SPAN_EPSILON {
        return 50.0;
    }
    margin + (v - min) / range * (100.0 - 2.0 * margin)
}

/// Fit spaced coordinates into the viewport, leaving `margin` on every side.
///
/// Unlike the normalizer, each axis is scaled by its own extent: spacing
/// already distorted the geography, and filling the board wins over keeping
/// the aspect ratio. Fitting an already-fitted set is a no-op.
pub fn fit_to_viewport(points: &[Coord<f64>], margin: f64) -> Vec<Coord<f64>> {
    let Some(rect) = LineString::from(points.to_vec()).bounding_rect() else {
        return Vec::new();
    };
    let min = rect.min();
    let (w, h) = (rect.width(), rect.height());
    points
        .iter()
        .map(|p| Coord {
            x: fit_axis(p.x, min.x, w, margin),
            y: fit_axis(p.y, min.y, h, margin),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Coord<f64>, b: Coord<f64>) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(fit_to_viewport(&[], 6.0).is_empty());
    }

    #[test]
    fn extremes_touch_the_margin() {
        let out = fit_to_viewport(
            &[
                Coord { x: -40.0, y: 10.0 },
                Coord { x: 160.0, y: 30.0 },
                Coord { x: 60.0, y: 20.0 },
            ],
            6.0,
        );
        assert!(close(out[0], Coord { x: 6.0, y: 6.0 }));
        assert!(close(out[1], Coord { x: 94.0, y: 94.0 }));
        assert!(close(out[2], Coord { x: 50.0, y: 50.0 }));
    }

    #[test]
    fn flat_axis_is_centred() {
        let out = fit_to_viewport(
            &[Coord { x: 0.0, y: 7.0 }, Coord { x: 16.0, y: 7.0 }],
            6.0,
        );
        assert_eq!(out[0].y, 50.0);
        assert_eq!(out[1].y, 50.0);
        let single = fit_to_viewport(&[Coord { x: 3.0, y: 3.0 }], 6.0);
        assert_eq!(single[0], Coord { x: 50.0, y: 50.0 });
    }

    #[test]
    fn fitting_is_idempotent() {
        let pts: Vec<Coord<f64>> = (0..9)
            .map(|i| {
                let f = i as f64;
                Coord {
                    x: f * 17.0 - 30.0,
                    y: (f * 0.8).sin() * 70.0,
                }
            })
            .collect();
        let once = fit_to_viewport(&pts, 6.0);
        let twice = fit_to_viewport(&once, 6.0);
        for (a, b) in once.iter().zip(&twice) {
            assert!(close(*a, *b));
        }
    }
}

//! Geographic helpers: great-circle distance and the equirectangular
//! projection used to turn lat/lon into planar kilometres.

use geo_types::{Coord, Point};

use crate::error::{LayoutError, LayoutResult};
use crate::model::Node;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;
/// Kilometres per degree of longitude at the equator.
pub const KM_PER_DEG_LON: f64 = 111.32;
/// Kilometres per degree of latitude.
pub const KM_PER_DEG_LAT: f64 = 110.574;

/// Great-circle distance in km between two (lon, lat) points.
pub fn haversine_km(a: Point<f64>, b: Point<f64>) -> f64 {
    let d_lat = (b.y() - a.y()).to_radians();
    let d_lon = (b.x() - a.x()).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.y().to_radians().cos() * b.y().to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Collect the geographic position of every node. Geo data is all-or-nothing:
/// a single node without a finite lat/lon pair fails the whole set.
pub fn geo_points(nodes: &[Node]) -> LayoutResult<Vec<Point<f64>>> {
    let points: Vec<Option<Point<f64>>> = nodes.iter().map(Node::geo).collect();
    let missing = points.iter().filter(|p| p.is_none()).count();
    if missing > 0 {
        return Err(LayoutError::IncompleteGeoData {
            missing,
            total: nodes.len(),
        });
    }
    Ok(points.into_iter().flatten().collect())
}

/// True when every node carries a usable lat/lon pair.
pub fn has_complete_geo(nodes: &[Node]) -> bool {
    !nodes.is_empty() && nodes.iter().all(|n| n.geo().is_some())
}

/// Project (lon, lat) points to planar km offsets from the south-west corner
/// of their bounding box. Longitude is scaled by the cosine of the mean
/// latitude so both axes share one unit.
pub fn project(points: &[Point<f64>]) -> Vec<Coord<f64>> {
    if points.is_empty() {
        return Vec::new();
    }
    let min_lat = points.iter().map(|p| p.y()).fold(f64::INFINITY, f64::min);
    let min_lon = points.iter().map(|p| p.x()).fold(f64::INFINITY, f64::min);
    let mean_lat_rad =
        (points.iter().map(|p| p.y()).sum::<f64>() / points.len() as f64).to_radians();
    let lon_km = KM_PER_DEG_LON * mean_lat_rad.cos();
    points
        .iter()
        .map(|p| Coord {
            x: (p.x() - min_lon) * lon_km,
            y: (p.y() - min_lat) * KM_PER_DEG_LAT,
        })
        .collect()
}

/// Project a node list, failing if geo data is incomplete.
pub fn project_nodes(nodes: &[Node]) -> LayoutResult<Vec<Coord<f64>>> {
    let points = geo_points(nodes)?;
    log::debug!("projecting {} geo nodes", points.len());
    Ok(project(&points))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(lat: Option<f64>, lon: Option<f64>) -> Node {
        Node {
            lat,
            lon,
            ..Default::default()
        }
    }

    #[test]
    fn haversine_tokyo_to_yokohama_machida() {
        let a = Point::new(139.639, 35.631);
        let b = Point::new(139.47, 35.513);
        let d = haversine_km(a, b);
        assert!((d - 20.144).abs() < 0.01, "got {d}");
        assert_eq!(haversine_km(a, a), 0.0);
    }

    #[test]
    fn identical_points_project_to_origin() {
        let p = Point::new(139.0, 35.0);
        let out = project(&[p, p, p]);
        assert!(out.iter().all(|c| c.x == 0.0 && c.y == 0.0));
    }

    #[test]
    fn latitude_only_line_keeps_constant_x() {
        let pts = [
            Point::new(139.5, 35.0),
            Point::new(139.5, 35.1),
            Point::new(139.5, 35.2),
        ];
        let out = project(&pts);
        assert!(out.iter().all(|c| c.x == 0.0));
        assert!(out[0].y < out[1].y && out[1].y < out[2].y);
    }

    #[test]
    fn longitude_is_shrunk_by_mean_latitude() {
        let pts = [Point::new(0.0, 60.0), Point::new(1.0, 60.0)];
        let out = project(&pts);
        assert!((out[1].x - KM_PER_DEG_LON * 0.5).abs() < 1e-9);
    }

    #[test]
    fn mixed_geo_presence_is_rejected() {
        let nodes = [node(Some(35.0), Some(139.0)), node(None, Some(139.1))];
        match project_nodes(&nodes) {
            Err(LayoutError::IncompleteGeoData { missing, total }) => {
                assert_eq!((missing, total), (1, 2));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(!has_complete_geo(&nodes));
    }
}

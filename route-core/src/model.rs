use geo_types::{Coord, Point};
use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, LayoutResult};

/// Kind of waypoint. Drives icon and style class only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Interchange
    #[default]
    IC,
    /// Junction with another road
    JCT,
    /// Smart interchange
    SIC,
    /// Parking area
    PA,
    /// Service area
    SA,
}

impl NodeKind {
    pub const ALL: [NodeKind; 5] = [
        NodeKind::IC,
        NodeKind::JCT,
        NodeKind::SIC,
        NodeKind::PA,
        NodeKind::SA,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::IC => "IC",
            NodeKind::JCT => "JCT",
            NodeKind::SIC => "SIC",
            NodeKind::PA => "PA",
            NodeKind::SA => "SA",
        }
    }

    pub fn parse(s: &str) -> Option<NodeKind> {
        NodeKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
    }

    pub fn icon(self) -> &'static str {
        match self {
            NodeKind::IC | NodeKind::SIC => "〇",
            NodeKind::JCT => "◇",
            NodeKind::PA => "■",
            NodeKind::SA => "□",
        }
    }

    pub fn class_name(self) -> &'static str {
        match self {
            NodeKind::IC => "ic",
            NodeKind::JCT => "jct",
            NodeKind::SIC => "sic",
            NodeKind::PA => "pa",
            NodeKind::SA => "sa",
        }
    }

    /// Connection annotations are only drawn for junctions.
    pub fn shows_connection(self) -> bool {
        self == NodeKind::JCT
    }
}

/// A single waypoint on a route.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub name: String,
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub km: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_road: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_cities: Option<String>,
}

impl Node {
    /// Geographic position as (lon, lat) when both are present and on the
    /// globe: |lat| <= 90 and |lon| <= 180. Anything else counts as missing.
    pub fn geo(&self) -> Option<Point<f64>> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon))
                if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon) =>
            {
                Some(Point::new(lon, lat))
            }
            _ => None,
        }
    }

    /// Precomputed planar position, when both axes are present.
    pub fn planar(&self) -> Option<Coord<f64>> {
        match (self.x, self.y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some(Coord { x, y }),
            _ => None,
        }
    }
}

/// Decorative point drawn on the board, not part of the route.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub name: String,
    pub x: f64,
    pub y: f64,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
}

/// A highway: ordered nodes plus metadata. Node order is traversal order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub origin_city: String,
    #[serde(default)]
    pub destination_city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmarks: Option<Vec<Landmark>>,
}

impl Route {
    pub fn from_json(text: &str) -> LayoutResult<Route> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json_pretty(&self) -> LayoutResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Info line shown above the board.
    pub fn headline(&self) -> String {
        match self.description.as_deref() {
            Some(d) if !d.is_empty() => format!("{}：{}", self.name, d),
            _ if !self.origin_city.is_empty() || !self.destination_city.is_empty() => {
                format!(
                    "{}：{}〜{}",
                    self.name, self.origin_city, self.destination_city
                )
            }
            _ => self.name.clone(),
        }
    }

    /// Checks the contract the save endpoint enforces.
    pub fn validate_for_save(&self) -> LayoutResult<()> {
        if self.id.trim().is_empty() || self.name.trim().is_empty() {
            return Err(LayoutError::InvalidRoute(
                "id, name, nodes are required".to_string(),
            ));
        }
        if self.nodes.is_empty() {
            return Err(LayoutError::InvalidRoute(
                "nodes must be a non-empty list".to_string(),
            ));
        }
        Ok(())
    }
}

/// Entry of the route listing endpoint. Extra fields are ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub id: String,
    pub name: String,
}

/// Reply of the save endpoint.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SaveReply {
    pub status: Option<String>,
    pub highways_count: Option<usize>,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_as_uppercase_tag() {
        let n: Node =
            serde_json::from_str(r#"{"id":"ebina","name":"海老名JCT","kind":"JCT","km":31.4}"#)
                .unwrap();
        assert_eq!(n.kind, NodeKind::JCT);
        assert_eq!(n.km, Some(31.4));
        let out = serde_json::to_string(&n).unwrap();
        assert!(out.contains(r#""kind":"JCT""#));
        assert!(!out.contains("lat"));
    }

    #[test]
    fn geo_requires_both_finite_coordinates() {
        let mut n = Node {
            lat: Some(35.6),
            ..Default::default()
        };
        assert!(n.geo().is_none());
        n.lon = Some(f64::NAN);
        assert!(n.geo().is_none());
        n.lon = Some(139.6);
        let p = n.geo().unwrap();
        assert_eq!((p.x(), p.y()), (139.6, 35.6));
    }

    #[test]
    fn off_globe_coordinates_count_as_missing() {
        let at = |lat: f64, lon: f64| Node {
            lat: Some(lat),
            lon: Some(lon),
            ..Default::default()
        };
        assert!(at(1e308, 139.0).geo().is_none());
        assert!(at(-90.5, 0.0).geo().is_none());
        assert!(at(35.0, 180.1).geo().is_none());
        assert!(at(f64::INFINITY, 0.0).geo().is_none());
        assert!(at(90.0, -180.0).geo().is_some());
    }

    #[test]
    fn landmark_type_field_is_renamed() {
        let l: Landmark =
            serde_json::from_str(r#"{"name":"富士山","x":80,"y":20,"type":"mountain"}"#).unwrap();
        assert_eq!(l.type_.as_deref(), Some("mountain"));
    }

    #[test]
    fn save_validation_matches_server_contract() {
        let mut r = Route {
            id: "tomei".into(),
            name: "東名高速道路".into(),
            ..Default::default()
        };
        let err = r.validate_for_save().unwrap_err();
        assert_eq!(err.to_string(), "nodes must be a non-empty list");
        r.nodes.push(Node::default());
        assert!(r.validate_for_save().is_ok());
        r.id.clear();
        let err = r.validate_for_save().unwrap_err();
        assert_eq!(err.to_string(), "id, name, nodes are required");
    }

    #[test]
    fn summary_ignores_extra_fields() {
        let list: Vec<RouteSummary> =
            serde_json::from_str(r#"[{"id":"tomei","name":"東名","nodes":[]}]"#).unwrap();
        assert_eq!(list[0].id, "tomei");
    }

    #[test]
    fn kind_parse_is_case_insensitive() {
        assert_eq!(NodeKind::parse(" sic "), Some(NodeKind::SIC));
        assert_eq!(NodeKind::parse("toll"), None);
    }
}

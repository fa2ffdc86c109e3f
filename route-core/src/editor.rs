use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, LayoutResult};
use crate::model::{Node, NodeKind, Route};
use crate::order::order_nodes;
use crate::pipeline::{normalized_positions, round2};
use crate::slug::IdAllocator;

pub const DEFAULT_ROUTE_ID: &str = "sample-highway";
pub const DEFAULT_ROUTE_NAME: &str = "未命名高速道路";
pub const MSG_NEED_POINTS: &str = "地点を1件以上入力してください";

/// One row of the editor table, as typed by the operator.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorRow {
    #[serde(default)]
    pub is_start: bool,
    #[serde(default)]
    pub kind: NodeKind,
    pub name: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    #[serde(default)]
    pub connection_road: String,
    #[serde(default)]
    pub connection_cities: String,
}

impl EditorRow {
    /// Rows need a name and a coordinate pair on the globe to take part.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && self.to_node().geo().is_some()
    }

    fn to_node(&self) -> Node {
        let non_empty = |s: &str| {
            let t = s.trim();
            (!t.is_empty()).then(|| t.to_string())
        };
        Node {
            name: self.name.trim().to_string(),
            kind: self.kind,
            lat: self.lat,
            lon: self.lon,
            connection_road: non_empty(&self.connection_road),
            connection_cities: non_empty(&self.connection_cities),
            ..Default::default()
        }
    }
}

/// Route metadata fields of the editor form. Blank values get defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorMeta {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub origin_city: String,
    #[serde(default)]
    pub destination_city: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BuiltRoute {
    pub route: Route,
    /// Unrounded length of the ordered route.
    pub total_km: f64,
}

impl BuiltRoute {
    pub fn summary(&self) -> String {
        format!(
            "並び替え完了: 全{}地点 / 想定距離 {:.1}km",
            self.route.nodes.len(),
            self.total_km
        )
    }
}

fn or_default(value: &str, default: &str) -> String {
    match value.trim() {
        "" => default.to_string(),
        v => v.to_string(),
    }
}

/// Editor path: drop unusable rows, order by proximity from the start row,
/// stamp cumulative km, project, and assign unique ids.
pub fn build_route(rows: &[EditorRow], meta: &EditorMeta) -> LayoutResult<BuiltRoute> {
    let valid: Vec<&EditorRow> = rows.iter().filter(|r| r.is_valid()).collect();
    if valid.len() < rows.len() {
        log::debug!("skipping {} incomplete editor rows", rows.len() - valid.len());
    }
    if valid.is_empty() {
        return Err(LayoutError::EmptyInput);
    }
    let start = valid.iter().position(|r| r.is_start).unwrap_or(0);
    let nodes: Vec<Node> = valid.iter().map(|r| r.to_node()).collect();

    let (ordered, total_km) = order_nodes(&nodes, start)?;
    let positions = normalized_positions(&ordered)?;

    let mut ids = IdAllocator::new();
    let nodes = ordered
        .into_iter()
        .zip(positions)
        .enumerate()
        .map(|(i, (node, pos))| Node {
            id: ids.allocate(&node.name, i + 1),
            x: Some(round2(pos.x)),
            y: Some(round2(pos.y)),
            ..node
        })
        .collect();

    Ok(BuiltRoute {
        route: Route {
            id: or_default(&meta.id, DEFAULT_ROUTE_ID),
            name: or_default(&meta.name, DEFAULT_ROUTE_NAME),
            origin_city: meta.origin_city.trim().to_string(),
            destination_city: meta.destination_city.trim().to_string(),
            nodes,
            ..Default::default()
        },
        total_km,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, lat: f64, lon: f64) -> EditorRow {
        EditorRow {
            name: name.to_string(),
            lat: Some(lat),
            lon: Some(lon),
            ..Default::default()
        }
    }

    #[test]
    fn default_rows_build_two_node_route() {
        let rows = [row("東京", 35.631, 139.639), row("横浜町田", 35.513, 139.47)];
        let built = build_route(&rows, &EditorMeta::default()).unwrap();
        let r = &built.route;
        assert_eq!(r.id, DEFAULT_ROUTE_ID);
        assert_eq!(r.name, DEFAULT_ROUTE_NAME);
        assert_eq!(r.nodes[0].id, "node-1");
        assert_eq!(r.nodes[1].km, Some(20.1));
        // Tokyo is north-east of Yokohama-Machida.
        assert_eq!(r.nodes[0].x, Some(100.0));
        assert!(r.nodes[0].y.unwrap() < 50.0);
        assert_eq!((r.nodes[1].x, r.nodes[1].y), (Some(0.0), Some(100.0)));
        assert_eq!(built.summary(), "並び替え完了: 全2地点 / 想定距離 20.1km");
    }

    #[test]
    fn invalid_rows_are_dropped_and_start_flag_respected() {
        let mut rows = vec![
            row("Atsugi", 35.44, 139.36),
            EditorRow {
                name: "  ".into(),
                ..row("", 35.0, 139.0)
            },
            EditorRow {
                lat: Some(f64::NAN),
                ..row("Broken", 0.0, 0.0)
            },
            row("Ebina", 35.43, 139.40),
            row("Far", 1e308, 139.0),
        ];
        rows[3].is_start = true;
        let built = build_route(&rows, &EditorMeta::default()).unwrap();
        let names: Vec<&str> = built.route.nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Ebina", "Atsugi"]);
        assert_eq!(built.route.nodes[0].id, "ebina");
    }

    #[test]
    fn no_valid_rows_is_empty_input() {
        let rows = [EditorRow {
            name: "x".into(),
            ..Default::default()
        }];
        assert!(matches!(
            build_route(&rows, &EditorMeta::default()),
            Err(LayoutError::EmptyInput)
        ));
    }

    #[test]
    fn blank_connection_fields_are_omitted() {
        let rows = [
            EditorRow {
                kind: NodeKind::JCT,
                connection_road: "圏央道".into(),
                connection_cities: "  ".into(),
                ..row("Ebina JCT", 35.43, 139.40)
            },
            EditorRow {
                connection_road: "国道1号".into(),
                ..row("Atsugi", 35.44, 139.36)
            },
        ];
        let built = build_route(&rows, &EditorMeta::default()).unwrap();
        let json = built.route.to_json_pretty().unwrap();
        assert!(!json.contains("connection_cities"));
        assert_eq!(built.route.nodes[0].connection_road.as_deref(), Some("圏央道"));
        // Not kind-gated in the data model.
        assert_eq!(built.route.nodes[1].connection_road.as_deref(), Some("国道1号"));
    }

    #[test]
    fn metadata_is_trimmed() {
        let meta = EditorMeta {
            id: " tomei ".into(),
            name: "東名".into(),
            origin_city: " 東京 ".into(),
            destination_city: "名古屋".into(),
        };
        let built = build_route(&[row("a", 35.0, 139.0)], &meta).unwrap();
        assert_eq!(built.route.id, "tomei");
        assert_eq!(built.route.origin_city, "東京");
    }
}

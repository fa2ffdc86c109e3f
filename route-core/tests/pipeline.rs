use route_core::editor::{build_route, EditorMeta, EditorRow};
use route_core::fit::fit_to_viewport;
use route_core::normalize::normalize_projected;
use route_core::projection::project;
use route_core::spacing::{planar_distance, space_out};
use route_core::{layout_route, BoardState, CoordinateSource, NodeKind, RenderConfig, Route};

use geo_types::Point;

const TOL: f64 = 1e-9;

fn fixture(name: &str) -> Route {
    let text = match name {
        "tomei" => include_str!("fixtures/tomei.json"),
        "tomei_geo" => include_str!("fixtures/tomei_geo.json"),
        other => panic!("no fixture {other}"),
    };
    Route::from_json(text).expect("fixture parses")
}

fn assert_in_viewport(route: &Route, cfg: &RenderConfig) {
    let laid = layout_route(route, cfg).unwrap();
    assert_eq!(laid.nodes.len(), route.nodes.len());
    for n in &laid.nodes {
        let p = n.position;
        assert!(p.x.is_finite() && p.y.is_finite(), "{} not finite", n.node.id);
        for v in [p.x, p.y] {
            assert!(
                v >= cfg.margin - TOL && v <= 100.0 - cfg.margin + TOL,
                "{} at {:?} outside viewport",
                n.node.id,
                p
            );
        }
    }
}

#[test]
fn precomputed_route_fits_viewport() {
    let route = fixture("tomei");
    let cfg = RenderConfig::default();
    assert_in_viewport(&route, &cfg);
    let laid = layout_route(&route, &cfg).unwrap();
    assert_eq!(laid.source, CoordinateSource::Precomputed);
    assert_eq!(laid.headline, "東名高速道路：東京IC〜御殿場ICのデモ区間");
    assert_eq!(laid.landmarks.len(), 1);
}

#[test]
fn geo_route_fits_viewport_for_several_configs() {
    let route = fixture("tomei_geo");
    for (scale, gap, margin) in [(1.65, 16.0, 6.0), (1.25, 16.0, 6.0), (2.0, 4.0, 0.0), (1.1, 30.0, 20.0)] {
        let cfg = RenderConfig {
            distance_scale: scale,
            min_gap: gap,
            margin,
            ..Default::default()
        };
        assert_in_viewport(&route, &cfg);
    }
    let laid = layout_route(&route, &RenderConfig::default()).unwrap();
    assert_eq!(laid.source, CoordinateSource::Geo);
}

#[test]
fn board_path_keeps_persisted_order() {
    let route = fixture("tomei_geo");
    let laid = layout_route(&route, &RenderConfig::default()).unwrap();
    let ids: Vec<&str> = laid.nodes.iter().map(|n| n.node.id.as_str()).collect();
    let expected: Vec<&str> = route.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, expected);
}

#[test]
fn pipeline_is_reentrant() {
    let route = fixture("tomei_geo");
    let cfg = RenderConfig::default();
    let a = layout_route(&route, &cfg).unwrap();
    let b = layout_route(&route, &cfg).unwrap();
    assert_eq!(a, b);
}

#[test]
fn single_node_route_is_centred() {
    let mut route = fixture("tomei");
    route.nodes.truncate(1);
    let laid = layout_route(&route, &RenderConfig::default()).unwrap();
    assert_eq!((laid.nodes[0].position.x, laid.nodes[0].position.y), (50.0, 50.0));
}

#[test]
fn projector_aspect_on_meridian() {
    let pts = [
        Point::new(139.0, 35.0),
        Point::new(139.0, 35.05),
        Point::new(139.0, 35.1),
    ];
    let norm = normalize_projected(&project(&pts));
    assert!(norm.iter().all(|c| c.x == norm[0].x));
    assert!(norm[0].y > norm[1].y && norm[1].y > norm[2].y);
}

#[test]
fn spacing_then_fitting_keeps_gaps_before_fit() {
    let route = fixture("tomei_geo");
    let pts: Vec<Point<f64>> = route.nodes.iter().filter_map(|n| n.geo()).collect();
    let norm = normalize_projected(&project(&pts));
    let spaced = space_out(&norm, 1.65, 16.0);
    for w in spaced.windows(2) {
        assert!(planar_distance(w[0], w[1]) >= 16.0 - 1e-6);
    }
    let fitted = fit_to_viewport(&spaced, 6.0);
    let refit = fit_to_viewport(&fitted, 6.0);
    for (a, b) in fitted.iter().zip(&refit) {
        assert!((a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9);
    }
}

#[test]
fn editor_output_feeds_the_board() {
    let geo = fixture("tomei_geo");
    // Shuffle the rows and mark Tokyo as the start.
    let mut rows: Vec<EditorRow> = geo
        .nodes
        .iter()
        .rev()
        .map(|n| EditorRow {
            is_start: n.id == "tokyo",
            kind: n.kind,
            name: n.name.clone(),
            lat: n.lat,
            lon: n.lon,
            connection_road: n.connection_road.clone().unwrap_or_default(),
            ..Default::default()
        })
        .collect();
    rows.swap(1, 5);
    let meta = EditorMeta {
        id: "tomei".into(),
        name: "東名高速道路".into(),
        ..Default::default()
    };
    let built = build_route(&rows, &meta).unwrap();
    let route = built.route;
    assert!(route.validate_for_save().is_ok());

    let names: Vec<&str> = route.nodes.iter().map(|n| n.name.as_str()).collect();
    let expected: Vec<&str> = geo.nodes.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, expected);

    let km: Vec<f64> = route.nodes.iter().map(|n| n.km.unwrap()).collect();
    assert_eq!(km[0], 0.0);
    assert!(km.windows(2).all(|w| w[0] <= w[1]));

    let ids: std::collections::HashSet<&str> = route.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids.len(), route.nodes.len());

    for n in &route.nodes {
        let (x, y) = (n.x.unwrap(), n.y.unwrap());
        assert!((0.0..=100.0).contains(&x) && (0.0..=100.0).contains(&y));
    }
    let jct = route.nodes.iter().find(|n| n.kind == NodeKind::JCT).unwrap();
    assert_eq!(jct.connection_road.as_deref(), Some("圏央道"));

    // Persist, read back, lay out and play.
    let json = route.to_json_pretty().unwrap();
    let back = Route::from_json(&json).unwrap();
    let back_ids: Vec<&str> = back.nodes.iter().map(|n| n.id.as_str()).collect();
    let built_ids: Vec<&str> = route.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(back_ids, built_ids);
    assert_in_viewport(&back, &RenderConfig::default());
    let mut board = BoardState::new(&back);
    for n in &back.nodes {
        board.input(&n.id, &n.name);
    }
    assert!(board.is_complete());
    assert!(board.segments().iter().all(|s| s.open));
}

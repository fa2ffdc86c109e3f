//! Declarative SVG rendering of a laid-out route board.

use std::collections::HashMap;

use crate::board::{BoardState, NodeStatus};
use crate::config::RenderConfig;
use crate::pipeline::LaidOutRoute;
use crate::view::{label_pixels, node_pixels, to_pixels, to_view};

pub const ROAD_GREEN: &str = "#2e9e4f";
pub const ROAD_GREY: &str = "#b8b8b8";
const NODE_RADIUS: f64 = 14.0;

pub fn svg_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn status_fill(status: NodeStatus) -> &'static str {
    match status {
        NodeStatus::Correct => "#d9f2e0",
        NodeStatus::Error => "#f8d7da",
        NodeStatus::Empty => "#ffffff",
    }
}

/// Render the board at `width`×`height` pixels. Correct nodes show their
/// name; the others show their kind.
pub fn render_board_svg(
    route: &LaidOutRoute,
    state: &BoardState,
    cfg: &RenderConfig,
    width: u32,
    height: u32,
) -> String {
    let (w, h) = (width as f64, height as f64);
    let centres: HashMap<&str, (f64, f64)> = route
        .nodes
        .iter()
        .map(|n| {
            let c = node_pixels(n, cfg, w, h);
            (n.node.id.as_str(), (c.x, c.y))
        })
        .collect();

    let mut s = String::new();
    s.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    s.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\" font-family=\"sans-serif\" font-size=\"16\">\n",
        width, height, width, height
    ));
    s.push_str("<rect x=\"0\" y=\"0\" width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>\n");

    for lm in &route.landmarks {
        let p = to_pixels(to_view(geo_types::Coord { x: lm.x, y: lm.y }, cfg), w, h);
        s.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" fill=\"#8a8a8a\" font-size=\"13\" class=\"landmark {}\">{}</text>\n",
            p.x,
            p.y,
            svg_escape(lm.type_.as_deref().unwrap_or("")),
            svg_escape(&lm.name)
        ));
    }

    for seg in state.segments() {
        let (Some(a), Some(b)) = (centres.get(seg.from.as_str()), centres.get(seg.to.as_str()))
        else {
            continue;
        };
        s.push_str(&format!(
            "<path d=\"M {:.2} {:.2} L {:.2} {:.2}\" stroke=\"{}\" stroke-width=\"10\" stroke-linecap=\"round\" fill=\"none\"/>\n",
            a.0,
            a.1,
            b.0,
            b.1,
            if seg.open { ROAD_GREEN } else { ROAD_GREY }
        ));
    }

    for n in &route.nodes {
        let c = node_pixels(n, cfg, w, h);
        let l = label_pixels(n, cfg, w, h);
        let status = state.status(&n.node.id);
        let kind = n.node.kind;
        s.push_str(&format!(
            "<g class=\"node {}\"><circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.1}\" fill=\"{}\" stroke=\"#333\" stroke-width=\"2\"/>",
            kind.class_name(),
            c.x,
            c.y,
            NODE_RADIUS,
            status_fill(status)
        ));
        s.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" fill=\"#333\">{}</text>",
            c.x,
            c.y,
            kind.icon()
        ));
        s.push_str(&format!(
            "<path d=\"M {:.2} {:.2} L {:.2} {:.2}\" stroke=\"#ccc\" stroke-width=\"1\"/>",
            c.x, c.y, l.x, l.y
        ));
        let text = if status == NodeStatus::Correct {
            n.node.name.as_str()
        } else {
            kind.as_str()
        };
        s.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" fill=\"#333\">{}</text>",
            l.x,
            l.y,
            svg_escape(text)
        ));
        if kind.shows_connection()
            && let Some(road) = n.node.connection_road.as_deref()
        {
            let cities = n
                .node
                .connection_cities
                .as_deref()
                .map(|c| format!(" ({c})"))
                .unwrap_or_default();
            s.push_str(&format!(
                "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" fill=\"#666\" font-size=\"12\">{}</text>",
                l.x,
                l.y + 16.0,
                svg_escape(&format!("{road}{cities}"))
            ));
        }
        s.push_str("</g>\n");
    }

    s.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" fill=\"#333\" font-size=\"18\">{}</text>\n",
        12.0,
        h - 12.0,
        svg_escape(state.message())
    ));
    s.push_str("</svg>\n");
    s
}

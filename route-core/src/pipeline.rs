use geo_types::Coord;
use serde::Serialize;

use crate::config::RenderConfig;
use crate::error::{LayoutError, LayoutResult};
use crate::fit::fit_to_viewport;
use crate::labels::{label_offsets, LabelOffset};
use crate::model::{Landmark, Node, Route};
use crate::normalize::{normalize_precomputed, normalize_projected};
use crate::order::to_fixed;
use crate::projection::project_nodes;
use crate::spacing::space_out;

/// Where the base layout came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateSource {
    Geo,
    Precomputed,
}

/// A node with its final board position and label placement.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedNode {
    pub node: Node,
    /// Fitted position in percent of the board.
    pub position: Coord<f64>,
    pub label: LabelOffset,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LaidOutRoute {
    pub id: String,
    pub name: String,
    pub headline: String,
    pub nodes: Vec<PlacedNode>,
    pub landmarks: Vec<Landmark>,
    pub source: CoordinateSource,
}

/// Percent coordinates in 0..100 for a node list, from geography when every
/// node has it. Mixed geo presence is an error; the caller picks a fallback.
pub fn normalized_positions(nodes: &[Node]) -> LayoutResult<Vec<Coord<f64>>> {
    if nodes.is_empty() {
        return Err(LayoutError::EmptyInput);
    }
    let projected = project_nodes(nodes)?;
    Ok(normalize_projected(&projected))
}

/// Geo layout when complete, precomputed coordinates otherwise.
pub fn base_positions(nodes: &[Node]) -> LayoutResult<(Vec<Coord<f64>>, CoordinateSource)> {
    match normalized_positions(nodes) {
        Ok(pos) => Ok((pos, CoordinateSource::Geo)),
        Err(LayoutError::IncompleteGeoData { missing, total }) => {
            if missing < total {
                log::warn!(
                    "{missing} of {total} nodes lack lat/lon; using stored x/y for all nodes"
                );
            }
            Ok((normalize_precomputed(nodes), CoordinateSource::Precomputed))
        }
        Err(e) => Err(e),
    }
}

/// Run normalization, spacing, fitting and label placement over ordered nodes.
/// Node order is taken as authoritative.
pub fn layout_nodes(
    nodes: &[Node],
    cfg: &RenderConfig,
) -> LayoutResult<(Vec<PlacedNode>, CoordinateSource)> {
    cfg.validate()?;
    let (base, source) = base_positions(nodes)?;
    let spaced = space_out(&base, cfg.distance_scale, cfg.min_gap);
    let fitted = fit_to_viewport(&spaced, cfg.margin);
    let labels = label_offsets(&fitted, cfg.min_gap);
    log::debug!("laid out {} nodes from {:?} coordinates", nodes.len(), source);
    let placed = nodes
        .iter()
        .zip(fitted)
        .zip(labels)
        .map(|((node, position), label)| PlacedNode {
            node: node.clone(),
            position,
            label,
        })
        .collect();
    Ok((placed, source))
}

/// Board path: lay out a persisted route without reordering it.
pub fn layout_route(route: &Route, cfg: &RenderConfig) -> LayoutResult<LaidOutRoute> {
    let (nodes, source) = layout_nodes(&route.nodes, cfg)?;
    Ok(LaidOutRoute {
        id: route.id.clone(),
        name: route.name.clone(),
        headline: route.headline(),
        nodes,
        landmarks: route.landmarks.clone().unwrap_or_default(),
        source,
    })
}

impl LaidOutRoute {
    /// Route with each node's `x`/`y` replaced by its fitted position.
    pub fn to_route(&self, template: &Route) -> Route {
        let nodes = self
            .nodes
            .iter()
            .map(|p| Node {
                x: Some(round2(p.position.x)),
                y: Some(round2(p.position.y)),
                ..p.node.clone()
            })
            .collect();
        Route {
            nodes,
            ..template.clone()
        }
    }
}

pub fn round2(v: f64) -> f64 {
    to_fixed(v, 2)
}

//! Geometry core for highway route boards.
//!
//! Pipeline: geo projection → nearest-neighbour ordering (editor only) →
//! normalization → directional spacing → viewport fitting → label offsets.
//! Every stage is a pure function over slices; nothing here touches the DOM.

pub mod board;
pub mod config;
pub mod editor;
pub mod error;
pub mod fit;
pub mod labels;
pub mod model;
pub mod normalize;
pub mod order;
pub mod pipeline;
pub mod projection;
pub mod slug;
pub mod spacing;
pub mod svg;
pub mod view;

pub use board::{BoardState, NodeStatus, Segment};
pub use config::{Pan, RenderConfig};
pub use editor::{build_route, BuiltRoute, EditorMeta, EditorRow};
pub use error::{LayoutError, LayoutResult};
pub use labels::{LabelOffset, Side};
pub use model::{Landmark, Node, NodeKind, Route, RouteSummary, SaveReply};
pub use pipeline::{layout_nodes, layout_route, CoordinateSource, LaidOutRoute, PlacedNode};
pub use svg::render_board_svg;

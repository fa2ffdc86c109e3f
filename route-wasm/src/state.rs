use std::cell::RefCell;
use std::rc::Rc;

use web_sys::{Document, Window};

use route_core::{layout_route, BoardState, LaidOutRoute, LayoutResult, RenderConfig, Route};

/// The route on the board with its layout and answers. Either all three
/// belong to one route or the board is empty.
#[derive(Debug, Default)]
pub struct BoardView {
    pub route: Option<Route>,
    pub laid: Option<LaidOutRoute>,
    pub board: BoardState,
}

impl BoardView {
    /// Lay out `route` and start fresh answers. On failure the previous route
    /// is dropped too, so nothing stale stays interactive.
    pub fn load(&mut self, route: Route, cfg: &RenderConfig) -> LayoutResult<()> {
        match layout_route(&route, cfg) {
            Ok(laid) => {
                log::info!("route {} laid out from {:?} data", laid.id, laid.source);
                self.board = BoardState::new(&route);
                self.laid = Some(laid);
                self.route = Some(route);
                Ok(())
            }
            Err(e) => {
                log::error!("layout of {} failed: {e}", route.id);
                *self = BoardView::default();
                Err(e)
            }
        }
    }
}

/// Board page state, shared across the WASM callbacks behind
/// `Rc<RefCell<_>>`.
pub struct State {
    pub window: Window,
    pub document: Document,
    pub cfg: RenderConfig,
    pub view: BoardView,
}

impl State {
    pub fn new(window: Window, document: Document, cfg: RenderConfig) -> Self {
        State {
            window,
            document,
            cfg,
            view: BoardView::default(),
        }
    }
}

pub type SharedState = Rc<RefCell<State>>;

/// Thread local storage for the single runtime state instance.
thread_local! {
    pub static STATE: RefCell<Option<SharedState>> = const { RefCell::new(None) };
}

/// Editor page handles. Routes are rebuilt from the table on every click.
pub struct EditorState {
    pub window: Window,
    pub document: Document,
}

pub type SharedEditor = Rc<RefCell<EditorState>>;

thread_local! {
    pub static EDITOR: RefCell<Option<SharedEditor>> = const { RefCell::new(None) };
}

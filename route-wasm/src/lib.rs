//! Browser front end of the route board: the quiz board and the route editor.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

mod api;
mod board;
mod constants;
mod editor;
mod state;
mod upload;
mod utils;

use constants::{ID_BOARD, ID_NODE_TABLE};
use state::{State, STATE};
use utils::{config_from_query, get_query_param, init_logging};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let search = window.location().search().unwrap_or_default();
    init_logging(get_query_param(&search, "debug").is_some());

    // The page markup decides which front end runs.
    if document.get_element_by_id(ID_NODE_TABLE).is_some() {
        log::info!("starting route editor");
        return editor::start(window, document);
    }
    if document.get_element_by_id(ID_BOARD).is_none() {
        log::warn!("no board or editor on this page");
        return Ok(());
    }

    let cfg = config_from_query(&search);
    log::debug!("layout config {cfg:?}");
    let state = Rc::new(RefCell::new(State::new(window, document, cfg)));
    STATE.with(|cell| cell.replace(Some(state.clone())));

    board::attach_controls(&state)?;
    upload::attach_file_input(&state)?;

    let preferred = get_query_param(&search, "hw").filter(|id| !id.is_empty());
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = board::populate_routes(state, preferred).await {
            log::error!("loading routes failed: {e:?}");
        }
    });
    Ok(())
}

/// Current board as SVG, sized to the board element.
#[wasm_bindgen]
pub fn board_svg() -> Option<String> {
    STATE.with(|cell| {
        let st = cell.borrow().clone()?;
        let s = st.borrow();
        let laid = s.view.laid.as_ref()?;
        let (w, h) = board::board_size(&s);
        Some(route_core::render_board_svg(
            laid,
            &s.view.board,
            &s.cfg,
            w as u32,
            h as u32,
        ))
    })
}

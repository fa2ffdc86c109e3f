use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, FileReader, HtmlInputElement};

use route_core::Route;

use crate::board::load_route;
use crate::constants::{ID_ROUTE_FILE, ID_STATUS};
use crate::state::SharedState;
use crate::utils::{by_id, set_text};

/// Wire the file input that loads a route JSON straight onto the board.
pub fn attach_file_input(state: &SharedState) -> Result<(), JsValue> {
    let doc: Document = state.borrow().document.clone();
    let Some(input) = by_id::<HtmlInputElement>(&doc, ID_ROUTE_FILE) else {
        return Ok(());
    };
    let st = state.clone();
    let input_for_closure = input.clone();
    let onchange = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |_e: Event| {
        let Some(file) = input_for_closure.files().and_then(|files| files.item(0)) else {
            log::info!("no file selected");
            return;
        };
        let reader = match FileReader::new() {
            Ok(r) => r,
            Err(e) => {
                log::error!("FileReader unavailable: {e:?}");
                return;
            }
        };
        let st2 = st.clone();
        let reader_for_closure = reader.clone();
        let onload = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |_ev: Event| {
            let text = reader_for_closure
                .result()
                .ok()
                .and_then(|r| r.as_string())
                .unwrap_or_default();
            if text.is_empty() {
                log::warn!("selected file is empty or unreadable");
                return;
            }
            match Route::from_json(&text) {
                Ok(route) => {
                    if let Err(e) = load_route(&st2, route) {
                        log::error!("drawing uploaded route failed: {e:?}");
                    }
                }
                Err(e) => {
                    log::warn!("unrecognized route JSON: {e}");
                    let doc = st2.borrow().document.clone();
                    set_text(&doc, ID_STATUS, "高速道路データを読み込めませんでした");
                }
            }
        }));
        reader.set_onload(Some(onload.as_ref().unchecked_ref()));
        if let Err(e) = reader.read_as_text(&file) {
            log::error!("failed to read file: {e:?}");
        }
        onload.forget();
    }));
    input.set_onchange(Some(onchange.as_ref().unchecked_ref()));
    onchange.forget();
    Ok(())
}

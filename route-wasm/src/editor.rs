use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

use route_core::editor::MSG_NEED_POINTS;
use route_core::{build_route, BuiltRoute, EditorMeta, EditorRow, LayoutError, NodeKind, Route};

use crate::api;
use crate::constants::*;
use crate::state::{EditorState, SharedEditor, EDITOR};
use crate::utils::{by_id, create, set_text};

const ROW_CLASS: &str = "node-row";

/// Seed rows shown on a fresh editor.
const INITIAL_ROWS: [(&str, f64, f64); 2] = [("東京", 35.631, 139.639), ("横浜町田", 35.513, 139.47)];

fn text_cell(doc: &Document, tr: &Element, field: &str, kind: &str, value: &str) -> Result<(), JsValue> {
    let td = doc.create_element("td")?;
    let input: HtmlInputElement = doc.create_element("input")?.dyn_into()?;
    input.set_type(kind);
    if kind == "number" {
        input.set_step("any");
    }
    input.set_attribute("data-field", field)?;
    input.set_value(value);
    td.append_child(&input)?;
    tr.append_child(&td)?;
    Ok(())
}

/// Append one editable row to the node table.
pub fn add_row(doc: &Document, name: &str, lat: Option<f64>, lon: Option<f64>) -> Result<(), JsValue> {
    let Some(table) = by_id::<HtmlElement>(doc, ID_NODE_TABLE) else {
        return Ok(());
    };
    let tr = create(doc, "tr", ROW_CLASS)?;

    let td = doc.create_element("td")?;
    let start: HtmlInputElement = doc.create_element("input")?.dyn_into()?;
    start.set_type("radio");
    start.set_name("start");
    start.set_attribute("data-field", "start")?;
    if table.query_selector(&format!("tr.{ROW_CLASS}"))?.is_none() {
        start.set_checked(true);
    }
    td.append_child(&start)?;
    tr.append_child(&td)?;

    let td = doc.create_element("td")?;
    let select: HtmlSelectElement = doc.create_element("select")?.dyn_into()?;
    select.set_attribute("data-field", "kind")?;
    for kind in NodeKind::ALL {
        let opt = web_sys::HtmlOptionElement::new_with_text_and_value(kind.as_str(), kind.as_str())?;
        select.append_child(&opt)?;
    }
    td.append_child(&select)?;
    tr.append_child(&td)?;

    let fmt = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();
    text_cell(doc, &tr, "name", "text", name)?;
    text_cell(doc, &tr, "lat", "number", &fmt(lat))?;
    text_cell(doc, &tr, "lon", "number", &fmt(lon))?;
    text_cell(doc, &tr, "road", "text", "")?;
    text_cell(doc, &tr, "cities", "text", "")?;

    let td = doc.create_element("td")?;
    let del: HtmlElement = create(doc, "button", "delete")?.dyn_into()?;
    del.set_inner_text("削除");
    let tr_for_closure = tr.clone();
    let ondelete = Closure::<dyn FnMut()>::wrap(Box::new(move || {
        tr_for_closure.remove();
    }));
    del.set_onclick(Some(ondelete.as_ref().unchecked_ref()));
    ondelete.forget();
    td.append_child(&del)?;
    tr.append_child(&td)?;

    table.append_child(&tr)?;
    Ok(())
}

fn field<T: JsCast>(tr: &Element, name: &str) -> Option<T> {
    tr.query_selector(&format!("[data-field=\"{name}\"]"))
        .ok()??
        .dyn_into::<T>()
        .ok()
}

fn input_value(tr: &Element, name: &str) -> String {
    field::<HtmlInputElement>(tr, name)
        .map(|i| i.value())
        .unwrap_or_default()
}

fn parse_coord(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Read the node table, one `EditorRow` per table row.
pub fn read_rows(doc: &Document) -> Result<Vec<EditorRow>, JsValue> {
    let rows = doc.query_selector_all(&format!("#{ID_NODE_TABLE} tr.{ROW_CLASS}"))?;
    let mut out = Vec::with_capacity(rows.length() as usize);
    for i in 0..rows.length() {
        let Some(tr) = rows.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let kind = field::<HtmlSelectElement>(&tr, "kind")
            .and_then(|s| NodeKind::parse(&s.value()))
            .unwrap_or_default();
        out.push(EditorRow {
            is_start: field::<HtmlInputElement>(&tr, "start").is_some_and(|r| r.checked()),
            kind,
            name: input_value(&tr, "name"),
            lat: parse_coord(&input_value(&tr, "lat")),
            lon: parse_coord(&input_value(&tr, "lon")),
            connection_road: input_value(&tr, "road"),
            connection_cities: input_value(&tr, "cities"),
        });
    }
    Ok(out)
}

fn meta_value(doc: &Document, id: &str) -> String {
    by_id::<HtmlInputElement>(doc, id)
        .map(|i| i.value())
        .unwrap_or_default()
}

pub fn read_meta(doc: &Document) -> EditorMeta {
    EditorMeta {
        id: meta_value(doc, ID_META_ID),
        name: meta_value(doc, ID_META_NAME),
        origin_city: meta_value(doc, ID_META_ORIGIN),
        destination_city: meta_value(doc, ID_META_DESTINATION),
    }
}

fn set_json_output(doc: &Document, text: &str) {
    if let Some(area) = by_id::<HtmlTextAreaElement>(doc, ID_JSON_OUTPUT) {
        area.set_value(text);
    } else {
        set_text(doc, ID_JSON_OUTPUT, text);
    }
}

/// Route for the reorder button; the error is the text for the result line.
fn reorder_result(rows: &[EditorRow], meta: &EditorMeta) -> Result<BuiltRoute, &'static str> {
    build_route(rows, meta).map_err(|e| match e {
        LayoutError::EmptyInput => MSG_NEED_POINTS,
        other => {
            log::warn!("reorder failed: {other}");
            MSG_BAD_POINTS
        }
    })
}

/// Route for the save button; any build failure reads as bad points.
fn save_payload(rows: &[EditorRow], meta: &EditorMeta) -> Result<BuiltRoute, &'static str> {
    build_route(rows, meta).map_err(|e| {
        log::warn!("save build failed: {e}");
        MSG_BAD_POINTS
    })
}

/// Show the summary and JSON of a freshly built route.
fn show_built(doc: &Document, built: BuiltRoute) -> Result<Route, JsValue> {
    set_text(doc, ID_RESULT, &built.summary());
    let json = built
        .route
        .to_json_pretty()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    set_json_output(doc, &json);
    log::info!("{}", built.summary());
    Ok(built.route)
}

/// Order the typed points and show the summary and route JSON.
pub fn reorder(ed: &SharedEditor) -> Result<(), JsValue> {
    let doc = ed.borrow().document.clone();
    let rows = read_rows(&doc)?;
    match reorder_result(&rows, &read_meta(&doc)) {
        Ok(built) => {
            show_built(&doc, built)?;
        }
        Err(msg) => {
            set_text(&doc, ID_RESULT, msg);
            set_json_output(&doc, "");
        }
    }
    Ok(())
}

/// Rebuild the route from the table as it stands, show it, then send it to
/// the store.
pub fn save(ed: &SharedEditor) -> Result<(), JsValue> {
    let (window, doc) = {
        let e = ed.borrow();
        (e.window.clone(), e.document.clone())
    };
    set_text(&doc, ID_SAVE_STATUS, "");
    let rows = read_rows(&doc)?;
    let built = match save_payload(&rows, &read_meta(&doc)) {
        Ok(built) => built,
        Err(msg) => {
            set_text(&doc, ID_SAVE_STATUS, msg);
            return Ok(());
        }
    };
    let route = show_built(&doc, built)?;
    wasm_bindgen_futures::spawn_local(async move {
        match api::save_route(&window, &route).await {
            Ok(reply) => {
                log::info!(
                    "saved {} ({} routes stored)",
                    route.id,
                    reply.highways_count.unwrap_or_default()
                );
                set_text(&doc, ID_SAVE_STATUS, MSG_SAVED);
            }
            Err(e) => {
                log::error!("save of {} failed: {e}", route.id);
                set_text(&doc, ID_SAVE_STATUS, &format!("{MSG_SAVE_FAILED}: {e}"));
            }
        }
    });
    Ok(())
}

fn on_click(doc: &Document, id: &str, f: impl FnMut() + 'static) {
    if let Some(btn) = by_id::<HtmlElement>(doc, id) {
        let cb = Closure::<dyn FnMut()>::wrap(Box::new(f));
        btn.set_onclick(Some(cb.as_ref().unchecked_ref()));
        cb.forget();
    }
}

/// Entry point of the editor page.
pub fn start(window: web_sys::Window, document: Document) -> Result<(), JsValue> {
    for (name, lat, lon) in INITIAL_ROWS {
        add_row(&document, name, Some(lat), Some(lon))?;
    }
    let ed: SharedEditor = Rc::new(RefCell::new(EditorState {
        window,
        document: document.clone(),
    }));
    EDITOR.with(|cell| cell.replace(Some(ed.clone())));

    let doc_add = document.clone();
    on_click(&document, ID_ADD_ROW, move || {
        if let Err(e) = add_row(&doc_add, "", None, None) {
            log::error!("add row failed: {e:?}");
        }
    });
    let ed_reorder = ed.clone();
    on_click(&document, ID_REORDER, move || {
        if let Err(e) = reorder(&ed_reorder) {
            log::error!("reorder failed: {e:?}");
        }
    });
    let ed_save = ed.clone();
    on_click(&document, ID_SAVE, move || {
        if let Err(e) = save(&ed_save) {
            log::error!("save failed: {e:?}");
        }
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn starter_rows() -> Vec<EditorRow> {
        INITIAL_ROWS
            .iter()
            .map(|&(name, lat, lon)| EditorRow {
                name: name.to_string(),
                lat: Some(lat),
                lon: Some(lon),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn starter_rows_save_without_reorder() {
        let built = save_payload(&starter_rows(), &EditorMeta::default()).unwrap();
        assert_eq!(built.route.nodes.len(), 2);
        assert_eq!(built.route.nodes[0].name, "東京");
        assert_eq!(built.summary(), "並び替え完了: 全2地点 / 想定距離 20.1km");
    }

    #[test]
    fn save_sees_rows_edited_after_reorder() {
        let mut rows = starter_rows();
        let before = reorder_result(&rows, &EditorMeta::default()).unwrap();
        rows.push(EditorRow {
            name: "厚木".into(),
            lat: Some(35.44),
            lon: Some(139.36),
            ..Default::default()
        });
        let saved = save_payload(&rows, &EditorMeta::default()).unwrap();
        assert_eq!(before.route.nodes.len(), 2);
        assert_eq!(saved.route.nodes.len(), 3);
    }

    #[test]
    fn failure_messages_per_button() {
        let blank = [EditorRow::default()];
        assert_eq!(
            reorder_result(&blank, &EditorMeta::default()).unwrap_err(),
            MSG_NEED_POINTS
        );
        assert_eq!(
            save_payload(&blank, &EditorMeta::default()).unwrap_err(),
            MSG_BAD_POINTS
        );
    }
}

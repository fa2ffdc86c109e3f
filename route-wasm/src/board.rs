use std::collections::HashMap;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, HtmlInputElement, HtmlSelectElement};

use route_core::svg::{svg_escape, ROAD_GREEN, ROAD_GREY};
use route_core::view::{node_pixels, to_view};
use route_core::{NodeStatus, Route};

use crate::api;
use crate::constants::*;
use crate::state::{SharedState, State};
use crate::utils::{by_id, create, set_text};

const ROADS_LAYER: &str = "roads";

pub(crate) fn board_size(s: &State) -> (f64, f64) {
    by_id::<HtmlElement>(&s.document, ID_BOARD)
        .map(|el| (el.client_width() as f64, el.client_height() as f64))
        .filter(|(w, h)| *w > 0.0 && *h > 0.0)
        .unwrap_or((960.0, 640.0))
}

/// Put a route on the board. Answers start empty. A route that cannot be
/// laid out leaves an empty board with the error as status.
pub fn load_route(st: &SharedState, route: Route) -> Result<(), JsValue> {
    let failure = {
        let mut s = st.borrow_mut();
        let cfg = s.cfg;
        s.view.load(route, &cfg).err()
    };
    draw(st)?;
    if let Some(e) = failure {
        let doc = st.borrow().document.clone();
        set_text(&doc, ID_INFO, "");
        set_text(&doc, ID_STATUS, &e.to_string());
    }
    Ok(())
}

/// Rebuild the board DOM: road layer, then one marker and one label per node.
pub fn draw(st: &SharedState) -> Result<(), JsValue> {
    let s = st.borrow();
    let doc = s.document.clone();
    let Some(board) = by_id::<HtmlElement>(&doc, ID_BOARD) else {
        return Ok(());
    };
    board.set_inner_html("");
    let Some(laid) = s.view.laid.as_ref() else {
        return Ok(());
    };
    set_text(&doc, ID_INFO, &laid.headline);

    let roads = create(&doc, "div", ROADS_LAYER)?;
    roads.set_id(ROADS_LAYER);
    board.append_child(&roads)?;

    for lm in &laid.landmarks {
        let p = to_view(geo_types_coord(lm.x, lm.y), &s.cfg);
        let el = create(&doc, "div", "landmark")?;
        if let Some(t) = lm.type_.as_deref() {
            el.class_list().add_1(t)?;
        }
        el.set_text_content(Some(&lm.name));
        place(&el, p.x, p.y)?;
        board.append_child(&el)?;
    }

    for n in &laid.nodes {
        let p = to_view(n.position, &s.cfg);
        let marker = create(&doc, "div", "node")?;
        marker.class_list().add_1(n.node.kind.class_name())?;
        marker.set_attribute("data-id", &n.node.id)?;
        marker.set_text_content(Some(n.node.kind.icon()));
        place(&marker, p.x, p.y)?;
        board.append_child(&marker)?;

        let label = create(&doc, "div", "label")?;
        label.set_attribute("data-id", &n.node.id)?;
        place(&label, p.x, p.y)?;
        let label_el: HtmlElement = label.clone().dyn_into()?;
        label_el.style().set_property(
            "transform",
            &format!(
                "translate(-50%, -50%) translate({:.1}px, {:.1}px)",
                n.label.dx, n.label.dy
            ),
        )?;
        let input: HtmlInputElement = create(&doc, "input", "answer")?.dyn_into()?;
        input.set_type("text");
        input.set_placeholder(n.node.kind.as_str());
        input.set_attribute("data-id", &n.node.id)?;
        if let Some(state) = s.view.board.node(&n.node.id) {
            input.set_value(&state.answer);
        }
        label.append_child(&input)?;
        if n.node.kind.shows_connection()
            && let Some(road) = n.node.connection_road.as_deref()
        {
            let conn = create(&doc, "div", "connection")?;
            let text = match n.node.connection_cities.as_deref() {
                Some(cities) => format!("{road} ({cities})"),
                None => road.to_string(),
            };
            conn.set_text_content(Some(&text));
            label.append_child(&conn)?;
        }
        board.append_child(&label)?;

        let st_input = st.clone();
        let id = n.node.id.clone();
        let input_for_closure = input.clone();
        let oninput = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |_e: Event| {
            let value = input_for_closure.value();
            let status = st_input.borrow_mut().view.board.input(&id, &value);
            if status.is_some()
                && let Err(e) = refresh(&st_input)
            {
                log::error!("refresh failed: {e:?}");
            }
        }));
        input.set_oninput(Some(oninput.as_ref().unchecked_ref()));
        oninput.forget();
    }
    drop(s);
    refresh(st)
}

fn geo_types_coord(x: f64, y: f64) -> geo_types::Coord<f64> {
    geo_types::Coord { x, y }
}

fn place(el: &web_sys::Element, x: f64, y: f64) -> Result<(), JsValue> {
    let el: HtmlElement = el.clone().dyn_into()?;
    let style = el.style();
    style.set_property("left", &format!("{x:.2}%"))?;
    style.set_property("top", &format!("{y:.2}%"))?;
    Ok(())
}

/// Sync status classes, road colours and the message line with the board
/// state without touching the inputs.
pub fn refresh(st: &SharedState) -> Result<(), JsValue> {
    let s = st.borrow();
    let doc = &s.document;
    let Some(laid) = s.view.laid.as_ref() else {
        return Ok(());
    };

    let labels = doc.query_selector_all(".label[data-id]")?;
    for i in 0..labels.length() {
        let Some(el) = labels.item(i).and_then(|n| n.dyn_into::<web_sys::Element>().ok()) else {
            continue;
        };
        let Some(id) = el.get_attribute("data-id") else {
            continue;
        };
        let classes = el.class_list();
        classes.remove_2("correct", "error")?;
        if let Some(class) = s.view.board.status(&id).class_name() {
            classes.add_1(class)?;
        }
    }

    let (w, h) = board_size(&s);
    let centres: HashMap<&str, (f64, f64)> = laid
        .nodes
        .iter()
        .map(|n| {
            let c = node_pixels(n, &s.cfg, w, h);
            (n.node.id.as_str(), (c.x, c.y))
        })
        .collect();
    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">"
    );
    for seg in s.view.board.segments() {
        let (Some(a), Some(b)) = (centres.get(seg.from.as_str()), centres.get(seg.to.as_str()))
        else {
            continue;
        };
        svg.push_str(&format!(
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"10\" stroke-linecap=\"round\" data-from=\"{}\" data-to=\"{}\"/>",
            a.0,
            a.1,
            b.0,
            b.1,
            if seg.open { ROAD_GREEN } else { ROAD_GREY },
            svg_escape(&seg.from),
            svg_escape(&seg.to)
        ));
    }
    svg.push_str("</svg>");
    if let Some(roads) = by_id::<HtmlElement>(doc, ROADS_LAYER) {
        roads.set_inner_html(&svg);
    }

    set_text(doc, ID_STATUS, s.view.board.message());
    if s.view.board.is_complete() {
        log::info!("{} complete", s.view.board.route_id());
    }
    Ok(())
}

fn fill_inputs(st: &SharedState) -> Result<(), JsValue> {
    let s = st.borrow();
    let inputs = s.document.query_selector_all("input.answer[data-id]")?;
    for i in 0..inputs.length() {
        let Some(input) = inputs.item(i).and_then(|n| n.dyn_into::<HtmlInputElement>().ok()) else {
            continue;
        };
        let Some(id) = input.get_attribute("data-id") else {
            continue;
        };
        let value = match s.view.board.status(&id) {
            NodeStatus::Empty => String::new(),
            _ => s.view.board.node(&id).map(|n| n.answer.clone()).unwrap_or_default(),
        };
        input.set_value(&value);
    }
    Ok(())
}

fn on_click(st: &SharedState, id: &str, f: impl FnMut() + 'static) {
    let doc = st.borrow().document.clone();
    if let Some(btn) = by_id::<HtmlElement>(&doc, id) {
        let cb = Closure::<dyn FnMut()>::wrap(Box::new(f));
        btn.set_onclick(Some(cb.as_ref().unchecked_ref()));
        cb.forget();
    }
}

/// Fetch a route by id and show it; the status line reports failures.
pub fn select_route(st: &SharedState, id: String) {
    let st = st.clone();
    wasm_bindgen_futures::spawn_local(async move {
        let window = st.borrow().window.clone();
        match api::fetch_route(&window, &id).await {
            Some(route) => {
                if let Err(e) = load_route(&st, route) {
                    log::error!("drawing {id} failed: {e:?}");
                }
            }
            None => set_text(&st.borrow().document, ID_STATUS, &format!("{id} を読み込めませんでした")),
        }
    });
}

/// Wire the reset, give-up and selector controls.
pub fn attach_controls(st: &SharedState) -> Result<(), JsValue> {
    let st_reset = st.clone();
    on_click(st, ID_RESET, move || {
        st_reset.borrow_mut().view.board.reset();
        if let Err(e) = fill_inputs(&st_reset).and_then(|_| refresh(&st_reset)) {
            log::error!("reset failed: {e:?}");
        }
    });

    let st_give_up = st.clone();
    on_click(st, ID_GIVE_UP, move || {
        st_give_up.borrow_mut().view.board.give_up();
        if let Err(e) = fill_inputs(&st_give_up).and_then(|_| refresh(&st_give_up)) {
            log::error!("give up failed: {e:?}");
        }
    });

    let doc = st.borrow().document.clone();
    if let Some(select) = by_id::<HtmlSelectElement>(&doc, ID_ROUTE_SELECT) {
        let st_select = st.clone();
        on_click(st, ID_SELECT_BUTTON, move || {
            let id = select.value();
            if !id.is_empty() {
                select_route(&st_select, id);
            }
        });
    }
    Ok(())
}

/// Fill the route selector from the store and load `preferred` or the first
/// listed route.
pub async fn populate_routes(st: SharedState, preferred: Option<String>) -> Result<(), JsValue> {
    let (window, doc) = {
        let s = st.borrow();
        (s.window.clone(), s.document.clone())
    };
    let routes = api::list_routes(&window).await;
    if let Some(select) = by_id::<HtmlSelectElement>(&doc, ID_ROUTE_SELECT) {
        select.set_inner_html("");
        for r in &routes {
            let opt = web_sys::HtmlOptionElement::new_with_text_and_value(&r.name, &r.id)?;
            select.append_child(&opt)?;
        }
        if let Some(id) = preferred.as_deref() {
            select.set_value(id);
        }
    }
    let target = preferred.or_else(|| routes.first().map(|r| r.id.clone()));
    match target {
        Some(id) => select_route(&st, id),
        None => set_text(&doc, ID_STATUS, "高速道路データがありません"),
    }
    Ok(())
}

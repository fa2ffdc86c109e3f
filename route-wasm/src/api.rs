use wasm_bindgen::JsValue;
use web_sys::Window;

use route_core::{Route, RouteSummary, SaveReply};

use crate::constants::API_ROUTES;
use crate::utils::{fetch_text, post_json};

/// Summaries of every stored route, empty when the store is unreachable.
pub async fn list_routes(window: &Window) -> Vec<RouteSummary> {
    let Some(text) = fetch_text(window, API_ROUTES).await else {
        return Vec::new();
    };
    serde_json::from_str(&text).unwrap_or_else(|e| {
        log::warn!("bad route list: {e}");
        Vec::new()
    })
}

pub async fn fetch_route(window: &Window, id: &str) -> Option<Route> {
    let url = format!("{API_ROUTES}/{id}");
    let text = fetch_text(window, &url).await?;
    match Route::from_json(&text) {
        Ok(route) => Some(route),
        Err(e) => {
            log::warn!("route {id} unreadable: {e}");
            None
        }
    }
}

/// Upsert a route. The error string is what the operator sees.
pub async fn save_route(window: &Window, route: &Route) -> Result<SaveReply, String> {
    route.validate_for_save().map_err(|e| e.to_string())?;
    let body = serde_json::to_string(route).map_err(|e| e.to_string())?;
    let (ok, text) = post_json(window, API_ROUTES, &body)
        .await
        .map_err(|e: JsValue| e.as_string().unwrap_or_else(|| format!("{e:?}")))?;
    let reply: SaveReply = serde_json::from_str(&text).unwrap_or_default();
    if ok {
        Ok(reply)
    } else {
        Err(reply.error.unwrap_or(text))
    }
}

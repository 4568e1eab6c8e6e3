//! Browser front-end: an interactive world map with an active-fires overlay.
//!
//! All logic runs on the UI thread. The page calls `init_map` once, then
//! `toggle_fires` from the one toggle button; the fetch suspends only the
//! continuation attached to it.

use std::cell::RefCell;

use console_error_panic_hook::set_once;
use gloo_net::http::Request;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use firedata::{DataError, FireRecord, decode_active_fires};
use overlay::{ClickOutcome, ClickPath, FireOverlay, ViewportConfig};

mod leaflet;
use leaflet::{LeafletSurface, MarkerHandle};

const FIRES_URL: &str = "/api/active_fires";
const TOGGLE_BUTTON_ID: &str = "fire-toggle";

struct ViewerState {
    surface: Option<LeafletSurface>,
    overlay: FireOverlay<MarkerHandle>,
}

thread_local! {
    static STATE: RefCell<ViewerState> = RefCell::new(ViewerState {
        surface: None,
        overlay: FireOverlay::new(),
    });
}

#[wasm_bindgen(start)]
pub fn start() {
    set_once();
}

/// Build the map widget. Must run after the DOM is ready; the page calls it
/// once from its module script.
#[wasm_bindgen]
pub fn init_map() {
    let config = ViewportConfig::default();
    let surface = LeafletSurface::create(&config);
    STATE.with(|state| {
        state.borrow_mut().surface = Some(surface);
    });
    sync_button_label();
}

/// Click handler for the toggle button.
///
/// Errors never escape here; every failure becomes a user notice and the
/// button stays clickable.
#[wasm_bindgen]
pub fn toggle_fires() {
    let ready = STATE.with(|state| state.borrow().surface.is_some());
    if !ready {
        web_sys::console::warn_1(&JsValue::from_str("toggle before init_map"));
        return;
    }

    let path = STATE.with(|state| state.borrow_mut().overlay.begin_click());
    match path {
        ClickPath::Busy => {}
        ClickPath::Clear => {
            STATE.with(|state| {
                let s = &mut *state.borrow_mut();
                if let Some(surface) = s.surface.as_mut() {
                    s.overlay.clear(surface);
                }
            });
            sync_button_label();
        }
        ClickPath::Fetch => {
            set_button_enabled(false);
            spawn_local(async {
                let result = fetch_active_fires().await;
                let outcome = STATE.with(|state| {
                    let s = &mut *state.borrow_mut();
                    s.surface
                        .as_mut()
                        .map(|surface| s.overlay.finish_fetch(result, surface))
                });
                set_button_enabled(true);
                sync_button_label();
                if let Some(notice) = outcome.as_ref().and_then(ClickOutcome::notice) {
                    alert(&notice);
                }
            });
        }
    }
}

async fn fetch_active_fires() -> Result<Vec<FireRecord>, DataError> {
    let response = Request::get(FIRES_URL)
        .send()
        .await
        .map_err(|e| DataError::Transport(e.to_string()))?;
    let status_ok = response.ok();
    let status = response.status();

    let body = response
        .text()
        .await
        .map_err(|e| DataError::Transport(e.to_string()))?;

    match decode_active_fires(&body) {
        // Application failures arrive as HTTP 500 carrying the envelope;
        // only fall back to the bare status when the body is not one.
        Err(DataError::Decode(_)) if !status_ok => {
            Err(DataError::Transport(format!("HTTP {status}")))
        }
        other => other,
    }
}

fn toggle_button() -> Option<web_sys::Element> {
    web_sys::window()?.document()?.get_element_by_id(TOGGLE_BUTTON_ID)
}

fn sync_button_label() {
    let label = STATE.with(|state| state.borrow().overlay.button_label());
    if let Some(button) = toggle_button() {
        button.set_text_content(Some(label));
    }
}

fn set_button_enabled(enabled: bool) {
    if let Some(button) = toggle_button() {
        if enabled {
            let _ = button.remove_attribute("disabled");
        } else {
            let _ = button.set_attribute("disabled", "disabled");
        }
    }
}

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

use log::info;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::window;

mod config;
mod controller;
mod dom;
mod behaviors {
    pub mod carousel;
    pub mod navigation;
    pub mod popups;
    pub mod scroll_effects;
    pub mod slider;
}
mod components {
    pub mod acknowledgment;
}

use config::SiteConfig;

fn start() {
    let Some(window) = window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    let config = SiteConfig::from_document(&document);
    controller::init(&window, &document, &config);
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting page interactions");

    let Some(document) = window().and_then(|w| w.document()) else {
        return;
    };

    if document.ready_state() == "loading" {
        let on_ready = Closure::once_into_js(start);
        if let Err(e) = document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
        {
            log::warn!("Could not wait for DOMContentLoaded: {:?}", e);
        }
    } else {
        start();
    }
}

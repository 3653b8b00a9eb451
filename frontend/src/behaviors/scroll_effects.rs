use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{
    Document, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

use crate::config::RevealConfig;
use crate::dom::{self, Scope};

const ANCHORS: &str = r##"a[href^="#"]"##;
const FADE_IN: &str = ".fade-in";
const FADE_IN_VISIBLE: &str = "fade-in-visible";

/// Selector to scroll to for an in-page href. A bare `#` keeps the browser default.
pub fn anchor_target(href: &str) -> Option<&str> {
    match href {
        "#" => None,
        target if target.starts_with('#') => Some(target),
        _ => None,
    }
}

pub fn init(document: &Document, config: &RevealConfig) -> Option<()> {
    let anchors = init_smooth_scroll(document);
    let reveal = init_reveal(document, config);
    anchors.or(reveal)
}

fn init_smooth_scroll(document: &Document) -> Option<()> {
    let anchors = document.find_all(ANCHORS);
    if anchors.is_empty() {
        return None;
    }

    for anchor in anchors {
        let document = document.clone();
        let link = anchor.clone();
        dom::listen(&anchor, "click", move |e| {
            let Some(href) = link.get_attribute("href") else {
                return;
            };
            let Some(selector) = anchor_target(&href) else {
                return;
            };
            e.prevent_default();
            if let Some(target) = document.find(selector) {
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                options.set_block(ScrollLogicalPosition::Start);
                target.scroll_into_view_with_scroll_into_view_options(&options);
            }
        });
    }
    Some(())
}

fn init_reveal(document: &Document, config: &RevealConfig) -> Option<()> {
    let targets = document.find_all(FADE_IN);
    if targets.is_empty() {
        return None;
    }

    let on_intersect = Closure::wrap(Box::new(
        move |entries: Array, _observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    let _ = entry.target().class_list().add_1(FADE_IN_VISIBLE);
                }
            }
        },
    ) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(config.threshold));
    options.set_root_margin(&config.root_margin);

    let observer = match IntersectionObserver::new_with_options(
        on_intersect.as_ref().unchecked_ref(),
        &options,
    ) {
        Ok(observer) => observer,
        Err(e) => {
            log::warn!("IntersectionObserver unavailable, revealing everything: {:?}", e);
            for el in &targets {
                let _ = el.class_list().add_1(FADE_IN_VISIBLE);
            }
            return Some(());
        }
    };
    on_intersect.forget();

    for el in &targets {
        observer.observe(el);
    }
    log::debug!("Observing {} fade-in elements", targets.len());
    Some(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_hash_is_not_intercepted() {
        assert_eq!(anchor_target("#"), None);
    }

    #[test]
    fn fragment_becomes_selector() {
        assert_eq!(anchor_target("#services"), Some("#services"));
    }

    #[test]
    fn other_hrefs_are_ignored() {
        assert_eq!(anchor_target("/about#team"), None);
        assert_eq!(anchor_target(""), None);
    }
}

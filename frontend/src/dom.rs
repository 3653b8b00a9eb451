use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, NodeList};

/// Class the stylesheet uses for every "on" state (open menu, shown slide, visible popup).
pub const ACTIVE: &str = "active";

/// Selector lookups that work the same on the document and inside an element.
pub trait Scope {
    fn find(&self, selector: &str) -> Option<Element>;
    fn find_all(&self, selector: &str) -> Vec<Element>;
}

impl Scope for Document {
    fn find(&self, selector: &str) -> Option<Element> {
        self.query_selector(selector).ok().flatten()
    }

    fn find_all(&self, selector: &str) -> Vec<Element> {
        elements(self.query_selector_all(selector))
    }
}

impl Scope for Element {
    fn find(&self, selector: &str) -> Option<Element> {
        self.query_selector(selector).ok().flatten()
    }

    fn find_all(&self, selector: &str) -> Vec<Element> {
        elements(self.query_selector_all(selector))
    }
}

fn elements(nodes: Result<NodeList, JsValue>) -> Vec<Element> {
    let Ok(nodes) = nodes else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Attaches a listener for the lifetime of the page.
pub fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    if let Err(e) =
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
    {
        log::warn!("Failed to attach {} listener: {:?}", event, e);
    }
    callback.forget();
}

/// True when the event was dispatched on `el` itself rather than on a descendant.
pub fn targets(event: &Event, el: &Element) -> bool {
    let el: &JsValue = el.as_ref();
    event.target().map(JsValue::from).as_ref() == Some(el)
}

pub fn set_active(el: &Element, active: bool) {
    let _ = el.class_list().toggle_with_force(ACTIVE, active);
}

pub fn set_style(el: &Element, property: &str, value: &str) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property(property, value);
    }
}

pub fn window_scroll_y() -> f64 {
    web_sys::window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0)
}

use std::cell::Cell;
use std::rc::Rc;

use web_sys::{Document, Element, HtmlElement, Window};

use crate::config::NavigationConfig;
use crate::dom::{self, Scope};

const HEADER: &str = ".navbar";
const TOGGLE: &str = ".navbar-toggle";
const MENU: &str = ".navbar-nav";
const MENU_LINKS: &str = ".navbar-nav a";
const SCROLLED: &str = "scrolled";

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Returns true if the menu was open and is now closed.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }
}

/// Body `overflow` value: page scrolling is locked while the menu is open.
pub fn overflow_for(open: bool) -> &'static str {
    if open {
        "hidden"
    } else {
        ""
    }
}

pub fn header_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

pub fn init(window: &Window, document: &Document, config: &NavigationConfig) -> Option<()> {
    let menu = init_menu(document);
    let header = init_header(window, document, config.scroll_threshold);
    menu.or(header)
}

fn init_menu(document: &Document) -> Option<()> {
    let toggle = document.find(TOGGLE)?;
    let menu = document.find(MENU)?;
    let body = document.body();
    let state = Rc::new(Cell::new(MenuState::default()));

    {
        let state = state.clone();
        let (toggle_el, menu, body) = (toggle.clone(), menu.clone(), body.clone());
        dom::listen(&toggle, "click", move |_| {
            let mut s = state.get();
            s.toggle();
            state.set(s);
            apply(&toggle_el, &menu, body.as_ref(), s.is_open());
        });
    }

    for link in document.find_all(MENU_LINKS) {
        let state = state.clone();
        let (toggle, menu, body) = (toggle.clone(), menu.clone(), body.clone());
        dom::listen(&link, "click", move |_| {
            let mut s = state.get();
            if s.close() {
                state.set(s);
                apply(&toggle, &menu, body.as_ref(), false);
            }
        });
    }

    log::debug!("Mobile menu wired");
    Some(())
}

fn apply(toggle: &Element, menu: &Element, body: Option<&HtmlElement>, open: bool) {
    dom::set_active(toggle, open);
    dom::set_active(menu, open);
    if let Some(body) = body {
        let _ = body.style().set_property("overflow", overflow_for(open));
    }
}

fn init_header(window: &Window, document: &Document, threshold: f64) -> Option<()> {
    let header = document.find(HEADER)?;
    dom::listen(window, "scroll", move |_| {
        let scrolled = header_scrolled(dom::window_scroll_y(), threshold);
        let _ = header.class_list().toggle_with_force(SCROLLED, scrolled);
    });
    Some(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_number_of_toggles_closes_menu() {
        let mut menu = MenuState::default();
        for _ in 0..4 {
            menu.toggle();
        }
        assert!(!menu.is_open());
        assert!(menu.toggle());
        assert!(menu.is_open());
    }

    #[test]
    fn link_click_closes_open_menu() {
        let mut menu = MenuState::default();
        menu.toggle();
        assert!(menu.close());
        assert!(!menu.is_open());
    }

    #[test]
    fn link_click_on_closed_menu_is_noop() {
        let mut menu = MenuState::default();
        assert!(!menu.close());
        assert_eq!(menu, MenuState::default());
    }

    #[test]
    fn open_menu_locks_page_scroll() {
        let mut menu = MenuState::default();
        assert_eq!(overflow_for(menu.toggle()), "hidden");
        assert_eq!(overflow_for(menu.toggle()), "");
        menu.toggle();
        menu.close();
        assert_eq!(overflow_for(menu.is_open()), "");
    }

    #[test]
    fn header_threshold_is_strict() {
        assert!(!header_scrolled(0.0, 50.0));
        assert!(!header_scrolled(50.0, 50.0));
        assert!(header_scrolled(50.5, 50.0));
    }
}

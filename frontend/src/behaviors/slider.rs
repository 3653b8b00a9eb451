use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, MouseEvent, TouchEvent};

use crate::dom::{self, Scope};

const SLIDER: &str = ".before-after-slider";
const HANDLE: &str = ".slider-handle";
const AFTER_IMAGE: &str = ".after-image";

/// Divider position as a percentage of the slider width, clamped to `[0, 100]`.
/// A collapsed slider has no meaningful position.
pub fn divider_percent(x: f64, left: f64, width: f64) -> Option<f64> {
    if width <= 0.0 {
        return None;
    }
    Some(((x - left) / width * 100.0).clamp(0.0, 100.0))
}

/// Clips the "after" image so only the part left of the divider shows.
pub fn clip_path_for(percent: f64) -> String {
    format!("inset(0 {}% 0 0)", 100.0 - percent)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragState {
    pub dragging: bool,
    pub position: f64,
}

impl Default for DragState {
    fn default() -> Self {
        Self { dragging: false, position: 50.0 }
    }
}

impl DragState {
    pub fn press(&mut self) {
        self.dragging = true;
    }

    pub fn release(&mut self) {
        self.dragging = false;
    }

    pub fn move_to(&mut self, percent: f64) {
        self.position = percent.clamp(0.0, 100.0);
    }
}

struct Slider {
    root: Element,
    handle: Element,
    after_image: Element,
    state: Cell<DragState>,
}

impl Slider {
    fn from_root(root: Element) -> Option<Self> {
        let handle = root.find(HANDLE)?;
        let after_image = root.find(AFTER_IMAGE)?;
        Some(Self {
            root,
            handle,
            after_image,
            state: Cell::new(DragState::default()),
        })
    }

    fn update(&self, client_x: f64) {
        let rect = self.root.get_bounding_client_rect();
        let Some(percent) = divider_percent(client_x, rect.left(), rect.width()) else {
            return;
        };
        let mut state = self.state.get();
        state.move_to(percent);
        self.state.set(state);

        dom::set_style(&self.handle, "left", &format!("{}%", state.position));
        dom::set_style(&self.after_image, "clip-path", &clip_path_for(state.position));
    }

    fn set_dragging(&self, dragging: bool) {
        let mut state = self.state.get();
        if dragging {
            state.press();
        } else {
            state.release();
        }
        self.state.set(state);
    }

    fn is_dragging(&self) -> bool {
        self.state.get().dragging
    }
}

pub fn init(document: &Document) -> Option<()> {
    let sliders: Rc<Vec<Slider>> = Rc::new(
        document
            .find_all(SLIDER)
            .into_iter()
            .filter_map(Slider::from_root)
            .collect(),
    );
    if sliders.is_empty() {
        return None;
    }

    for index in 0..sliders.len() {
        for press in ["mousedown", "touchstart"] {
            let all = sliders.clone();
            dom::listen(&sliders[index].handle, press, move |_| all[index].set_dragging(true));
        }

        let all = sliders.clone();
        dom::listen(&sliders[index].root, "click", move |e| {
            let slider = &all[index];
            if dom::targets(&e, &slider.handle) {
                return;
            }
            if let Some(e) = e.dyn_ref::<MouseEvent>() {
                slider.update(e.client_x() as f64);
            }
        });
    }

    // Document-level listeners are shared by every instance.
    for moved in ["mousemove", "touchmove"] {
        let all = sliders.clone();
        dom::listen(document, moved, move |e| {
            let Some(x) = pointer_x(&e) else {
                return;
            };
            for slider in all.iter().filter(|s| s.is_dragging()) {
                slider.update(x);
            }
        });
    }
    for released in ["mouseup", "touchend"] {
        let all = sliders.clone();
        dom::listen(document, released, move |_| {
            for slider in all.iter() {
                slider.set_dragging(false);
            }
        });
    }

    log::debug!("Wired {} comparison sliders", sliders.len());
    Some(())
}

fn pointer_x(e: &Event) -> Option<f64> {
    if let Some(touch) = e.dyn_ref::<TouchEvent>() {
        return touch.touches().get(0).map(|t| t.client_x() as f64);
    }
    e.dyn_ref::<MouseEvent>().map(|m| m.client_x() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_inside_maps_linearly() {
        assert_eq!(divider_percent(150.0, 100.0, 200.0), Some(25.0));
        assert_eq!(divider_percent(300.0, 100.0, 200.0), Some(100.0));
    }

    #[test]
    fn pointer_outside_is_clamped() {
        assert_eq!(divider_percent(-5000.0, 100.0, 200.0), Some(0.0));
        assert_eq!(divider_percent(5000.0, 100.0, 200.0), Some(100.0));
    }

    #[test]
    fn collapsed_slider_has_no_position() {
        assert_eq!(divider_percent(10.0, 0.0, 0.0), None);
        assert_eq!(divider_percent(10.0, 0.0, -4.0), None);
    }

    #[test]
    fn clip_path_reveals_left_part() {
        assert_eq!(clip_path_for(25.0), "inset(0 75% 0 0)");
        assert_eq!(clip_path_for(100.0), "inset(0 0% 0 0)");
    }

    #[test]
    fn release_stops_drag_but_keeps_position() {
        let mut state = DragState::default();
        state.press();
        state.move_to(130.0);
        assert_eq!(state.position, 100.0);
        state.release();
        assert!(!state.dragging);
        assert_eq!(state.position, 100.0);
    }

    #[test]
    fn instances_keep_independent_state() {
        let mut a = DragState::default();
        let b = DragState::default();
        a.press();
        a.move_to(10.0);
        assert!(!b.dragging);
        assert_eq!(b.position, 50.0);
    }
}

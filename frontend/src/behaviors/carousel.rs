use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Interval;
use web_sys::{Document, Element};

use crate::config::CarouselConfig;
use crate::dom::{self, Scope};

const CAROUSEL: &str = ".testimonial-carousel";
const SLIDE: &str = ".testimonial-slide";
const PREV: &str = ".carousel-prev";
const NEXT: &str = ".carousel-next";
const DOT: &str = ".carousel-dot";

/// Slide cursor that always stays in `[0, len)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Carousel {
    current: usize,
    len: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Option<Self> {
        (len > 0).then_some(Self { current: 0, len })
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn next(&mut self) -> usize {
        self.current = (self.current + 1) % self.len;
        self.current
    }

    pub fn previous(&mut self) -> usize {
        self.current = (self.current + self.len - 1) % self.len;
        self.current
    }

    /// Out-of-range indices (a stray extra dot) leave the cursor where it is.
    pub fn go_to(&mut self, index: usize) -> usize {
        if index < self.len {
            self.current = index;
        }
        self.current
    }
}

/// Active state for each of `len` items when `index` is shown.
pub fn active_flags(len: usize, index: usize) -> impl Iterator<Item = bool> {
    (0..len).map(move |i| i == index)
}

struct View {
    slides: Vec<Element>,
    dots: Vec<Element>,
}

impl View {
    fn show(&self, index: usize) {
        log::debug!("Showing slide {}", index);
        for (slide, active) in self.slides.iter().zip(active_flags(self.slides.len(), index)) {
            dom::set_active(slide, active);
        }
        for (dot, active) in self.dots.iter().zip(active_flags(self.dots.len(), index)) {
            dom::set_active(dot, active);
        }
    }
}

pub fn init(document: &Document, config: &CarouselConfig) -> Option<()> {
    let root = document.find(CAROUSEL)?;
    let slides = root.find_all(SLIDE);
    let state = Rc::new(RefCell::new(Carousel::new(slides.len())?));
    let dots = root.find_all(DOT);
    let view = Rc::new(View { slides, dots });

    let step = {
        let state = state.clone();
        let view = view.clone();
        move |f: fn(&mut Carousel) -> usize| {
            let mut carousel = state.borrow_mut();
            f(&mut *carousel);
            view.show(carousel.current());
        }
    };

    if let Some(next) = root.find(NEXT) {
        let step = step.clone();
        dom::listen(&next, "click", move |_| step(Carousel::next));
    }
    if let Some(prev) = root.find(PREV) {
        let step = step.clone();
        dom::listen(&prev, "click", move |_| step(Carousel::previous));
    }

    for (index, dot) in view.dots.iter().enumerate() {
        let state = state.clone();
        let view = view.clone();
        dom::listen(dot, "click", move |_| {
            let shown = state.borrow_mut().go_to(index);
            view.show(shown);
        });
    }

    // Runs for the page lifetime, regardless of manual navigation.
    Interval::new(config.interval_ms, move || step(Carousel::next)).forget();

    log::debug!("Carousel wired with {} slides", view.slides.len());
    Some(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_carousel_is_rejected() {
        assert_eq!(Carousel::new(0), None);
    }

    #[test]
    fn next_len_times_returns_to_start() {
        let mut carousel = Carousel::new(4).unwrap();
        carousel.go_to(2);
        for _ in 0..4 {
            carousel.next();
        }
        assert_eq!(carousel.current(), 2);
    }

    #[test]
    fn previous_from_zero_wraps_to_last() {
        let mut carousel = Carousel::new(3).unwrap();
        assert_eq!(carousel.previous(), 2);
        assert_eq!(carousel.previous(), 1);
    }

    #[test]
    fn single_slide_stays_put() {
        let mut carousel = Carousel::new(1).unwrap();
        assert_eq!(carousel.next(), 0);
        assert_eq!(carousel.previous(), 0);
    }

    #[test]
    fn go_to_ignores_out_of_range() {
        let mut carousel = Carousel::new(3).unwrap();
        assert_eq!(carousel.go_to(1), 1);
        assert_eq!(carousel.go_to(7), 1);
    }

    #[test]
    fn exactly_one_item_is_active() {
        let mut carousel = Carousel::new(4).unwrap();
        let flags: Vec<bool> = active_flags(4, carousel.previous()).collect();
        assert_eq!(flags, vec![false, false, false, true]);
        assert_eq!(active_flags(4, carousel.next()).filter(|a| *a).count(), 1);
    }

    #[test]
    fn extra_dots_stay_inactive() {
        let flags: Vec<bool> = active_flags(5, 1).collect();
        assert_eq!(flags, vec![false, true, false, false, false]);
        assert_eq!(active_flags(0, 0).count(), 0);
    }

    #[test]
    fn index_never_leaves_range() {
        let mut carousel = Carousel::new(5).unwrap();
        for i in 0..50 {
            let index = if i % 3 == 0 { carousel.previous() } else { carousel.next() };
            assert!(index < 5);
        }
    }
}

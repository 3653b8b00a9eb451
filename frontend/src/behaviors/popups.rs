use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlFormElement, Storage, Window};

use crate::components::acknowledgment;
use crate::config::PopupConfig;
use crate::dom::{self, Scope};

const PROMO_MODAL_ID: &str = "promo-modal";
const PROMO_CLOSE: &str = ".promo-close";
const NEWSLETTER_ID: &str = "newsletter-slide";
const NEWSLETTER_CLOSE: &str = ".newsletter-close";
const FORMS: &str = "form";

/// Session-scoped boolean flags.
pub trait SessionFlags {
    fn is_set(&self, key: &str) -> bool;
    fn set(&self, key: &str);
}

impl SessionFlags for Storage {
    fn is_set(&self, key: &str) -> bool {
        matches!(self.get_item(key), Ok(Some(_)))
    }

    fn set(&self, key: &str) {
        if let Err(e) = self.set_item(key, "true") {
            log::warn!("Could not persist {}: {:?}", key, e);
        }
    }
}

/// Shows the promo at most once per browser session.
pub struct PromoGate<'a> {
    key: &'a str,
}

impl<'a> PromoGate<'a> {
    pub fn new(key: &'a str) -> Self {
        Self { key }
    }

    pub fn should_schedule(&self, store: Option<&impl SessionFlags>) -> bool {
        store.map_or(true, |s| !s.is_set(self.key))
    }

    /// Called when the reveal timer fires, not when the modal is dismissed.
    pub fn mark_seen(&self, store: Option<&impl SessionFlags>) {
        if let Some(store) = store {
            store.set(self.key);
        }
    }
}

pub fn scroll_percent(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> Option<f64> {
    let scrollable = scroll_height - viewport_height;
    (scrollable > 0.0).then(|| scroll_y / scrollable * 100.0)
}

/// One-shot trigger for the newsletter panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NewsletterTrigger {
    threshold: f64,
    shown: bool,
}

impl NewsletterTrigger {
    pub fn new(threshold: f64) -> Self {
        Self { threshold, shown: false }
    }

    /// True only for the first observation past the threshold.
    pub fn observe(&mut self, percent: Option<f64>) -> bool {
        if self.shown {
            return false;
        }
        match percent {
            Some(p) if p > self.threshold => {
                self.shown = true;
                true
            }
            _ => false,
        }
    }
}

/// The steps of answering a form submission.
pub trait Submission {
    fn prevent_default(&self);
    fn acknowledge(&self);
    fn reset(&self);
}

/// Every submission is kept on the page, acknowledged and cleared.
pub fn handle_submit(submission: &impl Submission) {
    submission.prevent_default();
    submission.acknowledge();
    submission.reset();
}

struct FormSubmission<'a> {
    event: &'a Event,
    form: &'a HtmlFormElement,
    message: &'a str,
    duration_ms: u32,
}

impl Submission for FormSubmission<'_> {
    fn prevent_default(&self) {
        self.event.prevent_default();
    }

    fn acknowledge(&self) {
        acknowledgment::show(self.message, self.duration_ms);
    }

    fn reset(&self) {
        self.form.reset();
    }
}

pub fn init(window: &Window, document: &Document, config: &PopupConfig) -> Option<()> {
    let promo = init_promo(window, document, config);
    let newsletter = init_newsletter(window, document, config.newsletter_scroll_percent);
    let forms = init_forms(document, config);
    promo.or(newsletter).or(forms)
}

fn init_promo(window: &Window, document: &Document, config: &PopupConfig) -> Option<()> {
    let modal = document.get_element_by_id(PROMO_MODAL_ID)?;
    let storage = window.session_storage().ok().flatten();

    if PromoGate::new(&config.promo_storage_key).should_schedule(storage.as_ref()) {
        let modal = modal.clone();
        let key = config.promo_storage_key.clone();
        Timeout::new(config.promo_delay_ms, move || {
            let _ = modal.class_list().add_1(dom::ACTIVE);
            PromoGate::new(&key).mark_seen(storage.as_ref());
            log::debug!("Promo shown");
        })
        .forget();
    }

    if let Some(close) = document.find(PROMO_CLOSE) {
        let modal = modal.clone();
        dom::listen(&close, "click", move |_| {
            let _ = modal.class_list().remove_1(dom::ACTIVE);
        });
    }

    let backdrop = modal.clone();
    dom::listen(&modal, "click", move |e| {
        if dom::targets(&e, &backdrop) {
            let _ = backdrop.class_list().remove_1(dom::ACTIVE);
        }
    });
    Some(())
}

fn init_newsletter(window: &Window, document: &Document, threshold: f64) -> Option<()> {
    let panel = document.get_element_by_id(NEWSLETTER_ID)?;
    let trigger = Rc::new(Cell::new(NewsletterTrigger::new(threshold)));

    {
        let panel = panel.clone();
        let window_clone = window.clone();
        let document = document.clone();
        dom::listen(window, "scroll", move |_| {
            let mut t = trigger.get();
            if t.shown {
                return;
            }
            let viewport = window_clone
                .inner_height()
                .ok()
                .and_then(|h| h.as_f64())
                .unwrap_or(0.0);
            let height = document.body().map_or(0, |b| b.scroll_height()) as f64;
            if t.observe(scroll_percent(dom::window_scroll_y(), height, viewport)) {
                let _ = panel.class_list().add_1(dom::ACTIVE);
                log::debug!("Newsletter panel shown");
            }
            trigger.set(t);
        });
    }

    if let Some(close) = document.find(NEWSLETTER_CLOSE) {
        dom::listen(&close, "click", move |_| {
            let _ = panel.class_list().remove_1(dom::ACTIVE);
        });
    }
    Some(())
}

fn init_forms(document: &Document, config: &PopupConfig) -> Option<()> {
    let forms = document.find_all(FORMS);
    if forms.is_empty() {
        return None;
    }

    for form in forms {
        let Ok(form) = form.dyn_into::<HtmlFormElement>() else {
            continue;
        };
        let target = form.clone();
        let message = config.acknowledgment_message.clone();
        let duration_ms = config.acknowledgment_ms;
        dom::listen(&form, "submit", move |e| {
            handle_submit(&FormSubmission {
                event: &e,
                form: &target,
                message: &message,
                duration_ms,
            });
        });
    }
    Some(())
}
